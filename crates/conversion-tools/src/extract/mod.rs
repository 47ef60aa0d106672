//! Natural-language extraction of conversion intents.
//!
//! Each domain declares a [`Cascade`]: a list of narrowing patterns that
//! isolate the relevant part of a mixed query, followed by an ordered list of
//! intent rules. Evaluation is lazy and stops at the first candidate and rule
//! that build an intent. Rule order is part of the contract, so the tables read top to
//! bottom in priority order.

mod currency;
mod date_time;
mod unit;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

pub use currency::{extract_currency_intent, CurrencyIntent};
pub use date_time::{extract_date_time_intent, extract_date_time_rule, DateTimeIntent, Direction};
pub use unit::{extract_unit_intent, UnitIntent};

/// Numeric literal with optional sign, grouping commas and decimals.
pub(crate) const NUM: &str = r"(-?\d[\d,]*(?:\.\d+)?)";

/// Builds an intent from a rule's captures; `None` rejects the match.
pub type Build<T> = fn(&Captures<'_>) -> Option<T>;

/// One named intent pattern.
pub struct Rule<T> {
    name: &'static str,
    pattern: Regex,
    build: Build<T>,
}

/// Narrow-then-match extraction table.
pub struct Cascade<T> {
    narrowers: Vec<Regex>,
    rules: Vec<Rule<T>>,
}

impl<T> Cascade<T> {
    /// Compile a cascade. Patterns are compile-time constants, so this is
    /// only called from `OnceLock` initialisers.
    pub fn new(narrowers: &[&str], rules: &[(&'static str, &str, Build<T>)]) -> Self {
        Self {
            narrowers: narrowers
                .iter()
                .map(|p| Regex::new(p).expect("valid narrowing pattern"))
                .collect(),
            rules: rules
                .iter()
                .map(|(name, p, build)| Rule {
                    name: *name,
                    pattern: Regex::new(p).expect("valid intent pattern"),
                    build: *build,
                })
                .collect(),
        }
    }

    /// Substring matched by the first narrowing pattern, or the whole query.
    pub fn narrow<'q>(&self, query: &'q str) -> &'q str {
        self.narrowers
            .iter()
            .find_map(|re| re.find(query))
            .map(|m| m.as_str())
            .unwrap_or(query)
    }

    /// Every narrowing match, pattern by pattern and left to right, then the
    /// whole query.
    pub fn candidates<'q>(&self, query: &'q str) -> Vec<&'q str> {
        self.narrowers
            .iter()
            .flat_map(|re| re.find_iter(query).map(|m| m.as_str()))
            .chain(std::iter::once(query))
            .collect()
    }

    /// Run the cascade, returning the rule name alongside the intent.
    ///
    /// Candidates are tried in order until one of them builds, so a mixed
    /// query whose first phrase belongs to another domain still reaches the
    /// phrase this cascade understands.
    pub fn extract_named(&self, query: &str) -> Option<(&'static str, T)> {
        self.candidates(query)
            .into_iter()
            .find_map(|candidate| self.match_rules(candidate))
    }

    fn match_rules(&self, candidate: &str) -> Option<(&'static str, T)> {
        self.rules.iter().find_map(|rule| {
            rule.pattern
                .captures_iter(candidate)
                .find_map(|caps| (rule.build)(&caps).map(|intent| (rule.name, intent)))
        })
    }

    pub fn extract(&self, query: &str) -> Option<T> {
        self.extract_named(query).map(|(_, intent)| intent)
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }
}

/// Parse a numeric literal, dropping grouping separators.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Conversion domain a query can need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Domain {
    Unit,
    Currency,
    DateTime,
}

impl Domain {
    /// Fixed execution order.
    pub const ALL: [Domain; 3] = [Domain::Unit, Domain::Currency, Domain::DateTime];
}

/// A fully-parsed request, prior to calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "camelCase")]
pub enum ConversionIntent {
    Unit(UnitIntent),
    Currency(CurrencyIntent),
    DateTime(DateTimeIntent),
}

impl ConversionIntent {
    pub fn domain(&self) -> Domain {
        match self {
            ConversionIntent::Unit(_) => Domain::Unit,
            ConversionIntent::Currency(_) => Domain::Currency,
            ConversionIntent::DateTime(_) => Domain::DateTime,
        }
    }
}

/// Run the extractor for one domain.
pub fn extract_intent(domain: Domain, query: &str) -> Option<ConversionIntent> {
    match domain {
        Domain::Unit => extract_unit_intent(query).map(ConversionIntent::Unit),
        Domain::Currency => extract_currency_intent(query).map(ConversionIntent::Currency),
        Domain::DateTime => extract_date_time_intent(query).map(ConversionIntent::DateTime),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Cascade<String> {
        Cascade::new(
            &[r"(?i)alpha\s+\w+", r"(?i)delta\s+\w+"],
            &[
                ("first", r"(?i)^alpha\s+(\w+)$", |c| Some(c[1].to_string())),
                ("second", r"(?i)beta\s+(\w+)", |c| Some(c[1].to_string())),
                ("rejecting", r"(?i)gamma\s+(\w+)", |_| None),
                ("fallback", r"(?i)gamma\s+(\w+)", |c| Some(format!("g:{}", &c[1]))),
                ("digits", r"(?i)^delta\s+(\d+)$", |c| Some(c[1].to_string())),
            ],
        )
    }

    #[test]
    fn test_narrowed_substring_tried_first() {
        let cascade = sample();
        assert_eq!(cascade.narrow("say alpha one please"), "alpha one");
        assert_eq!(
            cascade.extract_named("say alpha one please"),
            Some(("first", "one".to_string()))
        );
    }

    #[test]
    fn test_falls_back_to_original_query() {
        let cascade = sample();
        assert_eq!(cascade.narrow("beta two"), "beta two");
        assert_eq!(cascade.extract("x beta two"), Some("two".to_string()));
    }

    #[test]
    fn test_later_narrowed_match_is_tried() {
        let cascade = sample();
        assert_eq!(
            cascade.candidates("delta x and delta 7"),
            vec!["delta x", "delta 7", "delta x and delta 7"]
        );
        assert_eq!(
            cascade.extract_named("delta x and delta 7"),
            Some(("digits", "7".to_string()))
        );
    }

    #[test]
    fn test_rejected_build_continues_to_next_rule() {
        let cascade = sample();
        assert_eq!(
            cascade.extract_named("gamma three"),
            Some(("fallback", "g:three".to_string()))
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(sample().extract("nothing here"), None);
        assert_eq!(
            sample().rule_names().collect::<Vec<_>>(),
            vec!["first", "second", "rejecting", "fallback", "digits"]
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,234.5"), Some(1234.5));
        assert_eq!(parse_number("-40"), Some(-40.0));
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_extract_intent_dispatch() {
        let intent = extract_intent(Domain::Unit, "Convert 5 miles to km").unwrap();
        assert_eq!(intent.domain(), Domain::Unit);
        assert!(extract_intent(Domain::Currency, "asdf 12345").is_none());
    }
}
