//! Currency intent extraction.

use std::sync::OnceLock;

use regex::Captures;
use serde::{Deserialize, Serialize};

use super::{parse_number, Cascade, NUM};
use crate::normalize::normalize_currency;

/// Currency token: a name with optional nationality, or a bare 3-letter code.
const CUR: &str = r"((?:(?:us|american|canadian|australian|new\s+zealand|hong\s+kong|singapore|british|swiss|japanese|chinese|indian|south\s+korean|korean|mexican|brazilian|swedish|turkish)\s+)?(?:dollars?|euros?|pounds?(?:\s+sterling)?|sterling|quid|bucks?|yen|yuan|renminbi|won|rupees?|francs?|pesos?|reais|real|rubles?|roubles?|kronor|krona|rand|lira|baht|bitcoin)|[a-z]{3})\b";

/// Currency symbol prefixing an amount.
const SYM: &str = r"([$€£¥₹₩])";

/// A currency conversion request with normalized codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyIntent {
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
}

fn build(amount: &str, from: &str, to: &str) -> Option<CurrencyIntent> {
    Some(CurrencyIntent {
        amount: parse_number(amount)?,
        from_currency: normalize_currency(from),
        to_currency: normalize_currency(to),
    })
}

fn named(c: &Captures<'_>) -> Option<CurrencyIntent> {
    build(&c[1], &c[2], &c[3])
}

fn symbol(c: &Captures<'_>) -> Option<CurrencyIntent> {
    build(&c[2], &c[1], &c[3])
}

fn cascade() -> &'static Cascade<CurrencyIntent> {
    static CASCADE: OnceLock<Cascade<CurrencyIntent>> = OnceLock::new();
    CASCADE.get_or_init(|| {
        let named_phrase = format!(r"(?i){NUM}\s*{CUR}\s+(?:to|into|in)\s+{CUR}");
        let symbol_phrase = format!(r"(?i){SYM}\s*{NUM}\s+(?:to|into|in)\s+{CUR}");

        let named_rule = format!(
            r"(?i)(?:(?:convert|how\s+much\s+is)\s+)?{NUM}\s*{CUR}\s+(?:to|in|into)\s+{CUR}"
        );
        let symbol_rule = format!(
            r"(?i)(?:(?:convert|how\s+much\s+is)\s+)?{SYM}\s*{NUM}\s+(?:to|in|into)\s+{CUR}"
        );

        Cascade::new(
            &[symbol_phrase.as_str(), named_phrase.as_str()],
            &[
                ("symbol", symbol_rule.as_str(), symbol),
                ("named", named_rule.as_str(), named),
            ],
        )
    })
}

/// Extract a currency conversion from free text.
///
/// Names and symbols normalize to ISO codes; anything else is upper-cased
/// and left for the calculator to accept or reject.
pub fn extract_currency_intent(query: &str) -> Option<CurrencyIntent> {
    cascade().extract(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(amount: f64, from: &str, to: &str) -> CurrencyIntent {
        CurrencyIntent {
            amount,
            from_currency: from.to_string(),
            to_currency: to.to_string(),
        }
    }

    #[test]
    fn test_names_to_codes() {
        assert_eq!(
            extract_currency_intent("50 dollars to pounds"),
            Some(intent(50.0, "USD", "GBP"))
        );
        assert_eq!(
            extract_currency_intent("How much is 1,000 yen in euros?"),
            Some(intent(1000.0, "JPY", "EUR"))
        );
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            extract_currency_intent("convert 100 USD to EUR"),
            Some(intent(100.0, "USD", "EUR"))
        );
        assert_eq!(
            extract_currency_intent("250 cad into usd"),
            Some(intent(250.0, "CAD", "USD"))
        );
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            extract_currency_intent("convert $20 to euros"),
            Some(intent(20.0, "USD", "EUR"))
        );
        assert_eq!(
            extract_currency_intent("£15.50 in USD"),
            Some(intent(15.5, "GBP", "USD"))
        );
    }

    #[test]
    fn test_nationality_prefix() {
        assert_eq!(
            extract_currency_intent("40 canadian dollars to swiss francs"),
            Some(intent(40.0, "CAD", "CHF"))
        );
        assert_eq!(
            extract_currency_intent("10000 korean won to indian rupees"),
            Some(intent(10000.0, "KRW", "INR"))
        );
    }

    #[test]
    fn test_unknown_code_upper_cased() {
        assert_eq!(
            extract_currency_intent("5 xyz to usd"),
            Some(intent(5.0, "XYZ", "USD"))
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(extract_currency_intent("asdf 12345"), None);
        assert_eq!(extract_currency_intent("how many days until christmas"), None);
    }
}
