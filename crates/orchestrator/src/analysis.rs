//! Query analysis: which conversion domains a query needs.

use conversion_tools::Domain;
use serde::{Deserialize, Serialize};

/// Where a [`QueryAnalysis`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    #[default]
    Llm,
    Keywords,
}

/// Classification of a query into the three conversion domains.
///
/// This is also the JSON shape the classifier prompt asks the model for;
/// `reasoning` and `source` may be omitted by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryAnalysis {
    pub needs_unit: bool,
    pub needs_currency: bool,
    pub needs_date_time: bool,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub source: AnalysisSource,
}

impl QueryAnalysis {
    /// Whether the query needs `domain`.
    pub fn needs(&self, domain: Domain) -> bool {
        match domain {
            Domain::Unit => self.needs_unit,
            Domain::Currency => self.needs_currency,
            Domain::DateTime => self.needs_date_time,
        }
    }

    /// Needed domains in execution order (unit, currency, date/time).
    pub fn domains(&self) -> Vec<Domain> {
        Domain::ALL
            .into_iter()
            .filter(|domain| self.needs(*domain))
            .collect()
    }

    /// True when no domain is needed.
    pub fn is_empty(&self) -> bool {
        !(self.needs_unit || self.needs_currency || self.needs_date_time)
    }
}

const UNIT_KEYWORDS: &[&str] = &[
    "mm", "cm", "m", "km", "meter", "meters", "metre", "metres", "kilometer", "kilometers",
    "kilometre", "kilometres", "mile", "miles", "mi", "nautical", "inch", "inches", "ft", "foot",
    "feet", "yard", "yards", "yd", "mg", "g", "gram", "grams", "kg", "kilo", "kilos", "kilogram",
    "kilograms", "lb", "lbs", "pound", "pounds", "oz", "ounce", "ounces", "stone", "ton", "tons",
    "tonne", "tonnes", "l", "ml", "liter", "liters", "litre", "litres", "gallon", "gallons",
    "gal", "quart", "quarts", "pint", "pints", "cup", "cups", "tbsp", "tablespoon",
    "tablespoons", "tsp", "teaspoon", "teaspoons", "fl oz", "cubic", "square", "sq", "acre",
    "acres", "hectare", "hectares", "°c", "°f", "celsius", "fahrenheit", "kelvin", "rankine",
    "degrees", "hours", "minutes", "seconds", "milliseconds",
];

const CURRENCY_KEYWORDS: &[&str] = &[
    "$", "€", "£", "¥", "₹", "₩", "usd", "eur", "gbp", "jpy", "cad", "aud", "chf", "cny", "inr",
    "krw", "mxn", "brl", "dollar", "dollars", "euro", "euros", "pound", "pounds", "sterling",
    "yen", "yuan", "renminbi", "rupee", "rupees", "won", "franc", "francs", "peso", "pesos",
    "reais", "currency", "exchange",
];

const DATE_TIME_KEYWORDS: &[&str] = &[
    "day", "days", "date", "today", "tomorrow", "yesterday", "week", "weekday", "until", "till",
    "ago", "since", "christmas", "xmas", "halloween", "thanksgiving", "valentine", "valentines",
    "new year", "time", "timezone", "clock", "est", "edt", "cst", "cdt", "mst", "mdt", "pst",
    "pdt", "utc", "gmt", "bst", "cet", "cest", "jst", "ist", "aest", "monday", "tuesday",
    "wednesday", "thursday", "friday", "saturday", "sunday",
];

/// Classify a query by keyword membership alone.
///
/// Always answers; a query with no known keyword yields an all-false
/// analysis. Keywords containing a space or a symbol match as substrings,
/// the rest as whole tokens (leading digits are stripped, so "5km" counts
/// as "km").
pub fn classify_by_keywords(query: &str) -> QueryAnalysis {
    let lower = query.to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| !(c.is_alphanumeric() || c == '°'))
        .map(|token| token.trim_start_matches(|c: char| c.is_ascii_digit()))
        .filter(|token| !token.is_empty())
        .collect();

    let hits = |keywords: &[&'static str]| -> Vec<&'static str> {
        keywords
            .iter()
            .copied()
            .filter(|keyword| {
                if keyword.chars().all(char::is_alphanumeric) {
                    tokens.contains(keyword)
                } else {
                    lower.contains(keyword)
                }
            })
            .collect()
    };

    let unit = hits(UNIT_KEYWORDS);
    let currency = hits(CURRENCY_KEYWORDS);
    let date_time = hits(DATE_TIME_KEYWORDS);

    let mut matched = Vec::new();
    for (label, words) in [("unit", &unit), ("currency", &currency), ("dateTime", &date_time)] {
        if !words.is_empty() {
            matched.push(format!("{} ({})", label, words.join(", ")));
        }
    }
    let reasoning = if matched.is_empty() {
        "No conversion keywords found".to_string()
    } else {
        format!("Keyword match: {}", matched.join("; "))
    };

    QueryAnalysis {
        needs_unit: !unit.is_empty(),
        needs_currency: !currency.is_empty(),
        needs_date_time: !date_time.is_empty(),
        reasoning,
        source: AnalysisSource::Keywords,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_keywords() {
        let analysis = classify_by_keywords("Convert 5 miles to km");
        assert!(analysis.needs_unit);
        assert!(!analysis.needs_currency);
        assert!(!analysis.needs_date_time);
        assert_eq!(analysis.source, AnalysisSource::Keywords);
        assert!(analysis.reasoning.contains("miles"));
    }

    #[test]
    fn test_attached_units_and_symbols() {
        assert!(classify_by_keywords("5km in mi").needs_unit);
        assert!(classify_by_keywords("100°F to °C").needs_unit);

        let analysis = classify_by_keywords("$50 to EUR");
        assert!(analysis.needs_currency);
        assert!(!analysis.needs_unit);
    }

    #[test]
    fn test_date_time_keywords() {
        let analysis = classify_by_keywords("How many days until Christmas?");
        assert!(analysis.needs_date_time);
        assert!(!analysis.needs_unit);
        assert!(!analysis.needs_currency);

        assert!(classify_by_keywords("what time is it in Tokyo").needs_date_time);
        assert!(classify_by_keywords("days until New Year").needs_date_time);
    }

    #[test]
    fn test_ambiguous_word_sets_both_flags() {
        let analysis = classify_by_keywords("10 pounds to euros");
        assert!(analysis.needs_unit);
        assert!(analysis.needs_currency);
        assert_eq!(analysis.domains(), vec![Domain::Unit, Domain::Currency]);
    }

    #[test]
    fn test_no_keywords_is_all_false() {
        let analysis = classify_by_keywords("tell me a joke");
        assert!(analysis.is_empty());
        assert!(analysis.domains().is_empty());
        assert_eq!(analysis.reasoning, "No conversion keywords found");
    }

    #[test]
    fn test_tokens_not_substrings() {
        // "smile" contains "mi" and "mile" but is neither.
        assert!(!classify_by_keywords("smile").needs_unit);
    }

    #[test]
    fn test_deserialize_model_output() {
        let json = r#"{"needsUnit": false, "needsCurrency": true, "needsDateTime": false, "reasoning": "Money."}"#;
        let analysis: QueryAnalysis = serde_json::from_str(json).unwrap();

        assert!(analysis.needs_currency);
        assert_eq!(analysis.source, AnalysisSource::Llm);
        assert_eq!(analysis.domains(), vec![Domain::Currency]);
    }

    #[test]
    fn test_deserialize_requires_flags() {
        assert!(serde_json::from_str::<QueryAnalysis>(r#"{"reasoning": "?"}"#).is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let value = serde_json::to_value(classify_by_keywords("5 miles to km")).unwrap();
        assert_eq!(value["needsUnit"], true);
        assert_eq!(value["source"], "keywords");
    }
}
