//! Unit intent extraction.

use std::sync::OnceLock;

use regex::Captures;
use serde::{Deserialize, Serialize};

use super::{parse_number, Cascade, NUM};
use crate::normalize::{canonical_unit, normalize_unit};

/// Unit token: optional "degrees", optional qualifier word, optional degree
/// sign, then a word with an optional power suffix.
const UNIT: &str =
    r"((?:degrees?\s+)?(?:(?:square|sq|cubic|fluid|fl|nautical|metric)\s+)?°?\s?[a-z]+[23²³]?)";

/// A unit conversion request with normalized unit codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitIntent {
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

/// At least one token must be a known unit, otherwise the phrase belongs
/// to some other domain ("100 USD to EUR").
fn build(value: &str, from: &str, to: &str) -> Option<UnitIntent> {
    if canonical_unit(from).is_none() && canonical_unit(to).is_none() {
        return None;
    }
    let from_unit = normalize_unit(from);
    let to_unit = normalize_unit(to);
    if from_unit.is_empty() || to_unit.is_empty() {
        return None;
    }
    Some(UnitIntent {
        value: parse_number(value)?,
        from_unit,
        to_unit,
    })
}

fn forward(c: &Captures<'_>) -> Option<UnitIntent> {
    build(&c[1], &c[2], &c[3])
}

/// "how many B in N A": the quantity follows the second unit token.
fn reversed(c: &Captures<'_>) -> Option<UnitIntent> {
    build(&c[2], &c[3], &c[1])
}

fn cascade() -> &'static Cascade<UnitIntent> {
    static CASCADE: OnceLock<Cascade<UnitIntent>> = OnceLock::new();
    CASCADE.get_or_init(|| {
        let convert = format!(r"(?i)convert\s+{NUM}\s*{UNIT}\s+(?:to|into|in)\s+{UNIT}");
        let how_many = format!(
            r"(?i)how\s+many\s+{UNIT}\s+(?:are\s+(?:there\s+)?)?(?:in|are)\s+{NUM}\s*{UNIT}"
        );
        let phrase = format!(r"(?i){NUM}\s*{UNIT}\s+(?:to|into|in|as)\s+{UNIT}");
        let temperature = format!(r"(?i){NUM}\s*°\s?[cfkr]\b\s*(?:to|in)\s*°\s?[cfkr]\b");

        let convert_to = format!(r"(?i)(?:convert\s+)?{NUM}\s*{UNIT}\s+(?:to|in|into)\s+{UNIT}");
        let in_as = format!(r"(?i){NUM}\s*{UNIT}\s+(?:in|as)\s+{UNIT}");

        Cascade::new(
            &[
                convert.as_str(),
                how_many.as_str(),
                phrase.as_str(),
                temperature.as_str(),
            ],
            &[
                ("convert_to", convert_to.as_str(), forward),
                ("in_as", in_as.as_str(), forward),
                ("how_many", how_many.as_str(), reversed),
            ],
        )
    })
}

/// Extract a unit conversion from free text.
///
/// Returns `None` when the query does not look like a unit conversion.
/// Unknown unit tokens pass through so the calculator can report them.
pub fn extract_unit_intent(query: &str) -> Option<UnitIntent> {
    cascade().extract(query)
}
