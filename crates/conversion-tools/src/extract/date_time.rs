//! Date/time intent extraction.
//!
//! Rule order matters: numeric offsets are tried before the bare
//! "tomorrow"/"yesterday" words so "2 days after tomorrow"-style phrasings
//! and "day after tomorrow" are not swallowed by the one-day rules.

use std::sync::OnceLock;

use regex::Captures;
use serde::{Deserialize, Serialize};

use super::Cascade;

/// Clock expression: `3pm`, `3:30 PM`, `15:00`. A bare hour is not a time.
const TIME: &str = r"(\d{1,2}(?::\d{2})?\s*(?:am|pm)|\d{1,2}:\d{2})";
/// Zone token: abbreviation, city (two-word cities listed) or IANA name.
const ZONE: &str = r"([a-z][a-z_/]*(?:\s+(?:york|angeles|francisco|kong|city|paulo|zealand))?)";
/// End of a free-form date target: a conjunction starting the next request,
/// clause punctuation, or the end of the query. A comma before a digit stays
/// inside the target ("December 25, 2026").
const CLAUSE_END: &str =
    r"(?:\s+(?:and|then|plus|also)\b|\s*[;?!]|\s*\.(?:\s|$)|\s*,\s*[^\d\s]|\s*$)";

/// Offset direction relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Past,
    Future,
}

/// A parsed date/time request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DateTimeIntent {
    #[serde(rename_all = "camelCase")]
    RelativeDay { offset_days: i64, direction: Direction },
    #[serde(rename_all = "camelCase")]
    DaysUntil { target_date_expression: String },
    #[serde(rename_all = "camelCase")]
    TimezoneConvert {
        time_expression: String,
        from_zone: String,
        to_zone: String,
    },
    CurrentTimeIn { zone: String },
}

impl DateTimeIntent {
    /// Routing type of the intent.
    pub fn kind(&self) -> &'static str {
        match self {
            DateTimeIntent::RelativeDay {
                direction: Direction::Past,
                ..
            } => "pastDay",
            DateTimeIntent::RelativeDay { .. } => "futureDay",
            DateTimeIntent::DaysUntil { .. } => "daysBetween",
            DateTimeIntent::TimezoneConvert { .. } => "timezone",
            DateTimeIntent::CurrentTimeIn { .. } => "currentTime",
        }
    }

    /// Signed day offset for relative intents.
    pub fn signed_offset(&self) -> Option<i64> {
        match self {
            DateTimeIntent::RelativeDay {
                offset_days,
                direction,
            } => Some(match direction {
                Direction::Future => *offset_days,
                Direction::Past => -offset_days,
            }),
            _ => None,
        }
    }
}

fn relative(offset_days: i64, direction: Direction) -> Option<DateTimeIntent> {
    Some(DateTimeIntent::RelativeDay {
        offset_days,
        direction,
    })
}

fn future_n(c: &Captures<'_>) -> Option<DateTimeIntent> {
    relative(c[1].parse().ok()?, Direction::Future)
}

fn past_n(c: &Captures<'_>) -> Option<DateTimeIntent> {
    relative(c[1].parse().ok()?, Direction::Past)
}

fn days_until(c: &Captures<'_>) -> Option<DateTimeIntent> {
    let target = c[1].trim();
    if target.is_empty() {
        return None;
    }
    Some(DateTimeIntent::DaysUntil {
        target_date_expression: target.to_string(),
    })
}

fn timezone(c: &Captures<'_>) -> Option<DateTimeIntent> {
    Some(DateTimeIntent::TimezoneConvert {
        time_expression: c[1].trim().to_string(),
        from_zone: c[2].to_string(),
        to_zone: c[3].to_string(),
    })
}

fn current_time(c: &Captures<'_>) -> Option<DateTimeIntent> {
    Some(DateTimeIntent::CurrentTimeIn {
        zone: c[1].to_string(),
    })
}

fn cascade() -> &'static Cascade<DateTimeIntent> {
    static CASCADE: OnceLock<Cascade<DateTimeIntent>> = OnceLock::new();
    CASCADE.get_or_init(|| {
        let future_days =
            r"(?i)(\d+)\s+days?\s+(?:from\s+(?:now|today)|after\s+today|later|hence)";
        let in_days = r"(?i)\bin\s+(\d+)\s+days?\b";
        let past_days = r"(?i)(\d+)\s+days?\s+(?:ago|before\s+today|earlier)";
        let after_tomorrow = r"(?i)\bday\s+after\s+tomorrow\b";
        let before_yesterday = r"(?i)\bday\s+before\s+yesterday\b";
        let between_lead = r"\bdays?\s+between\s+(?:today|now)\s+and\s+";
        let until_lead = r"\bdays?\s+(?:left\s+)?(?:until|till|til|before)\s+";
        let to_lead = r"\bhow\s+many\s+days\s+(?:left\s+)?to\s+";
        let between = format!(r"(?i){between_lead}(.+?){CLAUSE_END}");
        let until = format!(r"(?i)(?:{until_lead}|{to_lead})(.+?){CLAUSE_END}");
        let convert = format!(r"(?i)\bconvert\s+{TIME}\s+{ZONE}\s+(?:to|in|into)\s+{ZONE}");
        let bare_convert =
            format!(r"(?i)(\d{{1,2}}(?::\d{{2}})?\s*(?:am|pm))\s+{ZONE}\s+(?:to|in|into)\s+{ZONE}");
        let time_in =
            format!(r"(?i)\btime\s+(?:is\s+it\s+)?(?:right\s+now\s+|now\s+)?in\s+{ZONE}");
        let tomorrow = r"(?i)\btomorrow\b";
        let yesterday = r"(?i)\byesterday\b";
        let today = r"(?i)\bwhat\s+(?:day|date)\s+is\s+(?:it\s+)?today\b|\btoday'?s\s+date\b";

        let between_target = format!(r"(?i){between_lead}.+?{CLAUSE_END}");
        let until_target = format!(r"(?i){until_lead}.+?{CLAUSE_END}");
        let to_target = format!(r"(?i){to_lead}.+?{CLAUSE_END}");
        let narrowers = [
            r"(?i)\d+\s+days?\s+(?:from\s+(?:now|today)|after\s+today|later|hence|ago|before\s+today|earlier)",
            r"(?i)\bin\s+\d+\s+days?\b",
            between_target.as_str(),
            until_target.as_str(),
            to_target.as_str(),
            convert.as_str(),
            bare_convert.as_str(),
            time_in.as_str(),
        ];

        Cascade::new(
            &narrowers,
            &[
                ("future_days", future_days, future_n),
                ("in_days", in_days, future_n),
                ("past_days", past_days, past_n),
                ("day_after_tomorrow", after_tomorrow, |_| {
                    relative(2, Direction::Future)
                }),
                ("day_before_yesterday", before_yesterday, |_| {
                    relative(2, Direction::Past)
                }),
                ("days_between", between.as_str(), days_until),
                ("days_until", until.as_str(), days_until),
                ("timezone_convert", convert.as_str(), timezone),
                ("timezone_bare", bare_convert.as_str(), timezone),
                ("current_time", time_in.as_str(), current_time),
                ("tomorrow", tomorrow, |_| relative(1, Direction::Future)),
                ("yesterday", yesterday, |_| relative(1, Direction::Past)),
                ("today", today, |_| relative(0, Direction::Future)),
            ],
        )
    })
}

/// Extract a date/time request from free text.
pub fn extract_date_time_intent(query: &str) -> Option<DateTimeIntent> {
    cascade().extract(query)
}

/// Like [`extract_date_time_intent`], also naming the rule that matched.
pub fn extract_date_time_rule(query: &str) -> Option<(&'static str, DateTimeIntent)> {
    cascade().extract_named(query)
}
