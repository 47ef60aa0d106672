//! Structured calculator output.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Where a currency rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateOrigin {
    Live,
    Cache,
    Fallback,
    Identity,
}

impl std::fmt::Display for RateOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RateOrigin::Live => "live",
            RateOrigin::Cache => "cache",
            RateOrigin::Fallback => "fallback",
            RateOrigin::Identity => "identity",
        };
        f.write_str(s)
    }
}

/// Direction of a whole-day shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOperation {
    Add,
    Subtract,
}

/// Domain fields of a result.
///
/// On failure the input fields are still populated so a caller can retry
/// with corrected input; computed fields stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ResultDetails {
    #[serde(rename_all = "camelCase")]
    Unit {
        value: f64,
        from_unit: String,
        to_unit: String,
        category: Option<String>,
        result: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Currency {
        amount: f64,
        from_currency: String,
        to_currency: String,
        rate: Option<f64>,
        result: Option<f64>,
        source: Option<RateOrigin>,
    },
    #[serde(rename_all = "camelCase")]
    DayShift {
        date: NaiveDate,
        days: i64,
        operation: DayOperation,
        result_date: Option<NaiveDate>,
        day_of_week: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Difference {
        from: NaiveDateTime,
        to: NaiveDateTime,
        unit: String,
        difference: Option<i64>,
        is_in_future: Option<bool>,
    },
    #[serde(rename_all = "camelCase")]
    DaysUntil {
        target: String,
        date: Option<NaiveDate>,
        days: Option<i64>,
        is_in_future: Option<bool>,
    },
    #[serde(rename_all = "camelCase")]
    DayOfWeek {
        date: NaiveDate,
        day_name: String,
        day_index: u32,
    },
    #[serde(rename_all = "camelCase")]
    Timezone {
        time_expression: String,
        from_zone: String,
        to_zone: String,
        from_time: Option<String>,
        to_time: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    CurrentTime { zone: String, time: Option<String> },
    /// Date/time query no phrasing matched.
    Unparsed { query: String },
}

/// Outcome of one calculator call. Calculators always return one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub success: bool,
    #[serde(flatten)]
    pub details: ResultDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionResult {
    /// A successful result with its display line.
    pub fn ok(details: ResultDetails, formatted: impl Into<String>) -> Self {
        Self {
            success: true,
            details,
            formatted: Some(formatted.into()),
            error: None,
        }
    }

    /// A failed result carrying the original inputs.
    pub fn failed(details: ResultDetails, error: impl ToString) -> Self {
        Self {
            success: false,
            details,
            formatted: None,
            error: Some(error.to_string()),
        }
    }

    pub fn formatted(&self) -> Option<&str> {
        self.formatted.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat_camel_case() {
        let result = ConversionResult::ok(
            ResultDetails::Unit {
                value: 5.0,
                from_unit: "mi".into(),
                to_unit: "km".into(),
                category: Some("length".into()),
                result: Some(8.04672),
            },
            "5 mi = 8.046720 km",
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["kind"], "unit");
        assert_eq!(json["fromUnit"], "mi");
        assert_eq!(json["formatted"], "5 mi = 8.046720 km");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failed_keeps_inputs() {
        let result = ConversionResult::failed(
            ResultDetails::Currency {
                amount: 50.0,
                from_currency: "USD".into(),
                to_currency: "GBP".into(),
                rate: None,
                result: None,
                source: None,
            },
            "no rate",
        );
        assert!(!result.success);
        assert_eq!(result.error(), Some("no rate"));
        assert!(result.formatted().is_none());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "currency");
        assert_eq!(json["fromCurrency"], "USD");
        assert_eq!(json["toCurrency"], "GBP");
    }

    #[test]
    fn test_rate_origin_display() {
        assert_eq!(RateOrigin::Fallback.to_string(), "fallback");
        assert_eq!(serde_json::to_value(RateOrigin::Cache).unwrap(), "cache");
    }
}
