//! Error types for extraction and calculation.

use thiserror::Error;

/// Errors raised inside the calculators.
///
/// These never cross a [`Tool`](crate::Tool) boundary: every calculator turns
/// them into a failed [`ConversionResult`](crate::ConversionResult).
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found in registry.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Unit token with no category.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Both units are known but measure different things.
    #[error("Cannot convert {from} ({from_category}) to {to} ({to_category}): incompatible units")]
    IncompatibleUnits {
        from: String,
        from_category: String,
        to: String,
        to_category: String,
    },

    /// Temperature symbol outside C/F/K/R.
    #[error("Unknown temperature unit: {0}")]
    UnknownTemperature(String),

    /// Non-positive or non-finite amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),

    /// Currency code not in the supported set.
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// Rate source failed and no fallback covers the pair.
    #[error("Exchange rate unavailable for {from}->{to}: {reason}")]
    RateUnavailable {
        from: String,
        to: String,
        reason: String,
    },

    /// Rate source answered without the requested currency.
    #[error("Rate for {0} missing from response")]
    MissingRate(String),

    /// Rate source answered with a non-success status.
    #[error("Rate source returned status {0}")]
    SourceStatus(u16),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Timezone alias did not resolve to an IANA zone.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Date expression could not be parsed.
    #[error("Could not parse date: {0}")]
    UnparseableDate(String),

    /// Clock expression could not be parsed.
    #[error("Could not parse time: {0}")]
    UnparseableTime(String),

    /// Difference unit outside days/weeks/months/years/hours/minutes/seconds.
    #[error("Unknown difference unit: {0}")]
    UnknownDifferenceUnit(String),

    /// Date arithmetic left the representable range.
    #[error("Date out of range")]
    DateOutOfRange,
}
