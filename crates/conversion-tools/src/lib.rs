//! Natural-language conversion tools.
//!
//! This crate turns free-text queries such as "Convert 5 miles to km",
//! "50 dollars to euros" or "how many days until Christmas" into structured
//! results. Each domain is a two-stage pipeline:
//!
//! 1. An extractor ([`extract`]) narrows the query and matches an ordered
//!    table of patterns, producing a typed intent or nothing.
//! 2. A calculator ([`tools`]) executes the intent and always returns a
//!    [`ConversionResult`], successful or not.
//!
//! Alias resolution for units, currencies and timezones lives in
//! [`normalize`]; named holidays in [`special_dates`].
//!
//! # Built-in Tools
//!
//! - [`UnitConverter`] - length, mass, volume, time, area and temperature.
//! - [`CurrencyConverter`] - live rates behind a 10-minute cache, with a
//!   small fallback table.
//! - [`DateTimeCalculator`] - relative days, days-until, weekdays and
//!   timezone conversion.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use conversion_tools::{default_registry, ExchangeRateApi, RateCache};
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = default_registry(
//!         Arc::new(ExchangeRateApi::from_env()),
//!         Arc::new(RateCache::new()),
//!     );
//!     let result = registry
//!         .execute("unit_converter", "Convert 5 miles to km")
//!         .await
//!         .unwrap();
//!     println!("{:?}", result.and_then(|r| r.formatted)); // "5 mi = 8.046720 km"
//! }
//! ```

mod error;
pub mod extract;
pub mod normalize;
mod registry;
mod result;
pub mod special_dates;
mod tool;
pub mod tools;

use std::sync::Arc;

pub use error::ToolError;
pub use extract::{
    extract_currency_intent, extract_date_time_intent, extract_intent, extract_unit_intent,
    ConversionIntent, CurrencyIntent, DateTimeIntent, Direction, Domain, UnitIntent,
};
pub use registry::ToolRegistry;
pub use result::{ConversionResult, DayOperation, RateOrigin, ResultDetails};
pub use special_dates::{resolve_special_date, resolve_special_date_at, SpecialDate};
pub use tool::Tool;
pub use tools::{
    CurrencyConverter, DateTimeCalculator, ExchangeRateApi, RateCache, RateSource, RatesConfig,
    StaticRates, UnitConverter,
};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

/// Create a registry with the three built-in tools in routing order:
/// unit, currency, date/time.
pub fn default_registry(source: Arc<dyn RateSource>, cache: Arc<RateCache>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(UnitConverter::new());
    registry.register(CurrencyConverter::new(source, cache));
    registry.register(DateTimeCalculator::new());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = default_registry(Arc::new(StaticRates::offline()), Arc::new(RateCache::new()));
        assert_eq!(
            registry.list_tools(),
            vec!["unit_converter", "currency_converter", "date_time"]
        );
        for domain in Domain::ALL {
            assert_eq!(registry.for_domain(domain).unwrap().domain(), domain);
        }
    }
}
