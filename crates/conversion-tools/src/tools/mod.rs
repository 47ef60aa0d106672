//! Built-in calculators.

mod currency_converter;
mod date_time;
pub mod rates;
mod unit_converter;

pub use currency_converter::{fallback_rate, CurrencyConverter};
pub use date_time::{
    parse_clock, parse_date_expression, resolve_zone, shift_date, signed_difference,
    DateTimeCalculator, DifferenceUnit,
};
pub use rates::{
    ExchangeRateApi, RateCache, RateCacheEntry, RateSource, RatesConfig, StaticRates,
    DEFAULT_RATE_TTL,
};
pub use unit_converter::{category_of, convert_temperature, Category, UnitConverter};
