//! Currency conversion over a rate source, a rate cache and a fallback table.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use super::rates::{RateCache, RateSource};
use crate::error::ToolError;
use crate::extract::{ConversionIntent, Domain};
use crate::normalize::normalize_currency;
use crate::result::{ConversionResult, RateOrigin, ResultDetails};
use crate::tool::{wrong_domain, Tool};

/// Codes supported before any rate response has been seen.
const SEED_CURRENCIES: &[&str] = &[
    "USD", "EUR", "GBP", "JPY", "CAD", "AUD", "CHF", "CNY", "INR", "KRW", "MXN", "BRL", "RUB",
    "SEK", "NOK", "DKK", "PLN", "CZK", "HUF", "TRY", "ZAR", "NZD", "SGD", "HKD", "THB", "MYR",
    "IDR", "PHP", "VND", "TWD", "ILS", "AED", "SAR", "EGP", "NGN", "KES", "ARS", "CLP", "COP",
    "PEN", "PKR", "BDT", "UAH", "RON", "ISK",
];

/// Rates used when the source is unreachable. Pairs are directional and
/// never combined.
const FALLBACK_RATES: &[(&str, &str, f64)] = &[
    ("USD", "EUR", 0.92),
    ("EUR", "USD", 1.09),
    ("USD", "CAD", 1.36),
    ("CAD", "USD", 0.74),
    ("USD", "JPY", 149.50),
    ("JPY", "USD", 0.0067),
    ("EUR", "GBP", 0.86),
    ("GBP", "EUR", 1.16),
    ("USD", "INR", 83.20),
];

/// Hardcoded rate for a pair, if the fallback table has one.
pub fn fallback_rate(from: &str, to: &str) -> Option<f64> {
    FALLBACK_RATES
        .iter()
        .find(|(f, t, _)| f.eq_ignore_ascii_case(from) && t.eq_ignore_ascii_case(to))
        .map(|(_, _, rate)| *rate)
}

/// Get currency symbol for common currencies.
fn get_symbol(currency: &str) -> &'static str {
    match currency.to_uppercase().as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "CNY" => "¥",
        "KRW" => "₩",
        "INR" => "₹",
        "BRL" => "R$",
        "CAD" => "C$",
        "AUD" => "A$",
        "MXN" => "MX$",
        _ => "",
    }
}

/// Amount with symbol; JPY and KRW have no minor unit.
fn format_amount(amount: f64, currency: &str) -> String {
    let symbol = get_symbol(currency);
    if matches!(currency, "JPY" | "KRW") {
        format!("{}{:.0} {}", symbol, amount, currency)
    } else {
        format!("{}{:.2} {}", symbol, amount, currency)
    }
}

/// Currency conversion calculator and tool.
pub struct CurrencyConverter {
    source: Arc<dyn RateSource>,
    cache: Arc<RateCache>,
    supported: RwLock<HashSet<String>>,
}

impl CurrencyConverter {
    /// Create a converter sharing `cache` with the rest of the session.
    pub fn new(source: Arc<dyn RateSource>, cache: Arc<RateCache>) -> Self {
        Self {
            source,
            cache,
            supported: RwLock::new(SEED_CURRENCIES.iter().map(|c| c.to_string()).collect()),
        }
    }

    /// Whether a token, raw or normalized, is a supported currency.
    pub async fn is_supported(&self, token: &str) -> bool {
        let supported = self.supported.read().await;
        supported.contains(&normalize_currency(token))
            || supported.contains(&token.trim().to_uppercase())
    }

    pub async fn supported_count(&self) -> usize {
        self.supported.read().await.len()
    }

    /// Convert `amount` between two currencies.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> ConversionResult {
        let from_currency = normalize_currency(from);
        let to_currency = normalize_currency(to);
        debug!("Converting {} {} to {}", amount, from_currency, to_currency);

        let outcome = if from_currency == to_currency {
            Ok((1.0, RateOrigin::Identity))
        } else {
            self.checked_rate(amount, &from_currency, &to_currency).await
        };

        match outcome {
            Ok((rate, source)) => {
                let result = if source == RateOrigin::Identity {
                    amount
                } else {
                    amount * rate
                };
                let formatted = format!(
                    "{} = {} (rate {:.6})",
                    format_amount(amount, &from_currency),
                    format_amount(result, &to_currency),
                    rate
                );
                ConversionResult::ok(
                    ResultDetails::Currency {
                        amount,
                        from_currency,
                        to_currency,
                        rate: Some(rate),
                        result: Some(result),
                        source: Some(source),
                    },
                    formatted,
                )
            }
            Err(e) => ConversionResult::failed(
                ResultDetails::Currency {
                    amount,
                    from_currency,
                    to_currency,
                    rate: None,
                    result: None,
                    source: None,
                },
                e,
            ),
        }
    }

    async fn checked_rate(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<(f64, RateOrigin), ToolError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ToolError::InvalidAmount(amount));
        }
        for code in [from, to] {
            if !self.is_supported(code).await {
                return Err(ToolError::UnsupportedCurrency(code.to_string()));
            }
        }
        self.rate(from, to).await
    }

    /// Cache, then live source, then fallback table.
    async fn rate(&self, from: &str, to: &str) -> Result<(f64, RateOrigin), ToolError> {
        if let Some(rate) = self.cache.get(from, to).await {
            return Ok((rate, RateOrigin::Cache));
        }

        let live = match self.source.fetch_rates(from).await {
            Ok(rates) => {
                self.supported
                    .write()
                    .await
                    .extend(rates.keys().map(|code| code.to_uppercase()));
                rates
                    .get(to)
                    .copied()
                    .ok_or_else(|| ToolError::MissingRate(to.to_string()))
            }
            Err(e) => Err(e),
        };

        match live {
            Ok(rate) => {
                self.cache.insert(from, to, rate).await;
                Ok((rate, RateOrigin::Live))
            }
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    from, to, "Rate lookup failed, trying fallback table: {}", e
                );
                fallback_rate(from, to)
                    .map(|rate| (rate, RateOrigin::Fallback))
                    .ok_or_else(|| ToolError::RateUnavailable {
                        from: from.to_string(),
                        to: to.to_string(),
                        reason: e.to_string(),
                    })
            }
        }
    }
}

#[async_trait]
impl Tool for CurrencyConverter {
    fn name(&self) -> &str {
        "currency_converter"
    }

    fn description(&self) -> &str {
        "Converts between fiat currencies. \
         Supports USD, EUR, GBP, JPY, CAD, AUD, CHF, CNY, INR, KRW, and many more."
    }

    fn domain(&self) -> Domain {
        Domain::Currency
    }

    async fn calculate(&self, intent: ConversionIntent) -> ConversionResult {
        match intent {
            ConversionIntent::Currency(c) => {
                self.convert(c.amount, &c.from_currency, &c.to_currency).await
            }
            other => wrong_domain(self.name(), &other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::rates::StaticRates;

    fn converter(source: StaticRates) -> (CurrencyConverter, Arc<StaticRates>) {
        let source = Arc::new(source);
        let conv = CurrencyConverter::new(source.clone(), Arc::new(RateCache::new()));
        (conv, source)
    }

    fn details(result: &ConversionResult) -> (Option<f64>, Option<f64>, Option<RateOrigin>) {
        match &result.details {
            ResultDetails::Currency {
                rate,
                result,
                source,
                ..
            } => (*rate, *result, *source),
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[test]
    fn test_get_symbol() {
        assert_eq!(get_symbol("USD"), "$");
        assert_eq!(get_symbol("eur"), "€");
        assert_eq!(get_symbol("UNKNOWN"), "");
    }

    #[tokio::test]
    async fn test_identity_skips_source() {
        let (conv, source) = converter(StaticRates::offline());
        let result = conv.convert(42.5, "dollars", "usd").await;
        assert!(result.success);
        assert_eq!(details(&result), (Some(1.0), Some(42.5), Some(RateOrigin::Identity)));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_live_rate_then_cache() {
        let (conv, source) = converter(StaticRates::new().with_rate("USD", "EUR", 0.5));
        let first = conv.convert(10.0, "USD", "EUR").await;
        assert_eq!(details(&first), (Some(0.5), Some(5.0), Some(RateOrigin::Live)));
        assert_eq!(first.formatted(), Some("$10.00 USD = €5.00 EUR (rate 0.500000)"));

        let second = conv.convert(20.0, "usd", "euros").await;
        assert_eq!(details(&second).2, Some(RateOrigin::Cache));
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fallback_when_offline() {
        let (conv, _) = converter(StaticRates::offline());
        let result = conv.convert(50.0, "USD", "EUR").await;
        assert!(result.success);
        assert_eq!(details(&result).2, Some(RateOrigin::Fallback));
        assert_eq!(result.formatted(), Some("$50.00 USD = €46.00 EUR (rate 0.920000)"));
    }

    #[tokio::test]
    async fn test_missing_fallback_pair_fails_gracefully() {
        let (conv, _) = converter(StaticRates::offline());
        let result = conv.convert(50.0, "dollars", "pounds").await;
        assert!(!result.success);
        let error = result.error().unwrap();
        assert!(error.contains("USD->GBP"));
        assert!(error.contains("rate source offline"));
    }

    #[tokio::test]
    async fn test_zero_decimal_currencies() {
        let (conv, _) = converter(StaticRates::offline());
        let result = conv.convert(10.0, "USD", "JPY").await;
        assert_eq!(result.formatted(), Some("$10.00 USD = ¥1495 JPY (rate 149.500000)"));
    }

    #[tokio::test]
    async fn test_invalid_amount() {
        let (conv, _) = converter(StaticRates::offline());
        let result = conv.convert(0.0, "USD", "EUR").await;
        assert!(!result.success);
        assert_eq!(result.error(), Some("Invalid amount: 0"));
    }

    #[tokio::test]
    async fn test_unsupported_currency() {
        let (conv, source) = converter(StaticRates::offline());
        let result = conv.convert(5.0, "XYZ", "USD").await;
        assert_eq!(result.error(), Some("Unsupported currency: XYZ"));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_supported_set_grows_from_response() {
        let source = StaticRates::new()
            .with_rate("USD", "EUR", 0.9)
            .with_rate("USD", "XAU", 0.0004);
        let (conv, _) = converter(source);
        assert!(!conv.is_supported("XAU").await);
        conv.convert(1.0, "USD", "EUR").await;
        assert!(conv.is_supported("xau").await);
        assert_eq!(conv.supported_count().await, SEED_CURRENCIES.len() + 1);
    }

    #[test]
    fn test_fallback_table_is_directional() {
        assert_eq!(fallback_rate("USD", "INR"), Some(83.20));
        assert_eq!(fallback_rate("INR", "USD"), None);
        assert_eq!(fallback_rate("EUR", "CAD"), None);
    }
}
