//! Exchange-rate sources and the time-bounded rate cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, trace};

use crate::error::ToolError;

/// Default rate API (`GET {url}/{BASE}` returns `{"rates": {...}}`).
pub const DEFAULT_RATES_API_URL: &str = "https://api.exchangerate-api.com/v4/latest";

/// Default request timeout in seconds.
pub const DEFAULT_RATES_TIMEOUT_SECS: u64 = 10;

/// How long a fetched rate stays valid.
pub const DEFAULT_RATE_TTL: Duration = Duration::from_secs(10 * 60);

/// Source of exchange rates, queried per base currency.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// All rates from `base` (upper-case code) to other currencies.
    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, f64>, ToolError>;
}

/// Configuration for [`ExchangeRateApi`].
#[derive(Debug, Clone)]
pub struct RatesConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_RATES_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_RATES_TIMEOUT_SECS),
        }
    }
}

impl RatesConfig {
    /// Load from `RATES_API_URL` and `RATES_TIMEOUT_SECS`, with defaults.
    pub fn from_env() -> Self {
        let api_url = std::env::var("RATES_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RATES_API_URL.to_string());
        let timeout = std::env::var("RATES_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RATES_TIMEOUT_SECS);
        Self {
            api_url,
            timeout: Duration::from_secs(timeout),
        }
    }

    /// Override the API base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

/// Live rates over HTTP.
pub struct ExchangeRateApi {
    client: reqwest::Client,
    config: RatesConfig,
}

impl ExchangeRateApi {
    pub fn new(config: RatesConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("convert-assistant/0.1")
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client, config }
    }

    pub fn from_env() -> Self {
        Self::new(RatesConfig::from_env())
    }

    fn endpoint(&self, base: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_url.trim_end_matches('/'),
            base.to_uppercase()
        )
    }
}

#[async_trait]
impl RateSource for ExchangeRateApi {
    fn name(&self) -> &str {
        "exchangerate-api"
    }

    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, f64>, ToolError> {
        let url = self.endpoint(base);
        debug!("Fetching exchange rates from: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ToolError::SourceStatus(response.status().as_u16()));
        }

        let data: LatestRatesResponse = response.json().await?;
        Ok(data.rates)
    }
}

/// In-memory rates, for tests and offline runs.
#[derive(Default)]
pub struct StaticRates {
    rates: HashMap<String, HashMap<String, f64>>,
    offline: bool,
    calls: AtomicUsize,
}

impl StaticRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose every fetch fails, forcing the fallback table.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Add a `base → quote` rate.
    pub fn with_rate(mut self, base: &str, quote: &str, rate: f64) -> Self {
        self.rates
            .entry(base.to_uppercase())
            .or_default()
            .insert(quote.to_uppercase(), rate);
        self
    }

    /// Number of fetches made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RateSource for StaticRates {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, f64>, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(ToolError::RateUnavailable {
                from: base.to_uppercase(),
                to: "*".to_string(),
                reason: "rate source offline".to_string(),
            });
        }
        self.rates
            .get(&base.to_uppercase())
            .cloned()
            .ok_or_else(|| ToolError::MissingRate(base.to_uppercase()))
    }
}

/// One cached rate. Replaced wholesale on refresh.
#[derive(Debug, Clone, Copy)]
pub struct RateCacheEntry {
    pub rate: f64,
    pub fetched_at: Instant,
}

/// Rates keyed by the lowercase ordered pair, valid for a fixed TTL.
///
/// Expired entries are ignored, not evicted.
#[derive(Debug)]
pub struct RateCache {
    entries: Mutex<HashMap<String, RateCacheEntry>>,
    ttl: Duration,
}

impl RateCache {
    /// An empty cache with the 10-minute TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_RATE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn key(from: &str, to: &str) -> String {
        format!("{}_{}", from.to_lowercase(), to.to_lowercase())
    }

    /// A still-valid rate for the pair.
    pub async fn get(&self, from: &str, to: &str) -> Option<f64> {
        let entries = self.entries.lock().await;
        let entry = entries.get(&Self::key(from, to))?;
        if entry.fetched_at.elapsed() < self.ttl {
            trace!(from, to, rate = entry.rate, "rate cache hit");
            Some(entry.rate)
        } else {
            trace!(from, to, "rate cache entry expired");
            None
        }
    }

    pub async fn insert(&self, from: &str, to: &str, rate: f64) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            Self::key(from, to),
            RateCacheEntry {
                rate,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for RateCache {
    fn default() -> Self {
        Self::new()
    }
}
