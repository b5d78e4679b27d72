use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use domain::Quote;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::RwLock;

/// COMEX gold futures, quoted in USD per troy ounce.
pub const GOLD_FUTURES_SYMBOL: &str = "GC=F";

// Yahoo rejects requests without a browser-looking user agent.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote request for {symbol} failed: {message}")]
    Upstream { symbol: String, message: String },
    #[error("quote response for {0} is missing price data")]
    MissingData(String),
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError>;
}

pub struct YahooQuoteProvider {
    client: Client,
    api_base: String,
}

impl YahooQuoteProvider {
    pub fn new(api_base: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let url = format!("{}/{}", self.api_base, symbol);
        let resp = self
            .client
            .get(url)
            .query(&[("interval", "1d"), ("range", "2d")])
            .send()
            .await
            .map_err(|err| QuoteError::Upstream {
                symbol: symbol.to_string(),
                message: err.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(QuoteError::Upstream {
                symbol: symbol.to_string(),
                message: format!("status {status}"),
            });
        }

        let body: serde_json::Value = resp.json().await.map_err(|err| QuoteError::Upstream {
            symbol: symbol.to_string(),
            message: err.to_string(),
        })?;
        parse_chart_response(symbol, &body)
    }
}

/// Pull `regularMarketPrice` and `chartPreviousClose` out of a Yahoo chart
/// response. Previous close is optional; a quote without it just loses the
/// day-change fields downstream.
fn parse_chart_response(symbol: &str, body: &serde_json::Value) -> Result<Quote, QuoteError> {
    let meta = body
        .get("chart")
        .and_then(|chart| chart.get("result"))
        .and_then(|result| result.get(0))
        .and_then(|entry| entry.get("meta"))
        .ok_or_else(|| QuoteError::MissingData(symbol.to_string()))?;

    let price = meta
        .get("regularMarketPrice")
        .and_then(|value| value.as_f64())
        .and_then(Decimal::from_f64)
        .ok_or_else(|| QuoteError::MissingData(symbol.to_string()))?;

    let previous_close = meta
        .get("chartPreviousClose")
        .and_then(|value| value.as_f64())
        .and_then(Decimal::from_f64);

    Ok(Quote {
        price,
        previous_close,
    })
}

#[derive(Clone, Copy)]
struct CachedQuote {
    quote: Quote,
    fetched_at: Instant,
}

/// Short-TTL in-memory cache in front of another provider. A dashboard load
/// fans out one lookup per symbol; without this every stock row hits the
/// upstream API. Stale entries are served when a refresh fails.
pub struct CachedQuoteProvider<P> {
    inner: P,
    cache: Arc<RwLock<HashMap<String, CachedQuote>>>,
    ttl: Duration,
}

impl<P> CachedQuoteProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    async fn cached(&self, symbol: &str) -> Option<(Quote, bool)> {
        let cache = self.cache.read().await;
        cache.get(symbol).map(|entry| {
            let fresh = entry.fetched_at.elapsed() <= self.ttl;
            (entry.quote, fresh)
        })
    }

    async fn store(&self, symbol: &str, quote: Quote) {
        let mut cache = self.cache.write().await;
        cache.insert(
            symbol.to_string(),
            CachedQuote {
                quote,
                fetched_at: Instant::now(),
            },
        );
    }
}

#[async_trait]
impl<P: QuoteProvider> QuoteProvider for CachedQuoteProvider<P> {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        if let Some((quote, true)) = self.cached(symbol).await {
            return Ok(quote);
        }
        let stale = self.cached(symbol).await.map(|(quote, _)| quote);
        match self.inner.quote(symbol).await {
            Ok(quote) => {
                self.store(symbol, quote).await;
                Ok(quote)
            }
            Err(err) => {
                if let Some(quote) = stale {
                    tracing::warn!(symbol, error = %err, "serving stale quote after refresh failure");
                    return Ok(quote);
                }
                Err(err)
            }
        }
    }
}

/// Fixed quote table for tests and offline development.
#[derive(Clone, Default)]
pub struct StaticQuoteProvider {
    quotes: HashMap<String, Quote>,
}

impl StaticQuoteProvider {
    pub fn new(quotes: HashMap<String, Quote>) -> Self {
        Self { quotes }
    }
}

#[async_trait]
impl QuoteProvider for StaticQuoteProvider {
    async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        self.quotes
            .get(symbol)
            .copied()
            .ok_or_else(|| QuoteError::MissingData(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn parses_chart_meta() {
        let body = json!({
            "chart": {
                "result": [{
                    "meta": {
                        "regularMarketPrice": 182.5,
                        "chartPreviousClose": 180.0
                    }
                }]
            }
        });
        let quote = parse_chart_response("AAPL", &body).unwrap();
        assert_eq!(quote.price, dec!(182.5));
        assert_eq!(quote.previous_close, Some(dec!(180)));
    }

    #[test]
    fn previous_close_is_optional() {
        let body = json!({
            "chart": { "result": [{ "meta": { "regularMarketPrice": 99.0 } }] }
        });
        let quote = parse_chart_response("AAPL", &body).unwrap();
        assert_eq!(quote.price, dec!(99));
        assert!(quote.previous_close.is_none());
    }

    #[test]
    fn missing_price_is_an_error() {
        let body = json!({ "chart": { "result": [{ "meta": {} }] } });
        assert!(matches!(
            parse_chart_response("AAPL", &body),
            Err(QuoteError::MissingData(_))
        ));
    }

    struct CountingProvider {
        calls: AtomicUsize,
        fail_after: usize,
    }

    #[async_trait]
    impl QuoteProvider for CountingProvider {
        async fn quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call >= self.fail_after {
                return Err(QuoteError::MissingData(symbol.to_string()));
            }
            Ok(Quote {
                price: dec!(100),
                previous_close: None,
            })
        }
    }

    #[tokio::test]
    async fn cache_serves_fresh_entries_without_refetching() {
        let provider = CachedQuoteProvider::new(
            CountingProvider {
                calls: AtomicUsize::new(0),
                fail_after: usize::MAX,
            },
            Duration::from_secs(60),
        );
        provider.quote("AAPL").await.unwrap();
        provider.quote("AAPL").await.unwrap();
        assert_eq!(provider.inner.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cache_falls_back_to_stale_on_failure() {
        let provider = CachedQuoteProvider::new(
            CountingProvider {
                calls: AtomicUsize::new(0),
                fail_after: 1,
            },
            Duration::from_secs(0),
        );
        let first = provider.quote("AAPL").await.unwrap();
        // TTL of zero forces a refresh; the inner provider now fails, so the
        // cached quote comes back instead of the error.
        let second = provider.quote("AAPL").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn cache_propagates_failure_without_stale_entry() {
        let provider = CachedQuoteProvider::new(
            CountingProvider {
                calls: AtomicUsize::new(0),
                fail_after: 0,
            },
            Duration::from_secs(60),
        );
        assert!(provider.quote("AAPL").await.is_err());
    }
}
