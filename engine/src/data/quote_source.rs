// Quote source client: one request to the quote endpoint per tick
use crate::config::settings::TrackerSettings;
use crate::error::EngineError;
use shared::models::QuoteBatch;
use std::future::Future;
use std::time::Duration;

/// Anything that can produce one raw quote batch on demand.
pub trait QuoteSource: Send + Sync + 'static {
    fn fetch(&self) -> impl Future<Output = Result<QuoteBatch, EngineError>> + Send;
}

/// Polls a fixed HTTP endpoint that answers with a JSON object keyed by symbol.
#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQuoteSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, EngineError> {
        if timeout.is_zero() {
            return Err(EngineError::Config("request timeout must be greater than 0".to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpQuoteSource {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_settings(settings: &TrackerSettings) -> Result<Self, EngineError> {
        Self::new(settings.endpoint.clone(), settings.request_timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QuoteSource for HttpQuoteSource {
    async fn fetch(&self) -> Result<QuoteBatch, EngineError> {
        let response = self.client.get(&self.endpoint).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        let batch: QuoteBatch = serde_json::from_slice(&body)?;
        tracing::trace!(endpoint = %self.endpoint, symbols = batch.len(), "Fetched quote batch");
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn source_for(server: &MockServer, timeout: Duration) -> HttpQuoteSource {
        HttpQuoteSource::new(format!("{}/stocks", server.uri()), timeout).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stocks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "AAPL": { "timestamp": 1000, "open": 10.0, "high": 12.0, "low": 9.0, "close": 11.0 },
                "NVDA": 880.5
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = source_for(&server, Duration::from_secs(2)).await;
        let batch = source.fetch().await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch["AAPL"]["close"], json!(11.0));
        assert_eq!(batch["NVDA"], json!(880.5));
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stocks"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = source_for(&server, Duration::from_secs(2)).await;
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, EngineError::Transport { .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stocks"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[1, 2, 3]"))
            .mount(&server)
            .await;

        let source = source_for(&server, Duration::from_secs(2)).await;
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, EngineError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stocks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let source = source_for(&server, Duration::from_millis(50)).await;
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, EngineError::Transport { .. }));
    }

    #[test]
    fn test_from_settings_uses_endpoint() {
        let settings = TrackerSettings::default();
        let source = HttpQuoteSource::from_settings(&settings).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:5000/stocks");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = HttpQuoteSource::new("http://localhost:5000/stocks", Duration::ZERO).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
        assert!(!err.is_recoverable());
    }
}
