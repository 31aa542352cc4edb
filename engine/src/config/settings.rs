// Tracker settings, loaded from the JSON config or built from defaults
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use shared::models::QuoteMode;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    pub endpoint: String,
    pub interval_ms: u64,
    /// Maximum number of points kept per series.
    pub retention_window: usize,
    pub symbols: Vec<String>,
    pub mode: QuoteMode,
    pub request_timeout_ms: u64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        // One-second polling, one hour of one-minute candles
        TrackerSettings {
            endpoint: "http://localhost:5000/stocks".to_string(),
            interval_ms: 1000,
            retention_window: 60,
            symbols: vec!["AAPL".to_string(), "NVDA".to_string()],
            mode: QuoteMode::Candle,
            request_timeout_ms: 5000,
        }
    }
}

impl TrackerSettings {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let settings: TrackerSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded tracker settings file");
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.endpoint.trim().is_empty() {
            return Err(EngineError::Config("endpoint must not be empty".to_string()));
        }
        if self.interval_ms == 0 {
            return Err(EngineError::Config("interval_ms must be greater than 0".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(EngineError::Config(
                "request_timeout_ms must be greater than 0".to_string(),
            ));
        }
        if self.retention_window == 0 {
            return Err(EngineError::Config("retention_window must be greater than 0".to_string()));
        }
        if self.symbols.is_empty() {
            return Err(EngineError::Config("at least one symbol must be tracked".to_string()));
        }
        let mut seen = HashSet::new();
        for symbol in &self.symbols {
            if symbol.trim().is_empty() {
                return Err(EngineError::Config("symbols must not be blank".to_string()));
            }
            if !seen.insert(symbol.as_str()) {
                return Err(EngineError::Config(format!("duplicate symbol '{}'", symbol)));
            }
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
