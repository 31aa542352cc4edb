use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Quote transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("JSON decode error: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Malformed quote for '{symbol}': {reason}")]
    MalformedQuote { symbol: String, reason: String },
}

impl EngineError {
    pub fn malformed(symbol: &str, reason: impl Into<String>) -> Self {
        EngineError::MalformedQuote {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    /// Errors that only cost the current tick. Everything else is a startup
    /// problem.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EngineError::Transport { .. } | EngineError::Decode { .. } | EngineError::MalformedQuote { .. }
        )
    }
}
