// Engine library root: quote polling and real-time series aggregation.

pub mod aggregation;
pub mod config;
pub mod data;
pub mod error;
pub mod services;

pub use aggregation::{AggregationEngine, AggregationPolicy, CandlePolicy, ScalarPolicy};
pub use config::settings::TrackerSettings;
pub use data::quote_source::{HttpQuoteSource, QuoteSource};
pub use error::EngineError;
pub use services::{DriverHandle, DriverState, PollingDriver, RetryPolicy};
