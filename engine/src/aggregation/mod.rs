// Aggregation engine: folds one raw quote batch into the per-symbol series
pub mod candle;
pub mod scalar;

pub use candle::CandlePolicy;
pub use scalar::ScalarPolicy;

use crate::error::EngineError;
use shared::models::{QuoteBatch, QuoteMode, SeriesSet};
use std::fmt::Debug;

/// How raw quotes for one symbol become points, and how a point is merged
/// into an existing series.
pub trait AggregationPolicy: Send + Sync + 'static {
    type Point: Clone + Debug + PartialEq + Send + Sync + 'static;

    const MODE: QuoteMode;

    /// Turns the raw JSON value for `symbol` into a point. `observed_at` is
    /// the receipt time of the batch in epoch milliseconds.
    fn decode(&self, symbol: &str, raw: &serde_json::Value, observed_at: i64) -> Result<Self::Point, EngineError>;

    /// Returns the series that results from merging `point` into `series`.
    /// The result never holds more than `retention` points.
    fn fold(&self, series: &[Self::Point], point: Self::Point, retention: usize) -> Vec<Self::Point>;
}

/// Drops the oldest points until the series fits the retention window.
pub(crate) fn evict_oldest<P>(series: &mut Vec<P>, retention: usize) {
    if series.len() > retention {
        let excess = series.len() - retention;
        series.drain(..excess);
    }
}

#[derive(Debug, Clone)]
pub struct AggregationEngine<A: AggregationPolicy> {
    policy: A,
    symbols: Vec<String>,
    retention: usize,
}

impl<A: AggregationPolicy> AggregationEngine<A> {
    pub fn new(policy: A, symbols: Vec<String>, retention: usize) -> Result<Self, EngineError> {
        if retention == 0 {
            return Err(EngineError::Config("retention window must be greater than 0".to_string()));
        }
        if symbols.is_empty() {
            return Err(EngineError::Config("at least one symbol must be tracked".to_string()));
        }
        Ok(AggregationEngine { policy, symbols, retention })
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn mode(&self) -> QuoteMode {
        A::MODE
    }

    pub fn initial_state(&self) -> SeriesSet<A::Point> {
        SeriesSet::empty(self.symbols.iter().cloned())
    }

    /// Applies one batch to `prev` and returns the next state. `prev` is left
    /// as it was. Symbols missing from the batch, or whose quote cannot be
    /// decoded, keep their previous series.
    pub fn apply(&self, prev: &SeriesSet<A::Point>, batch: &QuoteBatch, observed_at: i64) -> SeriesSet<A::Point> {
        let mut next = prev.clone();
        for symbol in prev.symbols() {
            let Some(raw) = batch.get(symbol) else {
                tracing::debug!(symbol = %symbol, "No quote for tracked symbol in batch");
                continue;
            };
            let point = match self.policy.decode(symbol, raw, observed_at) {
                Ok(point) => point,
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "Skipping malformed quote");
                    continue;
                }
            };
            let series = prev.get(symbol).unwrap_or_default();
            next.with_series(symbol, self.policy.fold(series, point, self.retention));
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::{Candle, ScalarPoint};

    fn batch(entries: &[(&str, serde_json::Value)]) -> QuoteBatch {
        entries.iter().map(|(s, v)| (s.to_string(), v.clone())).collect()
    }

    fn candle_engine(retention: usize) -> AggregationEngine<CandlePolicy> {
        AggregationEngine::new(CandlePolicy, vec!["AAPL".to_string(), "NVDA".to_string()], retention).unwrap()
    }

    fn candle_json(ts: i64, open: f64, high: f64, low: f64, close: f64) -> serde_json::Value {
        json!({ "timestamp": ts, "open": open, "high": high, "low": low, "close": close })
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(AggregationEngine::new(CandlePolicy, vec!["AAPL".to_string()], 0).is_err());
        assert!(AggregationEngine::new(ScalarPolicy, vec![], 60).is_err());
    }

    #[test]
    fn test_initial_state_tracks_configured_symbols() {
        let engine = candle_engine(60);
        let state = engine.initial_state();
        assert_eq!(state.symbols().collect::<Vec<_>>(), vec!["AAPL", "NVDA"]);
        assert!(state.iter().all(|(_, series)| series.is_empty()));
        assert_eq!(engine.mode(), QuoteMode::Candle);
    }

    #[test]
    fn test_candle_end_to_end() {
        let engine = candle_engine(60);
        let s0 = engine.initial_state();

        let s1 = engine.apply(&s0, &batch(&[("AAPL", candle_json(1000, 10.0, 12.0, 9.0, 11.0))]), 0);
        assert_eq!(s1.get("AAPL").unwrap(), &[Candle { x: 1000, y: [10.0, 12.0, 9.0, 11.0] }]);

        let s2 = engine.apply(&s1, &batch(&[("AAPL", candle_json(1000, 10.0, 13.0, 9.0, 12.0))]), 0);
        assert_eq!(s2.get("AAPL").unwrap(), &[Candle { x: 1000, y: [10.0, 13.0, 9.0, 12.0] }]);

        let s3 = engine.apply(&s2, &batch(&[("AAPL", candle_json(1060, 12.0, 12.5, 11.0, 11.5))]), 0);
        assert_eq!(s3.get("AAPL").unwrap().len(), 2);

        // Earlier states are untouched
        assert_eq!(s1.get("AAPL").unwrap()[0].high(), 12.0);
        assert!(s0.get("AAPL").unwrap().is_empty());
    }

    #[test]
    fn test_candle_replay_is_idempotent() {
        let engine = candle_engine(60);
        let tick = batch(&[("AAPL", candle_json(1000, 10.0, 12.0, 9.0, 11.0)), ("NVDA", candle_json(1000, 5.0, 6.0, 4.0, 5.5))]);
        let once = engine.apply(&engine.initial_state(), &tick, 0);
        let twice = engine.apply(&once, &tick, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_symbol_leaves_series_unchanged() {
        let engine = candle_engine(60);
        let s1 = engine.apply(
            &engine.initial_state(),
            &batch(&[("AAPL", candle_json(1000, 1.0, 1.0, 1.0, 1.0)), ("NVDA", candle_json(1000, 2.0, 2.0, 2.0, 2.0))]),
            0,
        );
        let s2 = engine.apply(&s1, &batch(&[("AAPL", candle_json(1060, 1.0, 1.0, 1.0, 1.0))]), 0);
        assert_eq!(s2.get("NVDA"), s1.get("NVDA"));
        assert_eq!(s2.get("AAPL").unwrap().len(), 2);
    }

    #[test]
    fn test_malformed_quote_skips_only_that_symbol() {
        let engine = candle_engine(60);
        let tick = batch(&[("AAPL", json!({ "timestamp": 1000, "open": 1.0 })), ("NVDA", candle_json(1000, 2.0, 2.0, 2.0, 2.0))]);
        let next = engine.apply(&engine.initial_state(), &tick, 0);
        assert!(next.get("AAPL").unwrap().is_empty());
        assert_eq!(next.get("NVDA").unwrap().len(), 1);
    }

    #[test]
    fn test_untracked_symbol_ignored() {
        let engine = candle_engine(60);
        let next = engine.apply(&engine.initial_state(), &batch(&[("TSLA", candle_json(1000, 1.0, 1.0, 1.0, 1.0))]), 0);
        assert!(!next.contains("TSLA"));
        assert_eq!(next, engine.initial_state());
    }

    #[test]
    fn test_eviction_end_to_end() {
        let engine = candle_engine(60);
        let mut state = engine.initial_state();
        for i in 0..60 {
            state = engine.apply(&state, &batch(&[("AAPL", candle_json(i * 60, 1.0, 1.0, 1.0, i as f64))]), 0);
        }
        assert_eq!(state.get("AAPL").unwrap().len(), 60);

        let next = engine.apply(&state, &batch(&[("AAPL", candle_json(60 * 60, 1.0, 1.0, 1.0, 60.0))]), 0);
        let series = next.get("AAPL").unwrap();
        assert_eq!(series.len(), 60);
        assert!(series.iter().all(|c| c.x != 0));
        assert_eq!(series[0].x, 60);
        assert_eq!(series[59].x, 3600);
    }

    #[test]
    fn test_bounded_growth_with_mixed_ticks() {
        let engine = candle_engine(5);
        let mut state = engine.initial_state();
        // Several ticks per bucket, buckets advancing every fourth tick
        for i in 0..40i64 {
            let ts = (i / 4) * 60;
            state = engine.apply(&state, &batch(&[("AAPL", candle_json(ts, 1.0, 2.0, 0.5, i as f64))]), 0);
            let series = state.get("AAPL").unwrap();
            assert!(series.len() <= 5);
            let mut xs: Vec<i64> = series.iter().map(|c| c.x).collect();
            let before = xs.clone();
            xs.dedup();
            assert_eq!(xs, before, "duplicate candle timestamps");
        }
        let closes: Vec<f64> = state.get("AAPL").unwrap().iter().map(|c| c.close()).collect();
        assert_eq!(closes, vec![23.0, 27.0, 31.0, 35.0, 39.0]);
    }

    #[test]
    fn test_scalar_dedup_on_same_observation() {
        let engine = AggregationEngine::new(ScalarPolicy, vec!["AAPL".to_string(), "NVDA".to_string()], 60).unwrap();
        let s1 = engine.apply(&engine.initial_state(), &batch(&[("AAPL", json!(101.5)), ("NVDA", json!(880.0))]), 5_000);
        let s2 = engine.apply(&s1, &batch(&[("AAPL", json!(102.0)), ("NVDA", json!(881.0))]), 5_000);
        assert_eq!(s2.get("AAPL").unwrap(), &[ScalarPoint { time: 5_000, value: 101.5 }]);
        assert_eq!(s2, s1);

        let s3 = engine.apply(&s2, &batch(&[("AAPL", json!(102.0))]), 6_000);
        assert_eq!(s3.get("AAPL").unwrap().len(), 2);
        assert_eq!(s3.get("NVDA").unwrap().len(), 1);
    }

    #[test]
    fn test_scalar_non_numeric_is_skipped() {
        let engine = AggregationEngine::new(ScalarPolicy, vec!["AAPL".to_string()], 60).unwrap();
        let next = engine.apply(&engine.initial_state(), &batch(&[("AAPL", json!("n/a"))]), 1);
        assert!(next.get("AAPL").unwrap().is_empty());
    }
}
