// Candle policy: OHLC quotes merged by minute-bucket timestamp
use super::{evict_oldest, AggregationPolicy};
use crate::error::EngineError;
use serde::Deserialize;
use shared::models::{Candle, CandleQuote, QuoteMode};

#[derive(Debug, Clone, Copy, Default)]
pub struct CandlePolicy;

impl AggregationPolicy for CandlePolicy {
    type Point = Candle;

    const MODE: QuoteMode = QuoteMode::Candle;

    fn decode(&self, symbol: &str, raw: &serde_json::Value, _observed_at: i64) -> Result<Candle, EngineError> {
        // The source owns the timestamp in this mode; receipt time is irrelevant.
        CandleQuote::deserialize(raw)
            .map(Candle::from)
            .map_err(|e| EngineError::malformed(symbol, e.to_string()))
    }

    fn fold(&self, series: &[Candle], point: Candle, retention: usize) -> Vec<Candle> {
        let mut next = series.to_vec();
        // Many ticks land in the same bucket before it rolls over, so the
        // match is looked up across the whole series, not just the tail.
        match next.iter().position(|c| c.x == point.x) {
            Some(i) => next[i] = point,
            None => next.push(point),
        }
        evict_oldest(&mut next, retention);
        next
    }
}
