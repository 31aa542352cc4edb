// Scalar policy: bare prices stamped with the poll's receipt time
use super::{evict_oldest, AggregationPolicy};
use crate::error::EngineError;
use shared::models::{QuoteMode, ScalarPoint};

#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarPolicy;

impl AggregationPolicy for ScalarPolicy {
    type Point = ScalarPoint;

    const MODE: QuoteMode = QuoteMode::Scalar;

    fn decode(&self, symbol: &str, raw: &serde_json::Value, observed_at: i64) -> Result<ScalarPoint, EngineError> {
        let value = raw
            .as_f64()
            .ok_or_else(|| EngineError::malformed(symbol, format!("expected a number, got {}", raw)))?;
        Ok(ScalarPoint { time: observed_at, value })
    }

    fn fold(&self, series: &[ScalarPoint], point: ScalarPoint, retention: usize) -> Vec<ScalarPoint> {
        // observed_at is shared by every symbol of a poll, so only the tail
        // can collide with it.
        if series.last().is_some_and(|last| last.time == point.time) {
            return series.to_vec();
        }
        let mut next = Vec::with_capacity(series.len() + 1);
        next.extend_from_slice(series);
        next.push(point);
        evict_oldest(&mut next, retention);
        next
    }
}
