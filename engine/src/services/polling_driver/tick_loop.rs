// The polling task itself: timer, in-flight fetches and the single writer of
// the series state.
use super::{Clock, DriverShared, RetryPolicy};
use crate::aggregation::{AggregationEngine, AggregationPolicy};
use crate::data::quote_source::QuoteSource;
use crate::error::EngineError;
use shared::models::{QuoteBatch, SeriesSet};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

struct FetchOutcome {
    tick: u64,
    observed_at: i64,
    result: Result<QuoteBatch, EngineError>,
}

pub(crate) async fn run<A, S>(
    engine: AggregationEngine<A>,
    source: Arc<S>,
    interval: Duration,
    retry_policy: RetryPolicy,
    clock: Clock,
    shared: Arc<DriverShared>,
    publisher: watch::Sender<Arc<SeriesSet<A::Point>>>,
) where
    A: AggregationPolicy,
    S: QuoteSource,
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Fetches may overlap when the source is slower than the interval; they
    // are applied in the order they resolve.
    let mut in_flight: JoinSet<FetchOutcome> = JoinSet::new();
    let mut state = publisher.borrow().clone();
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                tick += 1;
                let source = Arc::clone(&source);
                let id = tick;
                in_flight.spawn(async move {
                    let result = source.fetch().await;
                    FetchOutcome { tick: id, observed_at: clock(), result }
                });
            }
            Some(joined) = in_flight.join_next() => {
                let outcome = match joined {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!(error = %e, "Quote fetch task did not complete");
                        shared.ticks_failed.fetch_add(1, Ordering::SeqCst);
                        continue;
                    }
                };

                let _gate = shared.publish_gate.lock().await;
                if !shared.active.load(Ordering::SeqCst) {
                    break;
                }

                match outcome.result {
                    Ok(batch) => {
                        let next = Arc::new(engine.apply(&state, &batch, outcome.observed_at));
                        state = Arc::clone(&next);
                        publisher.send_replace(next);
                        shared.ticks_applied.fetch_add(1, Ordering::SeqCst);
                        tracing::debug!(
                            tick = outcome.tick,
                            observed_at = %shared::utils::format_timestamp(outcome.observed_at),
                            symbols = batch.len(),
                            "Applied quote batch"
                        );
                    }
                    Err(e) if e.is_recoverable() => {
                        shared.ticks_failed.fetch_add(1, Ordering::SeqCst);
                        tracing::warn!(
                            tick = outcome.tick,
                            error = %e,
                            retry_policy = ?retry_policy,
                            "Quote fetch failed, state left unchanged until the next tick"
                        );
                    }
                    Err(e) => {
                        // Not a transient fault; later ticks will most likely fail the same way.
                        shared.ticks_failed.fetch_add(1, Ordering::SeqCst);
                        tracing::error!(
                            tick = outcome.tick,
                            error = %e,
                            retry_policy = ?retry_policy,
                            "Quote source failed with an unrecoverable error, state left unchanged"
                        );
                    }
                }
            }
        }
    }
}
