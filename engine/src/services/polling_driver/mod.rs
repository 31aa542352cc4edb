// engine/src/services/polling_driver/mod.rs
// Fixed-period scheduler that feeds quote batches into the aggregation engine
// and publishes each resulting snapshot.

use crate::aggregation::{AggregationEngine, AggregationPolicy};
use crate::data::quote_source::QuoteSource;
use crate::error::EngineError;
use shared::models::SeriesSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

mod tick_loop;

/// What happens after a failed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// No backoff and no out-of-band retry: the next scheduled tick is the retry.
    #[default]
    NoRetryRelyOnNextTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
    Stopped,
}

/// Clock used to stamp a batch when its fetch resolves (epoch millis).
pub type Clock = fn() -> i64;

pub(crate) struct DriverShared {
    active: AtomicBool,
    // Held while a tick checks `active` and publishes, and by `stop` while it
    // clears `active`.
    publish_gate: Mutex<()>,
    ticks_applied: AtomicU64,
    ticks_failed: AtomicU64,
}

pub struct PollingDriver<A: AggregationPolicy, S: QuoteSource> {
    engine: AggregationEngine<A>,
    source: Arc<S>,
    interval: Duration,
    retry_policy: RetryPolicy,
    clock: Clock,
}

impl<A: AggregationPolicy, S: QuoteSource> PollingDriver<A, S> {
    pub fn new(engine: AggregationEngine<A>, source: S, interval: Duration) -> Result<Self, EngineError> {
        if interval.is_zero() {
            return Err(EngineError::Config("polling interval must be greater than 0".to_string()));
        }
        Ok(PollingDriver {
            engine,
            source: Arc::new(source),
            interval,
            retry_policy: RetryPolicy::default(),
            clock: shared::utils::now_millis,
        })
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn state(&self) -> DriverState {
        DriverState::Idle
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Spawns the polling task on the current tokio runtime. The first tick
    /// fires immediately. The driver is consumed: a stopped handle cannot be
    /// restarted, a new driver has to be built instead.
    pub fn start(self) -> DriverHandle<A::Point> {
        let initial = Arc::new(self.engine.initial_state());
        let (publisher, snapshots) = watch::channel(initial);
        let shared = Arc::new(DriverShared {
            active: AtomicBool::new(true),
            publish_gate: Mutex::new(()),
            ticks_applied: AtomicU64::new(0),
            ticks_failed: AtomicU64::new(0),
        });

        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            mode = ?self.engine.mode(),
            symbols = ?self.engine.symbols(),
            retention = self.engine.retention(),
            "Starting polling driver"
        );

        let task = tokio::spawn(tick_loop::run(
            self.engine,
            self.source,
            self.interval,
            self.retry_policy,
            self.clock,
            Arc::clone(&shared),
            publisher,
        ));

        DriverHandle { shared, snapshots, task }
    }
}

/// Running driver. Dropping the handle stops the driver as well.
pub struct DriverHandle<P> {
    shared: Arc<DriverShared>,
    snapshots: watch::Receiver<Arc<SeriesSet<P>>>,
    task: JoinHandle<()>,
}

impl<P> DriverHandle<P> {
    pub fn state(&self) -> DriverState {
        if self.shared.active.load(Ordering::SeqCst) {
            DriverState::Running
        } else {
            DriverState::Stopped
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<SeriesSet<P>>> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> Arc<SeriesSet<P>> {
        self.snapshots.borrow().clone()
    }

    pub fn ticks_applied(&self) -> u64 {
        self.shared.ticks_applied.load(Ordering::SeqCst)
    }

    pub fn ticks_failed(&self) -> u64 {
        self.shared.ticks_failed.load(Ordering::SeqCst)
    }

    /// Stops polling. Once this returns no further snapshot is published,
    /// including for fetches that were already in flight. Calling it again is
    /// a no-op.
    pub async fn stop(&self) {
        let _gate = self.shared.publish_gate.lock().await;
        if self.shared.active.swap(false, Ordering::SeqCst) {
            tracing::info!(
                applied = self.ticks_applied(),
                failed = self.ticks_failed(),
                "Polling driver stopped"
            );
        }
        self.task.abort();
    }
}

impl<P> Drop for DriverHandle<P> {
    fn drop(&mut self) {
        self.shared.active.store(false, Ordering::SeqCst);
        self.task.abort();
    }
}
