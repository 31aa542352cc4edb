// Live feed: runs the polling driver and renders every published snapshot
// until shutdown.
use crate::components::chart::{ChartPoint, RenderSurface};
use crate::state::app_state::AppState;
use engine::{AggregationPolicy, PollingDriver, QuoteSource};
use std::future::Future;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

pub async fn run_feed<A, S, R>(
    driver: PollingDriver<A, S>,
    state: &mut AppState,
    surface: &mut R,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()>
where
    A: AggregationPolicy,
    A::Point: ChartPoint,
    S: QuoteSource,
    R: RenderSurface,
{
    state.viewport.attach(surface)?;

    let handle = driver.start();
    let mut snapshots = WatchStream::from_changes(handle.subscribe());
    tokio::pin!(shutdown);

    let result = loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutdown requested");
                break Ok(());
            }
            next = snapshots.next() => {
                let Some(snapshot) = next else {
                    tracing::warn!("Snapshot channel closed");
                    break Ok(());
                };
                if let Err(e) = state.present(snapshot.as_ref(), surface) {
                    tracing::error!(error = %e, "Failed to render chart payload");
                    break Err(e);
                }
            }
        }
    };

    handle.stop().await;
    tracing::info!(
        frames = state.frames_rendered(),
        last_frame = ?state.last_rendered_at(),
        ticks_applied = handle.ticks_applied(),
        ticks_failed = handle.ticks_failed(),
        "Feed finished"
    );
    result
}
