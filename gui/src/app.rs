// Application wiring: picks the aggregation policy for the configured mode
// and runs the live feed against the HTTP quote source.
use crate::components::chart::RenderSurface;
use crate::config::AppConfig;
use crate::services::feed::run_feed;
use crate::state::app_state::AppState;
use engine::{AggregationEngine, AggregationPolicy, CandlePolicy, HttpQuoteSource, PollingDriver, ScalarPolicy};
use shared::models::QuoteMode;
use std::future::Future;

pub async fn run<R: RenderSurface>(config: AppConfig, surface: &mut R, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let settings = &config.tracker;
    tracing::info!(
        endpoint = %settings.endpoint,
        mode = ?settings.mode,
        symbols = ?settings.symbols,
        "Starting stock price tracker"
    );

    let mut state = AppState::new(config.chart.clone(), settings.symbols.clone());
    match settings.mode {
        QuoteMode::Candle => run_mode(CandlePolicy, &config, &mut state, surface, shutdown).await,
        QuoteMode::Scalar => run_mode(ScalarPolicy, &config, &mut state, surface, shutdown).await,
    }
}

async fn run_mode<A, R>(
    policy: A,
    config: &AppConfig,
    state: &mut AppState,
    surface: &mut R,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()>
where
    A: AggregationPolicy,
    A::Point: crate::components::chart::ChartPoint,
    R: RenderSurface,
{
    let settings = &config.tracker;
    let engine = AggregationEngine::new(policy, settings.symbols.clone(), settings.retention_window)?;
    let source = HttpQuoteSource::from_settings(settings)?;
    let driver = PollingDriver::new(engine, source, settings.interval())?;
    run_feed(driver, state, surface, shutdown).await
}
