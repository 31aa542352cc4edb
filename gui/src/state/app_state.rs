// Presentation state of the running front-end: active palette, viewport and
// render bookkeeping. Series data itself lives in the engine's snapshots.
use crate::components::chart::{build_payload, ChartPayload, ChartPoint, RenderSurface};
use crate::components::viewport::Viewport;
use crate::config::theme::ThemePalette;
use crate::config::ChartConfig;
use chrono::{DateTime, Utc};
use shared::models::SeriesSet;

pub struct AppState {
    pub chart: ChartConfig,
    pub palette: ThemePalette,
    pub viewport: Viewport,
    symbols: Vec<String>,
    frames_rendered: u64,
    last_rendered_at: Option<DateTime<Utc>>,
}

impl AppState {
    pub fn new(chart: ChartConfig, symbols: Vec<String>) -> Self {
        Self {
            palette: ThemePalette::for_theme(chart.theme),
            viewport: Viewport::new(chart.width, chart.height),
            chart,
            symbols,
            frames_rendered: 0,
            last_rendered_at: None,
        }
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_rendered_at(&self) -> Option<DateTime<Utc>> {
        self.last_rendered_at
    }

    pub fn payload_for<P: ChartPoint>(&self, snapshot: &SeriesSet<P>) -> ChartPayload<P> {
        let (width, height) = self.viewport.size();
        let mut payload = build_payload(snapshot, &self.symbols, &self.chart, &self.palette);
        payload.options.width = width;
        payload.options.height = height;
        payload
    }

    /// Adapts a snapshot and hands it to the surface.
    pub fn present<P: ChartPoint, R: RenderSurface>(&mut self, snapshot: &SeriesSet<P>, surface: &mut R) -> anyhow::Result<()> {
        let payload = self.payload_for(snapshot);
        surface.render(&payload)?;
        self.frames_rendered += 1;
        self.last_rendered_at = Some(Utc::now());
        Ok(())
    }
}
