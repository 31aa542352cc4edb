// Chart payloads handed to a rendering surface.
// Purely structural: snapshots are read, never changed.
pub mod candlestick;
pub mod line;

use crate::config::theme::ThemePalette;
use crate::config::ChartConfig;
use serde::Serialize;
use shared::models::SeriesSet;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Candlestick,
    Line,
}

/// A point type that a chart surface knows how to draw.
pub trait ChartPoint: Clone + Serialize + Send + Sync + 'static {
    const KIND: ChartKind;

    /// Colors for the surface, given the series names in display order.
    fn colors(palette: &ThemePalette, names: &[String]) -> Vec<String>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries<P> {
    pub name: String,
    pub data: Vec<P>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub foreground: String,
    pub grid: String,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload<P> {
    pub kind: ChartKind,
    pub options: ChartOptions,
    pub series: Vec<ChartSeries<P>>,
}

/// One named series per configured symbol, in configuration order. Symbols
/// missing from the snapshot come out as empty series.
pub fn series_for<P: ChartPoint>(snapshot: &SeriesSet<P>, symbols: &[String]) -> Vec<ChartSeries<P>> {
    symbols
        .iter()
        .map(|symbol| ChartSeries {
            name: symbol.clone(),
            data: snapshot.get(symbol).map(<[P]>::to_vec).unwrap_or_default(),
        })
        .collect()
}

pub fn build_payload<P: ChartPoint>(
    snapshot: &SeriesSet<P>,
    symbols: &[String],
    chart: &ChartConfig,
    palette: &ThemePalette,
) -> ChartPayload<P> {
    ChartPayload {
        kind: P::KIND,
        options: ChartOptions {
            title: chart.title.clone(),
            width: chart.width,
            height: chart.height,
            background: palette.background.clone(),
            foreground: palette.foreground.clone(),
            grid: palette.grid.clone(),
            colors: P::colors(palette, symbols),
        },
        series: series_for(snapshot, symbols),
    }
}

/// Where chart payloads end up.
pub trait RenderSurface {
    fn render<P: ChartPoint>(&mut self, payload: &ChartPayload<P>) -> anyhow::Result<()>;

    fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()>;
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum SurfaceEvent<'a, P> {
    Render(&'a ChartPayload<P>),
    Resize { width: u32, height: u32 },
}

/// Writes one JSON document per event, newline separated.
pub struct JsonLinesSurface<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<P: Serialize>(&mut self, event: &SurfaceEvent<'_, P>) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> RenderSurface for JsonLinesSurface<W> {
    fn render<P: ChartPoint>(&mut self, payload: &ChartPayload<P>) -> anyhow::Result<()> {
        self.emit(&SurfaceEvent::Render(payload))
    }

    fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        self.emit::<()>(&SurfaceEvent::Resize { width, height })
    }
}
