// Candlestick chart adapter: `{x, y: [o, h, l, c]}` per named series
use super::{ChartKind, ChartPoint};
use crate::config::theme::ThemePalette;
use shared::models::Candle;

impl ChartPoint for Candle {
    const KIND: ChartKind = ChartKind::Candlestick;

    // Candlestick surfaces color by direction, not by series.
    fn colors(palette: &ThemePalette, _names: &[String]) -> Vec<String> {
        vec![palette.candle_upward.clone(), palette.candle_downward.clone()]
    }
}
