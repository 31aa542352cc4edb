// Line chart adapter: `{time, value}` per named series
use super::{ChartKind, ChartPoint};
use crate::config::theme::ThemePalette;
use shared::models::ScalarPoint;

impl ChartPoint for ScalarPoint {
    const KIND: ChartKind = ChartKind::Line;

    fn colors(palette: &ThemePalette, names: &[String]) -> Vec<String> {
        (0..names.len()).map(|i| palette.line_color(i).to_string()).collect()
    }
}
