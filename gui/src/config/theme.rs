// Theme specific configurations (chart colors)
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalette {
    pub background: String,
    pub foreground: String,
    pub grid: String,
    pub candle_upward: String,
    pub candle_downward: String,
    /// Line colors, assigned to series in order and reused when exhausted.
    pub lines: Vec<String>,
}

impl ThemePalette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::default_dark(),
            Theme::Light => Self::default_light(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#ffffff".to_string(),
            grid: "#333".to_string(),
            candle_upward: "#00B746".to_string(),
            candle_downward: "#EF403C".to_string(),
            lines: vec!["#26a69a".to_string(), "#ef5350".to_string()],
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#000000".to_string(),
            grid: "#e0e0e0".to_string(),
            candle_upward: "#4caf50".to_string(),
            candle_downward: "#f44336".to_string(),
            lines: vec!["#009688".to_string(), "#f44336".to_string()],
        }
    }

    pub fn line_color(&self, index: usize) -> &str {
        if self.lines.is_empty() {
            return &self.foreground;
        }
        &self.lines[index % self.lines.len()]
    }
}
