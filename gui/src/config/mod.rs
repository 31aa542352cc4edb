// Application configuration: tracker settings plus chart presentation
pub mod theme;

use anyhow::Context;
use engine::TrackerSettings;
use serde::Deserialize;
use std::path::Path;
use theme::Theme;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub version: String,
    #[serde(default)]
    pub tracker: TrackerSettings,
    #[serde(default)]
    pub chart: ChartConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub theme: Theme,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            title: "Real-Time Stock Chart".to_string(),
            width: 800,
            height: 350,
            theme: Theme::Dark,
        }
    }
}

impl AppConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: AppConfig = serde_json::from_str(json).context("Failed to parse application config")?;
        config.tracker.validate()?;
        Ok(config)
    }

    /// Loads the config embedded in the binary.
    pub fn load_default() -> anyhow::Result<Self> {
        let config_str = include_str!("../../assets/config/default.json");
        Self::from_json(config_str)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&contents)
    }
}
