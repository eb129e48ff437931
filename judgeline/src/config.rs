use crate::core::{Viewport, TICK_SCALE};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub fps: u32,
    pub height: f32,
    /// Added to the chart's own tick offset.
    pub offset: f32,
    pub rate: f32,
    /// Audio time playback starts from, in seconds.
    pub start_time: f32,
    pub tick_scale: f32,
    pub width: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            height: 720.,
            offset: 0.,
            rate: 1.,
            start_time: 0.,
            tick_scale: TICK_SCALE,
            width: 1280.,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("Cannot read config from {}", path.display()))?;
        serde_yaml::from_str(&text).context("Failed to parse config")
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }
}
