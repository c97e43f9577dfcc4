pub mod script;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vidshelf_core::settings::DeviceView;
use vidshelf_model::MediaItemId;

use self::script::{ScriptStep, default_script};

/// Top-level player settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Whether previews start playing on their own once scrolled into view.
    /// Viewers can still toggle this from the settings step of a script.
    pub autoplay_enabled: bool,
    /// Initial layout; decides how many columns the simulated grid has.
    pub device_view: DeviceView,
    /// JSON catalog to browse. The built-in demo catalog is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    pub simulation: SimulationConfig,
    /// Browsing steps the headless session replays in order.
    pub script: Vec<ScriptStep>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            autoplay_enabled: true,
            device_view: DeviceView::Desktop,
            catalog_path: None,
            simulation: SimulationConfig::default(),
            script: default_script(),
        }
    }
}

/// Geometry and timing of the simulated browser.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Visible height of the scrolling grid, in pixels.
    pub viewport_height: f32,
    /// Height of one card row, in pixels.
    pub row_height: f32,
    /// Vertical space between rows, in pixels.
    pub row_gap: f32,
    pub desktop_columns: usize,
    pub smartphone_columns: usize,
    /// Delay before a simulated start request succeeds.
    pub play_latency_ms: u64,
    /// Items whose previews refuse to play, as if the browser blocked them.
    pub unavailable_items: Vec<MediaItemId>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            viewport_height: 720.0,
            row_height: 240.0,
            row_gap: 16.0,
            desktop_columns: 3,
            smartphone_columns: 1,
            play_latency_ms: 40,
            unavailable_items: Vec::new(),
        }
    }
}

impl SimulationConfig {
    pub fn columns_for(&self, view: DeviceView) -> usize {
        match view {
            DeviceView::Desktop => self.desktop_columns,
            DeviceView::Smartphone => self.smartphone_columns,
        }
    }
}
