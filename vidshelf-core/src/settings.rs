use serde::{Deserialize, Serialize};

/// Layout the grid is rendered for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceView {
    #[default]
    Desktop,
    Smartphone,
}

impl std::fmt::Display for DeviceView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceView::Desktop => f.write_str("desktop"),
            DeviceView::Smartphone => f.write_str("smartphone"),
        }
    }
}

/// Viewer preferences from the settings popover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub autoplay_enabled: bool,
    pub device_view: DeviceView,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            autoplay_enabled: true,
            device_view: DeviceView::default(),
        }
    }
}

impl ViewerSettings {
    /// Flip autoplay and return the new value.
    pub fn toggle_autoplay(&mut self) -> bool {
        self.autoplay_enabled = !self.autoplay_enabled;
        self.autoplay_enabled
    }

    pub fn set_device_view(&mut self, view: DeviceView) {
        self.device_view = view;
    }
}
