use serde::{Deserialize, Serialize};
use vidshelf_core::catalog::Section;
use vidshelf_core::settings::DeviceView;
use vidshelf_model::MediaItemId;

/// One viewer action in a scripted browsing session.
///
/// In TOML a step reads `{ action = "scroll_by", delta = 480.0 }`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    /// Pick a sidebar entry: `home`, `playlist` or `category:<key>`.
    Section { section: Section },
    Search { query: String },
    ToggleAutoplay,
    SetAutoplay { enabled: bool },
    DeviceView { view: DeviceView },
    TogglePlaylist { id: MediaItemId },
    ScrollTo { offset: f32 },
    ScrollBy { delta: f32 },
    Select { id: MediaItemId },
    /// Let pending start requests settle.
    Wait { ms: u64 },
}

/// A short tour of the demo catalog.
pub fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::Wait { ms: 100 },
        ScriptStep::ScrollBy { delta: 480.0 },
        ScriptStep::Wait { ms: 100 },
        ScriptStep::ToggleAutoplay,
        ScriptStep::ToggleAutoplay,
        ScriptStep::Wait { ms: 100 },
        ScriptStep::Section {
            section: Section::category("nature"),
        },
        ScriptStep::Wait { ms: 100 },
        ScriptStep::DeviceView {
            view: DeviceView::Smartphone,
        },
        ScriptStep::Wait { ms: 100 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Script {
        steps: Vec<ScriptStep>,
    }

    #[test]
    fn parses_tagged_steps_from_toml() {
        let raw = r#"
            steps = [
              { action = "section", section = "category:travel" },
              { action = "search", query = "harbor" },
              { action = "toggle_autoplay" },
              { action = "device_view", view = "smartphone" },
              { action = "toggle_playlist", id = "v3" },
              { action = "scroll_by", delta = -120.5 },
              { action = "wait", ms = 250 },
            ]
        "#;

        let script: Script = toml::from_str(raw).expect("valid script");

        assert_eq!(
            script.steps[0],
            ScriptStep::Section {
                section: Section::category("travel")
            }
        );
        assert_eq!(script.steps[2], ScriptStep::ToggleAutoplay);
        assert_eq!(
            script.steps[3],
            ScriptStep::DeviceView {
                view: DeviceView::Smartphone
            }
        );
        assert_eq!(script.steps[5], ScriptStep::ScrollBy { delta: -120.5 });
        assert_eq!(script.steps.len(), 7);
    }

    #[test]
    fn rejects_unknown_sections() {
        let raw = r#"{ "action": "section", "section": "settings" }"#;
        assert!(serde_json::from_str::<ScriptStep>(raw).is_err());
    }
}
