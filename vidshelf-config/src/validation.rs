use crate::loader::error::ConfigLoadError;
use crate::models::PlayerConfig;
use crate::models::script::ScriptStep;

/// Guard rails applied to every loaded configuration.
pub fn validate(config: &PlayerConfig) -> Result<(), ConfigLoadError> {
    let sim = &config.simulation;

    positive("simulation.viewport_height", sim.viewport_height)?;
    positive("simulation.row_height", sim.row_height)?;
    if !sim.row_gap.is_finite() || sim.row_gap < 0.0 {
        return Err(invalid(
            "simulation.row_gap",
            format!("{} must be zero or more", sim.row_gap),
        ));
    }
    if sim.desktop_columns == 0 {
        return Err(invalid(
            "simulation.desktop_columns",
            "at least one column is required".to_string(),
        ));
    }
    if sim.smartphone_columns == 0 {
        return Err(invalid(
            "simulation.smartphone_columns",
            "at least one column is required".to_string(),
        ));
    }

    for step in &config.script {
        match step {
            ScriptStep::ScrollTo { offset } if !offset.is_finite() => {
                return Err(invalid("script", format!("scroll offset {offset}")));
            }
            ScriptStep::ScrollBy { delta } if !delta.is_finite() => {
                return Err(invalid("script", format!("scroll delta {delta}")));
            }
            _ => {}
        }
    }

    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigLoadError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be greater than zero")))
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigLoadError {
    ConfigLoadError::Invalid { field, reason }
}
