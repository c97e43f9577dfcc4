//! Configuration for the vidshelf player.
//!
//! Settings are resolved in layers: an explicit file named by
//! `VIDSHELF_CONFIG_PATH`, inline JSON in `VIDSHELF_CONFIG_JSON`, the first
//! default file found next to the working directory, and finally built-in
//! defaults. `VIDSHELF_AUTOPLAY` overrides the autoplay flag of whichever
//! layer won. Every loaded configuration is validated before it is returned.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod util;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, ConfigSource, error::ConfigLoadError};
pub use models::script::ScriptStep;
pub use models::{PlayerConfig, SimulationConfig};
