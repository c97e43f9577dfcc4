use vidshelf_config::loader::CONFIG_PATH_VAR;
use vidshelf_config::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigSource, PlayerConfig};

use super::cli::Cli;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub player: PlayerConfig,
    pub source: ConfigSource,
}

impl AppConfig {
    pub fn new(player: PlayerConfig) -> Self {
        Self {
            player,
            source: ConfigSource::Default,
        }
    }

    /// Resolve configuration from `.env`, the environment and default files,
    /// then apply command line overrides.
    pub fn from_environment(cli: &Cli) -> Result<Self, ConfigLoadError> {
        let loader = ConfigLoader::from_process_env();
        let loader = match &cli.config {
            Some(path) => {
                let path = path.display().to_string();
                loader.with_env(move |key| {
                    if key == CONFIG_PATH_VAR {
                        Some(path.clone())
                    } else {
                        std::env::var(key).ok()
                    }
                })
            }
            None => loader,
        };

        Ok(Self::from_load(loader.load()?).with_overrides(cli))
    }

    pub fn from_load(load: ConfigLoad) -> Self {
        if load.autoplay_overridden {
            log::debug!("Autoplay set from the environment");
        }
        Self {
            player: load.config,
            source: load.source,
        }
    }

    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(catalog) = &cli.catalog {
            self.player.catalog_path = Some(catalog.clone());
        }
        if cli.no_autoplay {
            self.player.autoplay_enabled = false;
        }
        self
    }
}
