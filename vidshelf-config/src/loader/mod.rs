pub mod error;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::PlayerConfig;
use crate::util::{non_blank, parse_bool};
use crate::validation::validate;

use self::error::ConfigLoadError;

pub const CONFIG_PATH_VAR: &str = "VIDSHELF_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "VIDSHELF_CONFIG_JSON";
pub const AUTOPLAY_VAR: &str = "VIDSHELF_AUTOPLAY";

const DOTENV_FILE: &str = ".env";

const DEFAULT_FILES: &[&str] = &[
    "vidshelf.toml",
    "vidshelf.json",
    "config/vidshelf.toml",
    "config/vidshelf.json",
];

/// Source that produced the player configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// A validated configuration and where it came from.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: PlayerConfig,
    pub source: ConfigSource,
    /// Set when `VIDSHELF_AUTOPLAY` replaced the layer's autoplay flag.
    pub autoplay_overridden: bool,
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Resolves [`PlayerConfig`] from the environment and the filesystem.
///
/// The environment lookup and the directory searched for default files are
/// injectable so tests never touch process state. Values read from a `.env`
/// file under the root only apply to keys the environment does not set.
pub struct ConfigLoader {
    env: EnvLookup,
    dotenv: HashMap<String, String>,
    root: PathBuf,
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("root", &self.root)
            .field("dotenv_keys", &self.dotenv.len())
            .finish_non_exhaustive()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader backed by the process environment and the working directory.
    pub fn new() -> Self {
        Self {
            env: Box::new(|key| std::env::var(key).ok()),
            dotenv: HashMap::new(),
            root: PathBuf::from("."),
        }
    }

    /// Like [`ConfigLoader::new`], with the working directory's `.env` file
    /// layered under the process environment.
    pub fn from_process_env() -> Self {
        Self::new().with_dotenv()
    }

    /// Read `.env` from the root directory. Call after [`ConfigLoader::with_root`].
    ///
    /// A missing file is not an error; unreadable files and malformed lines
    /// are logged and skipped.
    pub fn with_dotenv(mut self) -> Self {
        let path = self.root.join(DOTENV_FILE);
        let entries = match dotenvy::from_path_iter(&path) {
            Ok(entries) => entries,
            Err(err) if err.not_found() => return self,
            Err(err) => {
                log::warn!("Ignoring unreadable {}: {err}", path.display());
                return self;
            }
        };

        for entry in entries {
            match entry {
                Ok((key, value)) => {
                    self.dotenv.insert(key, value);
                }
                Err(err) => {
                    log::warn!("Skipping malformed line in {}: {err}", path.display())
                }
            }
        }
        log::debug!(
            "Loaded {} variables from {}",
            self.dotenv.len(),
            path.display()
        );
        self
    }

    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(env);
        self
    }

    /// Directory searched for the default config files.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Evaluation order:
    /// 1) `$VIDSHELF_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$VIDSHELF_CONFIG_JSON` (inline JSON),
    /// 3) the first default file that exists,
    /// 4) defaults.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let (mut config, source) = self.resolve_layer()?;

        let autoplay_overridden = match non_blank(self.var(AUTOPLAY_VAR)) {
            Some(raw) => {
                config.autoplay_enabled = parse_bool(&raw).ok_or_else(|| {
                    ConfigLoadError::InvalidBool {
                        var: AUTOPLAY_VAR,
                        value: raw.clone(),
                    }
                })?;
                true
            }
            None => false,
        };

        validate(&config)?;
        log::debug!("Player configuration resolved from {source:?}");

        Ok(ConfigLoad {
            config,
            source,
            autoplay_overridden,
        })
    }

    fn var(&self, key: &str) -> Option<String> {
        (self.env)(key).or_else(|| self.dotenv.get(key).cloned())
    }

    fn resolve_layer(
        &self,
    ) -> Result<(PlayerConfig, ConfigSource), ConfigLoadError> {
        if let Some(raw) = non_blank(self.var(CONFIG_PATH_VAR)) {
            let path = PathBuf::from(raw.trim());
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = non_blank(self.var(CONFIG_JSON_VAR)) {
            let config = parse_json(&raw, CONFIG_JSON_VAR)?;
            return Ok((config, ConfigSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((PlayerConfig::default(), ConfigSource::Default))
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        DEFAULT_FILES
            .iter()
            .map(|candidate| self.root.join(candidate))
            .find(|path| path.is_file())
    }
}

/// Read a config file, picking the format from its extension.
pub fn load_from_file(path: &Path) -> Result<PlayerConfig, ConfigLoadError> {
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let origin = path.display().to_string();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&contents, &origin),
        Some("toml") | Some("tml") => {
            toml::from_str(&contents)
                .map_err(|source| ConfigLoadError::Toml { origin, source })
        }
        _ => parse_from_str(&contents, &origin),
    }
}

/// Try TOML first, then JSON.
pub fn parse_from_str(
    contents: &str,
    origin: &str,
) -> Result<PlayerConfig, ConfigLoadError> {
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            ConfigLoadError::Unrecognized {
                origin: origin.to_string(),
                toml: toml_err.to_string(),
                json: json_err.to_string(),
            }
        })
    })
}

pub fn parse_json(
    raw: &str,
    origin: &str,
) -> Result<PlayerConfig, ConfigLoadError> {
    serde_json::from_str(raw).map_err(|source| ConfigLoadError::Json {
        origin: origin.to_string(),
        source,
    })
}
