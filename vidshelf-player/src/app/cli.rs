use std::path::PathBuf;

use clap::Parser;

/// Replay a browsing session against the vidshelf preview grid.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "vidshelf-player", version, about)]
pub struct Cli {
    /// Config file (TOML or JSON). Takes precedence over VIDSHELF_CONFIG_PATH.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Catalog JSON to browse instead of the configured or built-in one.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Start with autoplay disabled regardless of configuration.
    #[arg(long)]
    pub no_autoplay: bool,
}
