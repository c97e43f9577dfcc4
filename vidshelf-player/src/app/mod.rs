pub mod bootstrap;
pub mod cli;

pub use bootstrap::AppConfig;
pub use cli::Cli;

use anyhow::Context;
use vidshelf_core::catalog::Catalog;
use vidshelf_core::settings::ViewerSettings;

use crate::demo;
use crate::session::{BrowseSession, SessionReport};

/// Load the catalog, open a session and replay the configured script.
pub async fn run(config: AppConfig) -> anyhow::Result<SessionReport> {
    let catalog = load_catalog(&config)?;
    log::info!(
        "Browsing {} items ({} categories), config from {:?}",
        catalog.len(),
        catalog.categories().len(),
        config.source
    );

    let player = config.player;
    let settings = ViewerSettings {
        autoplay_enabled: player.autoplay_enabled,
        device_view: player.device_view,
    };

    let mut session = BrowseSession::new(catalog, settings, player.simulation);
    Ok(session.run_script(&player.script).await)
}

fn load_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    match &config.player.catalog_path {
        Some(path) => Catalog::load(path).with_context(|| {
            format!("failed to load catalog from {}", path.display())
        }),
        None => demo::catalog().context("built-in demo catalog is invalid"),
    }
}
