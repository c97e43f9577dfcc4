use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use vidshelf_player::app::{self, AppConfig, Cli};

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("vidshelf_player", LevelFilter::Debug)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let config = AppConfig::from_environment(&cli)
        .context("failed to load player configuration")?;

    let report = app::run(config).await?;
    log::info!(
        "Session finished after {} steps: peak {} playing, {} blocked starts, ending with [{}]",
        report.steps,
        report.peak_playing,
        report.blocked_starts,
        report
            .final_playing
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
