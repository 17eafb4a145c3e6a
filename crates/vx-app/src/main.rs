use anyhow::Result;
use clap::Parser;

pub mod app;
pub mod cli;
pub mod trainer;

fn main() -> Result<()> {
    // 1. Parse CLI
    let cli = cli::Cli::parse();

    // 2. Init logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Load config, fold in CLI overrides
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    // 4. Terminal + app. No speech backend ships by default; the
    //    transcript line stays empty without one.
    let terminal = ratatui::init();
    let mut app = app::App::new(config, None);
    let result = app.run(terminal);

    // 5. Restore the terminal (always, even on error)
    ratatui::restore();

    result
}

/// Load the TOML config, falling back to defaults when the file does
/// not exist.
fn resolve_config(cli: &cli::Cli) -> Result<vx_core::config::TrainerConfig> {
    if cli.config.exists() {
        vx_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "config not found: {}. using defaults.",
            cli.config.display()
        );
        Ok(vx_core::config::TrainerConfig::default())
    }
}
