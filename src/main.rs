use std::fs::OpenOptions;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};

use azan_clock::cli::args::{Cli, Commands};
use azan_clock::cli::handlers;
use azan_clock::config::AppConfig;
use azan_clock::tui;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so its log goes to a file.
    init_logging(cli.command.is_none())?;

    let mut config = AppConfig::load().context("Loading config")?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Some(Commands::Times) => {
            handlers::handle_times(&config).await?;
        }
        Some(Commands::Config { init }) => {
            handlers::handle_config(&config, init)?;
        }
        // No subcommand → launch TUI
        None => {
            let fetcher = handlers::build_fetcher(&config)?;
            tui::app::run(config, fetcher).await?;
        }
    }

    Ok(())
}

fn init_logging(to_file: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(if to_file {
        "info"
    } else {
        "warn"
    }));

    if to_file {
        AppConfig::ensure_data_dir()?;
        let path = AppConfig::log_path()?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Opening log file {:?}", path))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
