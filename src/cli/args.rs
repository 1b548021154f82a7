use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "azan-clock", version, about = "A terminal prayer clock with a live countdown to the next prayer")]
pub struct Cli {
    /// Full URL of the prayer times endpoint (skips origin-based resolution)
    #[arg(long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Origin the endpoint is resolved against, e.g. http://pi.local:8081
    #[arg(long, global = true, value_name = "URL")]
    pub origin: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch once and print today's prayer times with the countdown to the next one
    Times,
    /// Show the config file location and the effective settings
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    /// Command-line flags take precedence over config.toml.
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.endpoint = Some(endpoint.clone());
        }
        if let Some(origin) = &self.origin {
            config.endpoint.origin = origin.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_runs_the_clock() {
        let cli = Cli::try_parse_from(["azan-clock"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_override_config() {
        let cli = Cli::try_parse_from(["azan-clock", "times", "--origin", "http://pi.local:8081"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Times)));

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(
            config.endpoint.resolve().unwrap().as_str(),
            "http://pi.local:8080/azan_time"
        );
    }

    #[test]
    fn endpoint_flag_is_used_verbatim() {
        let cli = Cli::try_parse_from(["azan-clock", "--endpoint", "http://10.0.0.2:9000/t"]).unwrap();
        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.endpoint.resolve().unwrap().as_str(), "http://10.0.0.2:9000/t");
    }

    #[test]
    fn config_init_flag() {
        let cli = Cli::try_parse_from(["azan-clock", "config", "--init"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config { init: true })));
    }
}
