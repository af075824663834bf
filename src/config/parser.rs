//! Configuration loading: defaults <- .env <- environment <- CLI flags

use super::env::EnvManager;
use super::validation::{validate_config, validate_y_max};
use crate::cli::Cli;
use crate::models::Config;
use crate::types::Result;

/// Builds the effective configuration from all layers
#[derive(Debug, Default)]
pub struct ConfigParser;

impl ConfigParser {
    /// Create a new configuration parser
    pub fn new() -> Self {
        Self
    }

    /// Load and validate the effective configuration
    pub fn load(&self, cli: &Cli) -> Result<Config> {
        let mut config = Config::default();

        // .env file first, then real environment variables on top of it
        let env = EnvManager::load()?;
        env.apply(&mut config)?;

        self.apply_cli(cli, &mut config)?;

        validate_config(&config)?;
        validate_y_max(cli.ymax)?;

        if config.debug {
            if let Some(path) = env.loaded_path() {
                eprintln!("Loaded environment file: {}", path.display());
            }
            let active = env.active_vars();
            if !active.is_empty() {
                eprintln!("Active environment overrides: {}", active.join(", "));
            }
        }

        Ok(config)
    }

    /// Apply command-line overrides, the highest-priority layer
    fn apply_cli(&self, cli: &Cli, config: &mut Config) -> Result<()> {
        if let Some(out_dir) = &cli.out_dir {
            config.out_dir = out_dir.clone();
        }

        if let Some(unit) = &cli.unit {
            config.unit = unit.parse()?;
        }

        if let Some(width) = cli.width {
            config.width = width;
        }

        if let Some(height) = cli.height {
            config.height = height;
        }

        config.enable_color = cli.use_colors();
        config.verbose = cli.verbose;
        config.debug = cli.debug;

        Ok(())
    }
}

/// Load the effective configuration for a parsed command line
pub fn load_config(cli: &Cli) -> Result<Config> {
    ConfigParser::new().load(cli)
}

/// One-line configuration description for verbose output
pub fn display_config_summary(config: &Config) -> String {
    format!(
        "unit={} size={}x{} out_dir={}",
        config.unit,
        config.width,
        config.height,
        config.out_dir.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults_without_flags() {
        let _env = crate::test_support::env_lock();
        let cli = cli(&["dbp", "summary", "results.csv"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.width, crate::defaults::DEFAULT_WIDTH);
        assert_eq!(config.unit, crate::types::TimeUnit::Millis);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = cli(&[
            "dbp",
            "--unit",
            "s",
            "--width",
            "900",
            "--height",
            "500",
            "summary",
            "results.csv",
        ]);
        let _env = crate::test_support::env_lock();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.unit, crate::types::TimeUnit::Seconds);
        assert_eq!(config.width, 900);
        assert_eq!(config.height, 500);
    }

    #[test]
    fn test_bad_unit_rejected() {
        let cli = cli(&["dbp", "--unit", "furlongs", "summary", "results.csv"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_bad_ymax_rejected() {
        let cli = cli(&["dbp", "--ymax=-3", "summary", "results.csv"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_display_config_summary() {
        let config = Config::default();
        let summary = display_config_summary(&config);
        assert!(summary.contains("unit=ms"));
    }
}
