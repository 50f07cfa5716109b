//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for HealthTCX using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// HealthTCX - Apple Health workouts to TCX converter
#[derive(Parser, Debug)]
#[command(name = "healthtcx")]
#[command(version, about, long_about = None)]
#[command(author = "HealthTCX Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults apply if it does not exist)
    #[arg(short, long, default_value = "healthtcx.toml", env = "HEALTHTCX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "HEALTHTCX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert the workouts of an unpacked Health export to TCX files
    Convert(commands::convert::ConvertArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_convert() {
        let cli = Cli::parse_from(["healthtcx", "convert", "apple_health_export"]);
        assert_eq!(cli.config, "healthtcx.toml");
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.export_dir, PathBuf::from("apple_health_export"));
                assert!(args.output.is_none());
                assert!(args.activity.is_none());
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_convert_options() {
        let cli = Cli::parse_from([
            "healthtcx",
            "convert",
            "export",
            "-o",
            "out",
            "-a",
            "running",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Convert(args) => {
                assert_eq!(args.output, Some(PathBuf::from("out")));
                assert_eq!(args.activity.as_deref(), Some("running"));
                assert!(args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_convert_requires_export_dir() {
        assert!(Cli::try_parse_from(["healthtcx", "convert"]).is_err());
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["healthtcx", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["healthtcx", "--log-level", "debug", "convert", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["healthtcx", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["healthtcx", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
