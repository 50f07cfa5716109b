//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the HealthTCX configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Unlike `convert`, a missing file is reported as an error here.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Device: {}", config.source.device_name);
        if config.source.secondary_name.is_empty() {
            println!("  Secondary Source: (disabled)");
        } else {
            println!("  Secondary Source: {}", config.source.secondary_name);
        }
        println!("  Archive File: {}", config.source.archive_file);
        println!("  Routes Directory: {}", config.source.routes_dir);
        println!("  Output Directory: {}", config.output.default_dir_name);
        println!(
            "  No Heart Rate Directory: {}",
            config.output.no_heart_rate_dir
        );
        println!("  Creator Name: {}", config.output.creator_name);
        println!("  Dry Run: {}", config.output.dry_run);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}
