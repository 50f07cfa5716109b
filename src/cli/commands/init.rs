//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "healthtcx.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing HealthTCX configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} if your watch is not named \"Apple Watch\"", self.output);
                println!("  2. Validate configuration: healthtcx validate-config");
                println!("  3. Convert: healthtcx convert path/to/apple_health_export");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate a configuration file listing every setting with its default
    pub fn generate_config() -> String {
        r#"# HealthTCX Configuration File
# Apple Health workouts to TCX converter
#
# Every setting below shows its default; delete what you do not change.
# Values may reference environment variables as ${VAR_NAME}, and any key can
# be overridden with HEALTHTCX_<SECTION>_<KEY>.

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

[source]
# Workouts are converted when their sourceName contains either of these
device_name = "Apple Watch"
# Set to "" to accept only device_name
secondary_name = "Bharat"

# Layout of the unpacked export directory
archive_file = "export.xml"
routes_dir = "workout-routes"
route_prefix = "/workout-routes/"

[output]
# Used when convert is run without --output, relative to the export directory
default_dir_name = "tcx_files"

# Sub-directory for workouts without heart-rate data
no_heart_rate_dir = "no_heart_rate"

extension = "tcx"

# Creator/Name written into every document
creator_name = "Apple Watch"

# Build documents without writing them
dry_run = false

[logging]
# JSON file logging in addition to the console
local_enabled = false
local_path = "logs"
# daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }
}
