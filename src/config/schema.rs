//! Configuration schema types
//!
//! Every section has defaults, so an empty (or absent) configuration file
//! reproduces the converter's stock behaviour.

use serde::{Deserialize, Serialize};

/// Main HealthTCX configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthTcxConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Which archive entries are converted and where their files live
    #[serde(default)]
    pub source: SourceConfig,

    /// Output layout and document settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HealthTcxConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.source.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Source archive configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Substring of `sourceName` identifying the watch
    #[serde(default = "default_device_name")]
    pub device_name: String,

    /// Second accepted `sourceName` substring (empty disables it)
    #[serde(default = "default_secondary_name")]
    pub secondary_name: String,

    /// Archive file name inside the export directory
    #[serde(default = "default_archive_file")]
    pub archive_file: String,

    /// Route directory name inside the export directory
    #[serde(default = "default_routes_dir")]
    pub routes_dir: String,

    /// Prefix a `FileReference` path must carry to be resolved
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,
}

impl SourceConfig {
    /// Whether an archive entry's `sourceName` belongs to a converted device
    ///
    /// # Examples
    ///
    /// ```
    /// use healthtcx::config::SourceConfig;
    ///
    /// let source = SourceConfig::default();
    /// assert!(source.matches_source("Jane's Apple Watch"));
    /// assert!(!source.matches_source("Strava"));
    /// assert!(!source.matches_source(""));
    /// ```
    pub fn matches_source(&self, source_name: &str) -> bool {
        source_name.contains(self.device_name.as_str())
            || (!self.secondary_name.is_empty()
                && source_name.contains(self.secondary_name.as_str()))
    }

    fn validate(&self) -> Result<(), String> {
        if self.device_name.trim().is_empty() {
            return Err("source.device_name cannot be empty".to_string());
        }
        if self.archive_file.trim().is_empty() {
            return Err("source.archive_file cannot be empty".to_string());
        }
        if self.routes_dir.trim().is_empty() {
            return Err("source.routes_dir cannot be empty".to_string());
        }
        if !self.route_prefix.starts_with('/') {
            return Err(format!(
                "source.route_prefix '{}' must start with '/'",
                self.route_prefix
            ));
        }
        Ok(())
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            device_name: default_device_name(),
            secondary_name: default_secondary_name(),
            archive_file: default_archive_file(),
            routes_dir: default_routes_dir(),
            route_prefix: default_route_prefix(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory name used when `--output` is not given
    #[serde(default = "default_output_dir_name")]
    pub default_dir_name: String,

    /// Sub-directory for workouts without heart-rate data
    #[serde(default = "default_no_heart_rate_dir")]
    pub no_heart_rate_dir: String,

    /// Output file extension
    #[serde(default = "default_extension")]
    pub extension: String,

    /// `Creator/Name` written into every document
    #[serde(default = "default_creator_name")]
    pub creator_name: String,

    /// Build documents without writing them
    #[serde(default)]
    pub dry_run: bool,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_dir_name.trim().is_empty() {
            return Err("output.default_dir_name cannot be empty".to_string());
        }
        if self.no_heart_rate_dir.trim().is_empty() {
            return Err("output.no_heart_rate_dir cannot be empty".to_string());
        }
        if self.no_heart_rate_dir.contains(['/', '\\']) {
            return Err(format!(
                "output.no_heart_rate_dir '{}' must be a single directory name",
                self.no_heart_rate_dir
            ));
        }
        if self.extension.trim().is_empty() || self.extension.starts_with('.') {
            return Err(format!(
                "Invalid output.extension '{}'. Use a bare extension such as 'tcx'",
                self.extension
            ));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_dir_name: default_output_dir_name(),
            no_heart_rate_dir: default_no_heart_rate_dir(),
            extension: default_extension(),
            creator_name: default_creator_name(),
            dry_run: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_device_name() -> String {
    "Apple Watch".to_string()
}

fn default_secondary_name() -> String {
    "Bharat".to_string()
}

fn default_archive_file() -> String {
    "export.xml".to_string()
}

fn default_routes_dir() -> String {
    "workout-routes".to_string()
}

fn default_route_prefix() -> String {
    "/workout-routes/".to_string()
}

fn default_output_dir_name() -> String {
    "tcx_files".to_string()
}

fn default_no_heart_rate_dir() -> String {
    "no_heart_rate".to_string()
}

fn default_extension() -> String {
    "tcx".to_string()
}

fn default_creator_name() -> String {
    "Apple Watch".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
