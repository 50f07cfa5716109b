//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::HealthTcxConfig;
use crate::domain::errors::HealthTcxError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into HealthTcxConfig
/// 4. Applies environment variable overrides (HEALTHTCX_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File does not exist or cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use healthtcx::config::loader::load_config;
///
/// let config = load_config("healthtcx.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<HealthTcxConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(HealthTcxError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        HealthTcxError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: HealthTcxConfig = toml::from_str(&contents)
        .map_err(|e| HealthTcxError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    finalize(config)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// A present but broken file is still an error. Environment overrides apply
/// in both cases.
///
/// # Errors
///
/// Same as [`load_config`], except that a missing file is not an error.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<HealthTcxConfig> {
    let path = path.as_ref();

    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(
        path = %path.display(),
        "Configuration file not found, using defaults"
    );
    finalize(HealthTcxConfig::default())
}

fn finalize(mut config: HealthTcxConfig) -> Result<HealthTcxConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        HealthTcxError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(HealthTcxError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_flag(name: &str) -> Result<Option<bool>> {
    match std::env::var(name) {
        Ok(val) => val.trim().parse().map(Some).map_err(|_| {
            HealthTcxError::Configuration(format!(
                "{} must be 'true' or 'false', got '{}'",
                name, val
            ))
        }),
        Err(_) => Ok(None),
    }
}

/// Applies environment variable overrides using HEALTHTCX_* prefix
///
/// Environment variables follow the pattern: HEALTHTCX_<SECTION>_<KEY>
/// For example: HEALTHTCX_SOURCE_DEVICE_NAME, HEALTHTCX_OUTPUT_DRY_RUN
fn apply_env_overrides(config: &mut HealthTcxConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("HEALTHTCX_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Source overrides
    if let Ok(val) = std::env::var("HEALTHTCX_SOURCE_DEVICE_NAME") {
        config.source.device_name = val;
    }
    if let Ok(val) = std::env::var("HEALTHTCX_SOURCE_SECONDARY_NAME") {
        config.source.secondary_name = val;
    }
    if let Ok(val) = std::env::var("HEALTHTCX_SOURCE_ARCHIVE_FILE") {
        config.source.archive_file = val;
    }
    if let Ok(val) = std::env::var("HEALTHTCX_SOURCE_ROUTES_DIR") {
        config.source.routes_dir = val;
    }

    // Output overrides
    if let Ok(val) = std::env::var("HEALTHTCX_OUTPUT_DEFAULT_DIR_NAME") {
        config.output.default_dir_name = val;
    }
    if let Ok(val) = std::env::var("HEALTHTCX_OUTPUT_NO_HEART_RATE_DIR") {
        config.output.no_heart_rate_dir = val;
    }
    if let Ok(val) = std::env::var("HEALTHTCX_OUTPUT_CREATOR_NAME") {
        config.output.creator_name = val;
    }
    if let Some(flag) = env_flag("HEALTHTCX_OUTPUT_DRY_RUN")? {
        config.output.dry_run = flag;
    }

    // Logging overrides
    if let Some(flag) = env_flag("HEALTHTCX_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = flag;
    }
    if let Ok(val) = std::env::var("HEALTHTCX_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("HEALTHTCX_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("HEALTHTCX_LOADER_TEST_VAR", "Garmin Forerunner");
        let input = "device_name = \"${HEALTHTCX_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "device_name = \"Garmin Forerunner\"\n");
        std::env::remove_var("HEALTHTCX_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("HEALTHTCX_LOADER_MISSING_VAR");
        let input = "device_name = \"${HEALTHTCX_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("HEALTHTCX_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("HEALTHTCX_LOADER_COMMENTED_VAR");
        let input = "# device_name = \"${HEALTHTCX_LOADER_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-healthtcx.toml");
        assert!(matches!(result, Err(HealthTcxError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_missing_file() {
        let config = load_config_or_default("nonexistent-healthtcx.toml").unwrap();
        assert_eq!(config.output.extension, "tcx");
        assert_eq!(config.source.archive_file, "export.xml");
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[source]
device_name = "Apple Watch Ultra"
secondary_name = ""

[output]
default_dir_name = "converted"
creator_name = "Apple Watch Ultra"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.source.device_name, "Apple Watch Ultra");
        assert!(config.source.secondary_name.is_empty());
        assert_eq!(config.output.default_dir_name, "converted");
        assert_eq!(config.output.no_heart_rate_dir, "no_heart_rate");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[logging]\nlocal_rotation = \"weekly\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[output\ndry_run = true\n").unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
