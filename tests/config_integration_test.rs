//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use healthtcx::cli::commands::init::InitArgs;
use healthtcx::config::{load_config, load_config_or_default};
use std::io::Write;
use std::sync::Mutex;
use tempfile::{NamedTempFile, TempDir};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("HEALTHTCX_APPLICATION_LOG_LEVEL");
    std::env::remove_var("HEALTHTCX_SOURCE_DEVICE_NAME");
    std::env::remove_var("HEALTHTCX_OUTPUT_DRY_RUN");
    std::env::remove_var("TEST_HEALTHTCX_CREATOR");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[source]
device_name = "Apple Watch"
secondary_name = ""
archive_file = "export_cda.xml"
routes_dir = "routes"
route_prefix = "/routes/"

[output]
default_dir_name = "garmin"
no_heart_rate_dir = "plain"
extension = "tcx"
creator_name = "Apple Watch Ultra"
dry_run = true

[logging]
local_enabled = true
local_path = "/tmp/healthtcx"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.source.secondary_name, "");
    assert_eq!(config.source.archive_file, "export_cda.xml");
    assert_eq!(config.source.route_prefix, "/routes/");
    assert_eq!(config.output.default_dir_name, "garmin");
    assert_eq!(config.output.no_heart_rate_dir, "plain");
    assert_eq!(config.output.creator_name, "Apple Watch Ultra");
    assert!(config.output.dry_run);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_partial_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
device_name = "Watch"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.source.device_name, "Watch");
    assert_eq!(config.source.secondary_name, "Bharat");
    assert_eq!(config.output.default_dir_name, "tcx_files");
    assert_eq!(config.output.no_heart_rate_dir, "no_heart_rate");
    assert_eq!(config.application.log_level, "info");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_HEALTHTCX_CREATOR", "Substituted Watch");

    let temp_file = write_config(
        r#"
# creator comes from ${TEST_HEALTHTCX_UNSET}
[output]
creator_name = "${TEST_HEALTHTCX_CREATOR}"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.output.creator_name, "Substituted Watch");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[output]
creator_name = "${TEST_HEALTHTCX_CREATOR}"
"#,
    );

    let result = load_config(temp_file.path());
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("TEST_HEALTHTCX_CREATOR"));
}

#[test]
fn test_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("HEALTHTCX_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("HEALTHTCX_SOURCE_DEVICE_NAME", "Galaxy Watch");
    std::env::set_var("HEALTHTCX_OUTPUT_DRY_RUN", "true");

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.source.device_name, "Galaxy Watch");
    assert!(config.output.dry_run);

    cleanup_env_vars();
}

#[test]
fn test_invalid_bool_override_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("HEALTHTCX_OUTPUT_DRY_RUN", "maybe");

    let temp_dir = TempDir::new().unwrap();
    let result = load_config_or_default(temp_dir.path().join("healthtcx.toml"));
    assert!(result.is_err());

    cleanup_env_vars();
}

#[test]
fn test_invalid_values_fail_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    for content in [
        "[application]\nlog_level = \"verbose\"\n",
        "[source]\ndevice_name = \"\"\n",
        "[source]\nroute_prefix = \"workout-routes/\"\n",
        "[output]\nextension = \".tcx\"\n",
        "[output]\nno_heart_rate_dir = \"a/b\"\n",
        "[logging]\nlocal_rotation = \"size\"\n",
    ] {
        let temp_file = write_config(content);
        let result = load_config(temp_file.path());
        assert!(result.is_err(), "expected failure for {content:?}");
    }
}

#[test]
fn test_missing_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("healthtcx.toml");

    assert!(load_config(&path).is_err());

    let config = load_config_or_default(&path).unwrap();
    assert_eq!(config.source.device_name, "Apple Watch");
    assert!(!config.output.dry_run);
}

#[test]
fn test_generated_config_loads() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(&InitArgs::generate_config());
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.source.archive_file, "export.xml");
    assert_eq!(config.output.extension, "tcx");
}
