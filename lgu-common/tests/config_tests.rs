//! Configuration resolution tests
//!
//! Store location comes only from DATABASE_URL; LGU_CONFIG optionally names a
//! TOML settings file.
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.

use lgu_common::config::{
    load_check_config, load_settings, resolve_database_url, CheckSettings, CONFIG_PATH_ENV,
    DATABASE_URL_ENV,
};
use lgu_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
#[serial]
fn test_missing_database_url_is_config_error() {
    env::remove_var(DATABASE_URL_ENV);

    let err = resolve_database_url(DATABASE_URL_ENV).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("DATABASE_URL is not set"));
}

#[test]
#[serial]
fn test_empty_database_url_is_config_error() {
    env::set_var(DATABASE_URL_ENV, "   ");

    let err = resolve_database_url(DATABASE_URL_ENV).unwrap_err();
    assert!(err.to_string().contains("DATABASE_URL is empty"));

    env::remove_var(DATABASE_URL_ENV);
}

#[test]
#[serial]
fn test_database_url_taken_verbatim_from_env() {
    env::set_var(DATABASE_URL_ENV, "file:data/lugarden.test.db");
    env::remove_var(CONFIG_PATH_ENV);

    let config = load_check_config().unwrap();
    assert_eq!(config.database_url, "file:data/lugarden.test.db");
    assert_eq!(config.settings, CheckSettings::default());

    env::remove_var(DATABASE_URL_ENV);
}

#[test]
#[serial]
fn test_settings_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "mapping_table = \"MaoxiaodouMapping\"").unwrap();
    writeln!(file, "preview_rows = 2").unwrap();
    env::set_var(CONFIG_PATH_ENV, file.path());

    let settings = load_settings().unwrap();
    assert_eq!(settings.mapping_table, "MaoxiaodouMapping");
    assert_eq!(settings.preview_rows, 2);
    assert_eq!(settings.poem_table, "ZhouPoem");

    env::remove_var(CONFIG_PATH_ENV);
}

#[test]
#[serial]
fn test_missing_settings_file_is_config_error() {
    env::set_var(CONFIG_PATH_ENV, "/nonexistent/lgu.toml");

    let err = load_settings().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("/nonexistent/lgu.toml"));

    env::remove_var(CONFIG_PATH_ENV);
}

#[test]
#[serial]
fn test_unsafe_table_name_in_file_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "poem_table = \"ZhouPoem WHERE 1=1\"").unwrap();
    env::set_var(CONFIG_PATH_ENV, file.path());

    let err = load_settings().unwrap_err();
    assert!(err.to_string().contains("Invalid table name"));

    env::remove_var(CONFIG_PATH_ENV);
}
