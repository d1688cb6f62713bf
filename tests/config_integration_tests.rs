//! Tests for settings file loading and CLI precedence
use clap::Parser;
use formgen::config::{load_settings, Args, Config, Settings};
use formgen::Theme;
use std::io::Write;

fn settings_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write settings");
    file
}

fn config_from(args: &[&str]) -> anyhow::Result<Config> {
    let mut argv = vec!["formgen", "form.json"];
    argv.extend_from_slice(args);
    Config::from_args(Args::try_parse_from(argv).expect("parse args"))
}

#[test]
fn test_settings_file_is_applied() {
    let file = settings_file("theme = \"dark\"\npretty = false\nindent = \"\\t\"\n");
    let path = file.path().to_str().unwrap();

    let config = config_from(&["--config", path]).expect("create config");

    assert_eq!(config.theme, Theme::Dark);
    assert!(!config.render.pretty);
    assert_eq!(config.render.indent, "\t");
    assert_eq!(config.settings_path.as_deref(), Some(file.path()));
}

#[test]
fn test_cli_theme_overrides_settings() {
    let file = settings_file("theme = \"dark\"\n");
    let path = file.path().to_str().unwrap();

    let config = config_from(&["--config", path, "--theme", "light"]).expect("create config");
    assert_eq!(config.theme, Theme::Light);
    assert!(config.render.pretty, "unset keys keep their defaults");
}

#[test]
fn test_missing_explicit_settings_file_is_an_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = dir.path().join("nope.toml");

    let err = config_from(&["--config", missing.to_str().unwrap()]).unwrap_err();
    assert!(err.to_string().contains("Settings file not found"));
}

#[test]
fn test_malformed_settings_report_the_path() {
    let file = settings_file("theme = \"purple\"\n");

    let err = load_settings(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse settings TOML"));
}

#[test]
fn test_unknown_settings_keys_are_rejected() {
    let file = settings_file("colour = \"dark\"\n");
    assert!(load_settings(file.path()).is_err());
}

#[test]
fn test_empty_settings_file() {
    let file = settings_file("");
    assert_eq!(load_settings(file.path()).expect("load"), Settings::default());
}
