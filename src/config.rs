//! Configuration management for the form preview tool.
//!
//! Handles:
//! - Command-line argument parsing
//! - The optional TOML settings file (theme and HTML formatting)

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::render::RenderOptions;
use crate::theme::Theme;

/// Command-line arguments for the form preview tool
#[derive(Debug, Parser)]
#[command(name = "formgen")]
#[command(about = "Render a live HTML form from a JSON form document")]
#[command(version)]
pub struct Args {
    /// JSON form document to render
    pub input: PathBuf,

    /// Where to write the HTML (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Color theme, overrides the settings file
    #[arg(long)]
    pub theme: Option<Theme>,

    /// Write only the form, without the editor pane and page chrome
    #[arg(long)]
    pub fragment: bool,

    /// Re-render whenever the input file changes
    #[arg(long, conflicts_with = "submit")]
    pub watch: bool,

    /// Field value to fill in before submitting, as ID=VALUE
    #[arg(long = "set", value_name = "ID=VALUE", value_parser = parse_assignment)]
    pub values: Vec<(String, String)>,

    /// Validate and submit the form instead of rendering it
    #[arg(long)]
    pub submit: bool,

    /// Settings file (defaults to <config dir>/formgen/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Settings read from the TOML file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub theme: Option<Theme>,
    pub pretty: Option<bool>,
    pub indent: Option<String>,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub theme: Theme,
    pub render: RenderOptions,
    pub fragment: bool,
    pub watch: bool,
    pub values: Vec<(String, String)>,
    pub submit: bool,
    pub log_level: String,
    /// Settings file that was actually read, if any
    pub settings_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let (settings, settings_path) = match &args.config {
            Some(path) => {
                if !path.exists() {
                    bail!("Settings file not found: {}", path.display());
                }
                (load_settings(path)?, Some(path.clone()))
            }
            None => match default_settings_path() {
                Some(path) if path.exists() => (load_settings(&path)?, Some(path)),
                _ => (Settings::default(), None),
            },
        };

        let defaults = RenderOptions::default();
        let render = RenderOptions {
            pretty: settings.pretty.unwrap_or(defaults.pretty),
            indent: settings.indent.unwrap_or(defaults.indent),
        };

        Ok(Config {
            input: args.input,
            output: args.output,
            theme: args.theme.or(settings.theme).unwrap_or_default(),
            render,
            fragment: args.fragment,
            watch: args.watch,
            values: args.values,
            submit: args.submit,
            log_level: args.log_level,
            settings_path,
        })
    }
}

/// Default settings location in the user config directory
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("formgen").join("config.toml"))
}

/// Read and parse a settings file
pub fn load_settings(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings TOML: {}", path.display()))
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((id, value)) if !id.is_empty() => Ok((id.to_string(), value.to_string())),
        _ => Err(format!("Expected ID=VALUE, got '{}'", raw)),
    }
}
