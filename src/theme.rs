//! Light/dark theme.
//!
//! The theme is a plain value handed to rendering; nothing reads it from
//! global state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Colors used by the rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
    pub surface: &'static str,
    pub border: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub error: &'static str,
}

const LIGHT: Palette = Palette {
    background: "#f9f9f9",
    foreground: "black",
    surface: "white",
    border: "#ccc",
    muted: "#555",
    accent: "#007BFF",
    error: "red",
};

const DARK: Palette = Palette {
    background: "black",
    foreground: "white",
    surface: "#1e1e1e",
    border: "#444",
    muted: "#aaa",
    accent: "#3d8bfd",
    error: "#ff6b6b",
};

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("Unknown theme '{}' (expected 'light' or 'dark')", other)),
        }
    }
}
