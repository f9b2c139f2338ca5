//! Persisted display settings — a flat key/value record merged with
//! defaults on load.
//!
//! Settings change only through an explicit commit; partial application is
//! impossible because the whole record is swapped at once and every
//! dependent view re-derives from it.

use crate::types::Dialect;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which identifier convention feeds the synthesized signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingConvention {
    /// Raw `UPPER_SNAKE` identifiers (or the bare hash).
    #[default]
    Raw,
    /// Capitalized-word form, preferring the alternate name when present.
    Alternate,
}

impl FromStr for NamingConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(NamingConvention::Raw),
            "alternate" | "alt" => Ok(NamingConvention::Alternate),
            other => Err(format!(
                "unknown naming convention: {}. Use raw or alternate",
                other
            )),
        }
    }
}

/// Process-wide, user-controlled presentation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub naming: NamingConvention,
    pub dialect: Dialect,
    /// Theme keys are persisted for the presentation layer; nothing in the
    /// engine interprets them.
    pub color_scheme: String,
    pub code_theme: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            naming: NamingConvention::default(),
            dialect: Dialect::default(),
            color_scheme: "dark".to_string(),
            code_theme: "vs-dark".to_string(),
        }
    }
}

impl DisplaySettings {
    /// Load from `path`. Missing file, missing keys, and unknown keys all
    /// fall back to defaults; a malformed record is reported and replaced
    /// by the defaults rather than treated as fatal.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return DisplaySettings::default(),
        };
        match serde_json::from_str(&text) {
            Ok(settings) => settings,
            Err(err) => {
                eprintln!("warning: ignoring malformed settings {}: {}", path.display(), err);
                DisplaySettings::default()
            }
        }
    }

    /// Persist as a flat JSON record, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
            }
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Default storage location: `$NATVIEW_SETTINGS` when set, otherwise a
    /// fixed key under the user's config directory.
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os("NATVIEW_SETTINGS") {
            return PathBuf::from(path);
        }
        match std::env::var_os("HOME") {
            Some(home) => Path::new(&home)
                .join(".config")
                .join("natview")
                .join("settings.json"),
            None => PathBuf::from("natview-settings.json"),
        }
    }
}
