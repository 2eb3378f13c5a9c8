//! Runtime configuration.
//!
//! Everything has a built-in default; an optional TOML file can override any key:
//!
//! ```toml
//! [formatter]
//! program = "/usr/sbin/mkfs.ocfs2"
//! default_label = "shared"
//!
//! [dialog]
//! default_response = "cancel"
//! ```

use crate::format::DialogResponse;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// How the formatter command line is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Formatter executable.
    pub program: String,
    /// Flag that puts the formatter in non-interactive (force) mode.
    pub force_flag: String,
    /// Initial text of the volume label field.
    pub default_label: String,
    /// Log the command instead of running it.
    pub dry_run: bool,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            program: "mkfs.ocfs2".to_string(),
            force_flag: "-x".to_string(),
            default_label: "oracle".to_string(),
            dry_run: false,
        }
    }
}

/// Button roles, captions and the action Enter activates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    pub title: String,
    pub ok_label: String,
    pub cancel_label: String,
    pub default_response: DialogResponse,
    pub error_title: String,
    pub progress_title: String,
    pub progress_message: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            title: "Format".to_string(),
            ok_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
            default_response: DialogResponse::Ok,
            error_title: "Format error".to_string(),
            progress_title: "Format".to_string(),
            progress_message: "Formatting".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub formatter: FormatterConfig,
    pub dialog: DialogConfig,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse(toml_text: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_text).context("invalid configuration TOML")
    }
}
