//! Configuration module for Vellum
//!
//! Loads `vellum.toml` from the project root. Every field has a default so
//! a project without a config file still builds.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{VellumError, VellumResult};

/// Site-level metadata rendered into emitted pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: None,
        }
    }
}

fn default_title() -> String {
    "Vellum Site".to_string()
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Content directory, relative to the project root
    #[serde(default = "default_content")]
    pub content: PathBuf,

    /// Output directory, relative to the project root
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Glob patterns excluded from builds, in addition to gitignore rules
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default)]
    pub site: SiteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content: default_content(),
            output: default_output(),
            ignore_patterns: Vec::new(),
            site: SiteConfig::default(),
        }
    }
}

fn default_content() -> PathBuf {
    PathBuf::from("content")
}

fn default_output() -> PathBuf {
    PathBuf::from("public")
}

impl Config {
    /// Load config from a `vellum.toml` file.
    ///
    /// Returns defaults if the file does not exist; parse errors are real
    /// errors so a typo never silently falls back to defaults.
    pub fn load(path: &Path) -> VellumResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| VellumError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
