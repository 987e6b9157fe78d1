//! Layered client configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. `dubstage.toml` in the working directory
//! 2. environment (`DUBSTAGE_SERVER_URL`)
//! 3. CLI flags (`--server`, `--voice`, `--review`)
//!
//! # Configuration File Format
//!
//! ```toml
//! [server]
//! url = "http://127.0.0.1:5000"
//!
//! [defaults]
//! voice = "female"
//! review = "direct"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::job::{ReviewMode, SubmissionPrefs, VoicePreference};

pub const CONFIG_FILE_NAME: &str = "dubstage.toml";
pub const SERVER_URL_ENV: &str = "DUBSTAGE_SERVER_URL";
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsSection {
    #[serde(default)]
    pub voice: Option<VoicePreference>,
    #[serde(default)]
    pub review: Option<ReviewMode>,
}

/// On-disk shape of `dubstage.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DubstageToml {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub defaults: DefaultsSection,
}

impl DubstageToml {
    /// Load the config file from `dir`, or defaults when it doesn't exist.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid TOML in {}", path.display()))
    }

    /// Write a commented starter config file. Errors if one already exists.
    pub fn init(dir: &Path) -> Result<std::path::PathBuf> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            anyhow::bail!("{} already exists", path.display());
        }
        let starter = format!(
            "# Dubstage client configuration\n\
             \n\
             [server]\n\
             url = \"{DEFAULT_SERVER_URL}\"\n\
             \n\
             [defaults]\n\
             # Synthesis voice: \"female\" or \"male\"\n\
             voice = \"female\"\n\
             # \"direct\" skips the edit checkpoint, \"review\" pauses for it\n\
             review = \"direct\"\n"
        );
        std::fs::write(&path, starter)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub prefs: SubmissionPrefs,
    pub verbose: bool,
}

impl ClientConfig {
    /// Layer file, environment, and CLI values.
    pub fn resolve(
        file: &DubstageToml,
        cli_server: Option<&str>,
        cli_voice: Option<VoicePreference>,
        cli_review: Option<ReviewMode>,
        verbose: bool,
    ) -> Self {
        let server_url = cli_server
            .map(str::to_string)
            .or_else(|| std::env::var(SERVER_URL_ENV).ok())
            .or_else(|| file.server.url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let prefs = SubmissionPrefs {
            voice: cli_voice.or(file.defaults.voice).unwrap_or_default(),
            mode: cli_review.or(file.defaults.review).unwrap_or_default(),
        };

        Self {
            server_url,
            prefs,
            verbose,
        }
    }
}
