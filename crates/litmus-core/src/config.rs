use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{LitmusError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LitmusConfig {
    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the analysis service when not running embedded.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Run the bundled analyzer in-process on an ephemeral port
    /// instead of talking to an external service.
    #[serde(default = "default_true")]
    pub embedded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Average decision points per function above which complexity
    /// costs a point; half of it is the "moderate" band.
    #[serde(default = "default_complexity_high")]
    pub complexity_high: f64,

    #[serde(default = "default_complexity_moderate")]
    pub complexity_moderate: f64,

    /// Maintainability index bands (0-100 scale).
    #[serde(default = "default_mi_poor")]
    pub maintainability_poor: f64,

    #[serde(default = "default_mi_good")]
    pub maintainability_good: f64,

    /// Comment-to-code ratio bands.
    #[serde(default = "default_comment_low")]
    pub comment_ratio_low: f64,

    #[serde(default = "default_comment_high")]
    pub comment_ratio_high: f64,

    /// Denominator used when displaying the score ("N/3").
    #[serde(default = "default_out_of")]
    pub out_of: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_timeout() -> u64 {
    120
}
fn default_true() -> bool {
    true
}
fn default_complexity_high() -> f64 {
    10.0
}
fn default_complexity_moderate() -> f64 {
    5.0
}
fn default_mi_poor() -> f64 {
    50.0
}
fn default_mi_good() -> f64 {
    70.0
}
fn default_comment_low() -> f64 {
    0.1
}
fn default_comment_high() -> f64 {
    0.2
}
fn default_out_of() -> u32 {
    3
}

impl Default for LitmusConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            embedded: default_true(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            complexity_high: default_complexity_high(),
            complexity_moderate: default_complexity_moderate(),
            maintainability_poor: default_mi_poor(),
            maintainability_good: default_mi_good(),
            comment_ratio_low: default_comment_low(),
            comment_ratio_high: default_comment_high(),
            out_of: default_out_of(),
        }
    }
}

impl LitmusConfig {
    /// Read `~/.config/litmus/config.toml`. A missing file is not an
    /// error: defaults are written there and returned.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            let config = LitmusConfig::default();
            config.save()?;
            return Ok(config);
        }

        let raw = std::fs::read_to_string(&path)
            .map_err(|e| LitmusError::Config(format!("Failed to read config: {e}")))?;
        toml::from_str(&raw)
            .map_err(|e| LitmusError::Config(format!("Failed to parse config: {e}")))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)
            .map_err(|e| LitmusError::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| LitmusError::Config("Could not determine config directory".into()))?;
        Ok(base.join("litmus").join("config.toml"))
    }
}
