// src/config/mod.rs
//! Config loading: classification lists from TOML/JSON plus run settings from env.

pub mod classification;

pub use classification::{CategoriesConfig, CategoryConfig, ClassificationConfig};

use chrono::FixedOffset;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const ENV_CONFIG_PATH: &str = "GOVJOB_CONFIG_PATH";
pub const ENV_MAX_AGE_DAYS: &str = "GOVJOB_MAX_AGE_DAYS";
pub const ENV_OUTPUT_PATH: &str = "GOVJOB_OUTPUT_PATH";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "GOVJOB_FETCH_TIMEOUT_SECS";
pub const ENV_UTC_OFFSET_MINUTES: &str = "GOVJOB_UTC_OFFSET_MINUTES";

pub const DEFAULT_TOML_PATH: &str = "config/classification.toml";
pub const DEFAULT_JSON_PATH: &str = "config/classification.json";
pub const DEFAULT_OUTPUT_PATH: &str = "jobs.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
/// IST.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Load, normalize and validate a config file. Format follows the extension
/// (`.json` → JSON, anything else → TOML).
pub fn load_from(path: &Path) -> Result<ClassificationConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let cfg = parse_config(&content, &ext)?.normalized();
    cfg.validate()?;
    Ok(cfg)
}

/// Resolve the config for this run:
/// 1) `$GOVJOB_CONFIG_PATH` (must exist)
/// 2) `config/classification.toml`
/// 3) `config/classification.json`
/// 4) built-in seed
///
/// `$GOVJOB_MAX_AGE_DAYS` then overrides the freshness window.
pub fn load_default() -> Result<ClassificationConfig, ConfigError> {
    let cfg = match resolve_path()? {
        Some(p) => {
            tracing::info!(path = %p.display(), "loading classification config");
            load_from(&p)?
        }
        None => {
            tracing::info!("no classification config found; using built-in seed");
            ClassificationConfig::default_seed().normalized()
        }
    };
    let cfg = apply_max_age_override(cfg, std::env::var(ENV_MAX_AGE_DAYS).ok())?;
    cfg.validate()?;
    Ok(cfg)
}

fn resolve_path() -> Result<Option<PathBuf>, ConfigError> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(&p);
        if pb.exists() {
            return Ok(Some(pb));
        }
        return Err(ConfigError::MissingPath {
            var: ENV_CONFIG_PATH,
            path: p,
        });
    }
    Ok([DEFAULT_TOML_PATH, DEFAULT_JSON_PATH]
        .into_iter()
        .map(PathBuf::from)
        .find(|p| p.exists()))
}

fn parse_config(s: &str, hint_ext: &str) -> Result<ClassificationConfig, ConfigError> {
    if hint_ext == "json" {
        return Ok(serde_json::from_str(s)?);
    }
    Ok(toml::from_str(s)?)
}

fn apply_max_age_override(
    mut cfg: ClassificationConfig,
    raw: Option<String>,
) -> Result<ClassificationConfig, ConfigError> {
    if let Some(raw) = raw {
        cfg.max_age_days = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidEnv {
                var: ENV_MAX_AGE_DAYS,
                value: raw.clone(),
            })?;
    }
    Ok(cfg)
}

/// Host-level knobs for the binary. Not part of classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub output_path: PathBuf,
    pub fetch_timeout_secs: u64,
    pub display_offset: FixedOffset,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            display_offset: default_display_offset(),
        }
    }
}

impl RunSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut s = Self::default();
        if let Ok(p) = std::env::var(ENV_OUTPUT_PATH) {
            if !p.trim().is_empty() {
                s.output_path = PathBuf::from(p.trim());
            }
        }
        if let Ok(raw) = std::env::var(ENV_FETCH_TIMEOUT_SECS) {
            s.fetch_timeout_secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or(ConfigError::InvalidEnv {
                    var: ENV_FETCH_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
        }
        if let Ok(raw) = std::env::var(ENV_UTC_OFFSET_MINUTES) {
            s.display_offset = raw
                .trim()
                .parse::<i32>()
                .ok()
                .and_then(offset_from_minutes)
                .ok_or(ConfigError::InvalidEnv {
                    var: ENV_UTC_OFFSET_MINUTES,
                    value: raw.clone(),
                })?;
        }
        Ok(s)
    }
}

/// Zone used for `date` and `last_updated` when nothing else is configured.
pub fn default_display_offset() -> FixedOffset {
    offset_from_minutes(DEFAULT_UTC_OFFSET_MINUTES).expect("default display offset in range")
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
}
