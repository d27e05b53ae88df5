//! Loading [`ScaleConfig`] from `scale.json`.
//!
//! Lookup order: an explicit path, then `$XDG_CONFIG_HOME/scaled/scale.json`,
//! then `$HOME/.config/scaled/scale.json`. Every key in the file is optional.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::scale::{ScaleConfig, ScaleRange};

const APP_DIR: &str = "scaled";
const CONFIG_FILE: &str = "scale.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(#[from] InvalidConfig),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidConfig {
    #[error("design_width must be positive, got {0}")]
    DesignWidth(f64),
    #[error("design_height must be positive, got {0}")]
    DesignHeight(f64),
    #[error("{name} has min {min} greater than max {max}")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{name} bounds must be positive and finite")]
    NonPositiveRange { name: &'static str },
    #[error("default_font_size must be positive, got {0}")]
    DefaultFontSize(f64),
}

/// Check the invariants [`crate::scale::compute_factors`] relies on.
pub fn validate(config: &ScaleConfig) -> Result<(), InvalidConfig> {
    if !is_positive(config.design_width) {
        return Err(InvalidConfig::DesignWidth(config.design_width));
    }
    if let Some(height) = config.design_height
        && !is_positive(height)
    {
        return Err(InvalidConfig::DesignHeight(height));
    }
    validate_range("dimen_scale_range", config.dimen_scale_range)?;
    validate_range("font_scale_range", config.font_scale_range)?;
    if !is_positive(config.default_font_size) {
        return Err(InvalidConfig::DefaultFontSize(config.default_font_size));
    }
    Ok(())
}

fn validate_range(name: &'static str, range: ScaleRange) -> Result<(), InvalidConfig> {
    if !is_positive(range.min) || !is_positive(range.max) {
        return Err(InvalidConfig::NonPositiveRange { name });
    }
    if !range.is_ordered() {
        return Err(InvalidConfig::InvertedRange {
            name,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

pub fn parse_config(contents: &str, path: &Path) -> Result<ScaleConfig, ConfigError> {
    let config: ScaleConfig =
        serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    validate(&config)?;
    Ok(config)
}

/// Read and validate the config at `path`. A missing file yields the
/// defaults; any other failure is returned.
pub fn load_config(path: &Path) -> Result<ScaleConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents, path),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(?path, "no scale config found; using defaults");
            Ok(ScaleConfig::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Like [`load_config`], but logs failures and falls back to defaults.
pub fn load_or_default(path: &Path) -> ScaleConfig {
    load_config(path).unwrap_or_else(|err| {
        tracing::warn!(%err, "failed to load scale config; using defaults");
        ScaleConfig::default()
    })
}

/// Resolve the config path: `explicit` if given, otherwise the XDG location.
/// `None` when neither `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let xdg = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from);
    let home = std::env::var_os("HOME").map(PathBuf::from);
    default_config_path(xdg.as_deref(), home.as_deref())
}

fn default_config_path(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let root = match xdg_config_home.filter(|p| !p.as_os_str().is_empty()) {
        Some(xdg) => xdg.to_path_buf(),
        None => home?.join(".config"),
    };
    Some(root.join(APP_DIR).join(CONFIG_FILE))
}
