//! Configuration loading and validation.
//!
//! Loads `config.toml` from `$AUTONAME_CONFIG_PATH` or `~/.autoname/`.
//! Precedence: env vars > config file > defaults. A missing default file is
//! not an error; every section has defaults.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::annotation::AnnotationConfig;
use crate::types::HighlightColor;

/// Env var naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "AUTONAME_CONFIG_PATH";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Triage annotation settings.
    pub annotations: AnnotationConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed TOML, an unknown highlight colour, or an
    /// invalid log filter.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(contents).context("failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns an error when `logging.level` is not a valid filter directive.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_ok(),
            "logging.level is not a valid filter directive: {}",
            self.logging.level
        );
        Ok(())
    }

    /// Apply environment variable overrides (env > config > defaults).
    ///
    /// Takes a resolver function so tests need not touch the process env.
    /// Invalid values leave the previous value in place and are returned so
    /// the caller can report them once logging is running.
    pub fn apply_overrides(
        &mut self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Vec<RejectedOverride> {
        let mut rejected = Vec::new();
        let annotations = &mut self.annotations;

        if let Some(v) = env("AUTONAME_PREPEND") {
            annotations.prepend = v;
        }
        if let Some(v) = env("AUTONAME_APPEND") {
            annotations.append = v;
        }
        if let Some(v) = env("AUTONAME_USE_TITLE") {
            match parse_bool(&v) {
                Some(b) => annotations.use_title = b,
                None => rejected.push(RejectedOverride::new("AUTONAME_USE_TITLE", v)),
            }
        }
        if let Some(v) = env("AUTONAME_TAG_GROUPS") {
            match parse_bool(&v) {
                Some(b) => annotations.tag_groups = b,
                None => rejected.push(RejectedOverride::new("AUTONAME_TAG_GROUPS", v)),
            }
        }
        if let Some(v) = env("AUTONAME_HIGHLIGHT_COLOR") {
            match v.parse::<HighlightColor>() {
                Ok(color) => annotations.highlight_color = color,
                Err(_) => rejected.push(RejectedOverride::new("AUTONAME_HIGHLIGHT_COLOR", v)),
            }
        }
        if let Some(v) = env("AUTONAME_LOG_LEVEL") {
            if tracing_subscriber::EnvFilter::try_new(&v).is_ok() {
                self.logging.level = v;
            } else {
                rejected.push(RejectedOverride::new("AUTONAME_LOG_LEVEL", v));
            }
        }
        rejected
    }
}

/// An env override whose value could not be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    /// Variable name.
    pub var: &'static str,
    /// Value that was ignored.
    pub value: String,
}

impl RejectedOverride {
    fn new(var: &'static str, value: String) -> Self {
        Self { var, value }
    }
}

/// Where the active configuration was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file.
    File(PathBuf),
    /// No file at this path; defaults used.
    Defaults(PathBuf),
}

/// Configuration together with what happened while loading it.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Effective configuration.
    pub config: AppConfig,
    /// Where it came from.
    pub source: ConfigSource,
    /// Env overrides that were ignored.
    pub rejected: Vec<RejectedOverride>,
}

impl LoadedConfig {
    /// Report the config source and every ignored override.
    ///
    /// Loading happens before a subscriber exists, so this is called once
    /// logging has been initialised.
    pub fn log_summary(&self) {
        match &self.source {
            ConfigSource::File(path) => {
                tracing::info!(path = %path.display(), "loaded config from file");
            }
            ConfigSource::Defaults(path) => {
                tracing::info!(path = %path.display(), "no config file found, using defaults");
            }
        }
        for rejected in &self.rejected {
            tracing::warn!(
                var = rejected.var,
                value = %rejected.value,
                "ignoring invalid env override"
            );
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load configuration from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    AppConfig::from_toml(&contents)
        .with_context(|| format!("invalid config at {}", path.display()))
}

/// Load configuration from `explicit` (which must exist) or from the
/// default location (where a missing file yields defaults), then apply env
/// overrides from `env`.
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed, an explicit file is
/// missing, or the home directory cannot be determined.
pub fn load_with(
    explicit: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<LoadedConfig> {
    let (mut config, source) = match explicit {
        Some(path) => (load_config(path)?, ConfigSource::File(path.to_path_buf())),
        None => {
            let path = config_path_with(&env)?;
            match std::fs::read_to_string(&path) {
                Ok(contents) => {
                    let config = AppConfig::from_toml(&contents)
                        .with_context(|| format!("invalid config at {}", path.display()))?;
                    (config, ConfigSource::File(path))
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    (AppConfig::default(), ConfigSource::Defaults(path))
                }
                Err(e) => {
                    return Err(anyhow::anyhow!(
                        "failed to read config at {}: {e}",
                        path.display()
                    ))
                }
            }
        }
    };
    let rejected = config.apply_overrides(&env);
    Ok(LoadedConfig {
        config,
        source,
        rejected,
    })
}

/// Resolve the config file path using a custom env resolver.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_path_with(env: impl Fn(&str) -> Option<String>) -> anyhow::Result<PathBuf> {
    if let Some(p) = env(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(p));
    }
    Ok(config_dir()?.join("config.toml"))
}

/// Resolve the default config directory (`~/.autoname/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".autoname"))
}

fn default_log_level() -> String {
    "info".to_owned()
}
