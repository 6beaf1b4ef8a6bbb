//! Configuration System
//!
//! Session policies and logging settings for embedding applications. Values are
//! layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `EXEC_TIMELINE__*` environment overrides
//! (e.g. `EXEC_TIMELINE__SESSION__SELECTION=first`).
//!
//! The interpreter's time scale is not configuration. It is handed to the
//! orchestrator directly so the two can never disagree.

use crate::error::TimelineError;
use crate::logging::{self, LoggingConfig, LOG_LEVELS};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "EXEC_TIMELINE";
const ENV_SEPARATOR: &str = "__";

/// Which test stays selected when a new set of results arrives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Always select the first result.
    First,
    /// Keep the selected test if a result with the same id is still present,
    /// otherwise fall back to the first result.
    #[default]
    PreserveById,
}

impl SelectionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionPolicy::First => "first",
            SelectionPolicy::PreserveById => "preserve_by_id",
        }
    }
}

/// What happens to folded lines when a new exercise attempt begins
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldPolicy {
    #[default]
    ResetOnNewAttempt,
    /// Treat folds as a display preference that outlives attempts.
    Persist,
}

impl FoldPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            FoldPolicy::ResetOnNewAttempt => "reset_on_new_attempt",
            FoldPolicy::Persist => "persist",
        }
    }
}

/// Orchestrator session policies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub selection: SelectionPolicy,

    #[serde(default)]
    pub fold_policy: FoldPolicy,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TimelineConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "unknown level '{}'",
                self.logging.level
            )));
        }
        if let Err(e) = logging::parse_format(&self.logging.format) {
            errors.push(ValidationError::Logging(e.to_string()));
        }
        if let Err(e) = logging::parse_output(&self.logging.output) {
            errors.push(ValidationError::Logging(e.to_string()));
        }
        for (module, level) in &self.logging.modules {
            if !LOG_LEVELS.contains(&level.as_str()) {
                errors.push(ValidationError::Logging(format!(
                    "unknown level '{}' for module '{}'",
                    level, module
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn to_toml(&self) -> Result<String, TimelineError> {
        toml::to_string_pretty(self).map_err(|e| TimelineError::ConfigError(e.to_string()))
    }
}

/// Loads [`TimelineConfig`] from layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then `path` (if given), then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<TimelineConfig, TimelineError> {
        let mut builder = builder_with_defaults()?;
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        Self::finish(builder)
    }

    /// Defaults, then the given TOML text, then environment overrides.
    pub fn from_toml_str(source: &str) -> Result<TimelineConfig, TimelineError> {
        let builder = builder_with_defaults()?.add_source(File::from_str(source, FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(
        builder: ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<TimelineConfig, TimelineError> {
        let config: TimelineConfig = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
            .build()?
            .try_deserialize()?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            TimelineError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(config)
    }
}

fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, TimelineError> {
    let defaults = TimelineConfig::default();
    Ok(Config::builder()
        .set_default("session.selection", defaults.session.selection.as_str())?
        .set_default("session.fold_policy", defaults.session.fold_policy.as_str())?
        .set_default("logging.level", defaults.logging.level)?
        .set_default("logging.format", defaults.logging.format)?
        .set_default("logging.output", defaults.logging.output)?)
}
