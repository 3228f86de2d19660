//! Data layout configuration
//!
//! Names the CSV exports backing each event type. Any table can be left out
//! with `null`, in which case that table is empty for the session.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::records::EventType;

/// Environment variable naming a JSON config file for the Lambda handler
pub const CONFIG_ENV_VAR: &str = "EVENT_PROJECTION_CONFIG";

/// Locations of the reference tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory that relative table paths are resolved against
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    #[serde(default = "default_inflation_events")]
    pub inflation_events: Option<PathBuf>,

    #[serde(default = "default_inflation_baselines")]
    pub inflation_baselines: Option<PathBuf>,

    #[serde(default = "default_rate_events")]
    pub rate_events: Option<PathBuf>,

    #[serde(default = "default_rate_baselines")]
    pub rate_baselines: Option<PathBuf>,

    /// Per-stock financial-statement history
    #[serde(default = "default_statements")]
    pub statements: Option<PathBuf>,
}

fn default_base_dir() -> PathBuf { PathBuf::from("data") }
fn default_inflation_events() -> Option<PathBuf> { Some(PathBuf::from("inflation_events.csv")) }
fn default_inflation_baselines() -> Option<PathBuf> { Some(PathBuf::from("inflation_baselines.csv")) }
fn default_rate_events() -> Option<PathBuf> { Some(PathBuf::from("rate_events.csv")) }
fn default_rate_baselines() -> Option<PathBuf> { Some(PathBuf::from("rate_baselines.csv")) }
fn default_statements() -> Option<PathBuf> { Some(PathBuf::from("statements.csv")) }

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            inflation_events: default_inflation_events(),
            inflation_baselines: default_inflation_baselines(),
            rate_events: default_rate_events(),
            rate_baselines: default_rate_baselines(),
            statements: default_statements(),
        }
    }
}

impl DataConfig {
    /// Read a JSON config file; omitted fields take their defaults
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| LoadError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path` when given, otherwise use the default layout
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, LoadError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Same config with every table rooted at `base_dir`
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn event_table(&self, event_type: EventType) -> Option<PathBuf> {
        let table = match event_type {
            EventType::Inflation => &self.inflation_events,
            EventType::InterestRate => &self.rate_events,
        };
        table.as_deref().map(|p| self.resolve(p))
    }

    pub fn baseline_table(&self, event_type: EventType) -> Option<PathBuf> {
        let table = match event_type {
            EventType::Inflation => &self.inflation_baselines,
            EventType::InterestRate => &self.rate_baselines,
        };
        table.as_deref().map(|p| self.resolve(p))
    }

    pub fn statements_table(&self) -> Option<PathBuf> {
        self.statements.as_deref().map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        // `join` keeps absolute paths as they are
        self.base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: DataConfig =
            serde_json::from_str(r#"{"base_dir": "/srv/tables", "rate_events": null}"#).unwrap();

        assert_eq!(
            config.event_table(EventType::Inflation),
            Some(PathBuf::from("/srv/tables/inflation_events.csv"))
        );
        assert_eq!(config.event_table(EventType::InterestRate), None);
        assert_eq!(
            config.baseline_table(EventType::InterestRate),
            Some(PathBuf::from("/srv/tables/rate_baselines.csv"))
        );
    }

    #[test]
    fn test_absolute_table_path_is_kept() {
        let config = DataConfig {
            statements: Some(PathBuf::from("/var/statements.csv")),
            ..Default::default()
        };
        assert_eq!(config.statements_table(), Some(PathBuf::from("/var/statements.csv")));
    }
}
