//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve the data directory, database path and logging settings.
//! - Read overrides from `NOTEKEEP_*` environment variables.
//!
//! # Invariants
//! - `log_level` always holds a value accepted by `init_logging`.

use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::path::PathBuf;

pub const DB_FILE_NAME: &str = "notekeep.sqlite3";
pub const ENV_DATA_DIR: &str = "NOTEKEEP_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "NOTEKEEP_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "NOTEKEEP_LOG_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Directory holding the SQLite file.
    pub data_dir: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling logs; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_dir: std::env::temp_dir().join("notekeep"),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Defaults overridden by `NOTEKEEP_*` variables.
    ///
    /// # Errors
    /// - Returns an error when `NOTEKEEP_LOG_LEVEL` is not a known level.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by values from `lookup`, keyed by variable name.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = Self::default();
        if let Some(dir) = non_empty(lookup(ENV_DATA_DIR)) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(level) = non_empty(lookup(ENV_LOG_LEVEL)) {
            config.log_level = normalize_level(&level)?.to_string();
        }
        config.log_dir = non_empty(lookup(ENV_LOG_DIR)).map(PathBuf::from);
        Ok(config)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{CoreConfig, DB_FILE_NAME, ENV_DATA_DIR, ENV_LOG_LEVEL};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn lookup_overrides_data_dir_and_level() {
        let config = CoreConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/srv/notes"),
            (ENV_LOG_LEVEL, "WARNING"),
        ]))
        .unwrap();
        assert_eq!(
            config.db_path(),
            PathBuf::from("/srv/notes").join(DB_FILE_NAME)
        );
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "loud")])).unwrap_err();
        assert!(err.contains("unsupported log level"));
    }

    #[test]
    fn deserialize_fills_missing_fields_with_defaults() {
        let config: CoreConfig = serde_json::from_str(r#"{"log_level":"error"}"#).unwrap();
        assert_eq!(config.log_level, "error");
        assert_eq!(config.data_dir, CoreConfig::default().data_dir);
    }
}
