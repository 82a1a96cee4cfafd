//! Environment variable configuration source.
//!
//! Recognized variables:
//! - `SALLE_DATABASE_PATH` — path to the SQLite database file
//! - `SALLE_CACHE_ENABLED` — `true`/`false` (also `1`/`0`, `yes`/`no`)
//! - `SALLE_CACHE_TTL_SECONDS` — positive integer
//! - `SALLE_NOTIFICATIONS_ENABLED` — `true`/`false`

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

use super::schema::{CacheSettings, Config, DatabaseSettings, NotificationSettings};

/// Reader for `SALLE_*` environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentConfig;

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::Validation {
            field: name.to_string(),
            message: format!("expected a boolean, got '{value}'"),
        }),
    }
}

impl EnvironmentConfig {
    /// Builds a configuration layer from the process environment.
    ///
    /// Unset variables leave the corresponding fields unset; only present
    /// variables participate in the merge.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a present variable does not parse.
    pub fn load() -> Result<Config> {
        let mut config = Config::default();

        if let Ok(path) = env::var("SALLE_DATABASE_PATH") {
            config.database = Some(DatabaseSettings {
                path: Some(PathBuf::from(path)),
            });
        }

        let cache_enabled = match env::var("SALLE_CACHE_ENABLED") {
            Ok(value) => Some(parse_bool("SALLE_CACHE_ENABLED", &value)?),
            Err(_) => None,
        };
        let cache_ttl = match env::var("SALLE_CACHE_TTL_SECONDS") {
            Ok(value) => Some(value.parse::<u64>().map_err(|_| Error::Validation {
                field: "SALLE_CACHE_TTL_SECONDS".into(),
                message: format!("expected an integer number of seconds, got '{value}'"),
            })?),
            Err(_) => None,
        };
        if cache_enabled.is_some() || cache_ttl.is_some() {
            config.cache = Some(CacheSettings {
                enabled: cache_enabled,
                ttl_seconds: cache_ttl,
            });
        }

        if let Ok(value) = env::var("SALLE_NOTIFICATIONS_ENABLED") {
            config.notifications = Some(NotificationSettings {
                enabled: Some(parse_bool("SALLE_NOTIFICATIONS_ENABLED", &value)?),
            });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "SALLE_DATABASE_PATH",
        "SALLE_CACHE_ENABLED",
        "SALLE_CACHE_TTL_SECONDS",
        "SALLE_NOTIFICATIONS_ENABLED",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_empty_environment() {
        clear_env();
        let config = EnvironmentConfig::load().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_load_database_path() {
        clear_env();
        env::set_var("SALLE_DATABASE_PATH", "/data/salle.db");

        let config = EnvironmentConfig::load().unwrap();
        assert_eq!(
            config.database_path(),
            Some(std::path::Path::new("/data/salle.db"))
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_cache_settings() {
        clear_env();
        env::set_var("SALLE_CACHE_ENABLED", "true");
        env::set_var("SALLE_CACHE_TTL_SECONDS", "45");

        let config = EnvironmentConfig::load().unwrap();
        assert!(config.cache_enabled());
        assert_eq!(config.cache_ttl(), std::time::Duration::from_secs(45));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_boolean() {
        clear_env();
        env::set_var("SALLE_CACHE_ENABLED", "maybe");

        let err = EnvironmentConfig::load().unwrap_err();
        assert!(err.to_string().contains("SALLE_CACHE_ENABLED"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_rejects_bad_ttl() {
        clear_env();
        env::set_var("SALLE_CACHE_TTL_SECONDS", "soon");

        let err = EnvironmentConfig::load().unwrap_err();
        assert!(err.to_string().contains("SALLE_CACHE_TTL_SECONDS"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_bool_spellings() {
        assert!(parse_bool("X", "YES").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "No").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "on").is_err());
    }

    #[test]
    #[serial]
    fn test_load_notifications_flag() {
        clear_env();
        env::set_var("SALLE_NOTIFICATIONS_ENABLED", "false");

        let config = EnvironmentConfig::load().unwrap();
        assert!(!config.notifications_enabled());

        clear_env();
    }
}
