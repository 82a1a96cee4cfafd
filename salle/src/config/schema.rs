//! Configuration schema types.
//!
//! Every field is optional at the schema level; the merge step layers
//! sources over each other and the accessor methods supply the built-in
//! defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration for the booking engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Storage settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseSettings>,

    /// Availability-cache settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheSettings>,

    /// Notification settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationSettings>,
}

/// Storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Path to the SQLite database file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Availability-cache settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Whether the free-interval cache is installed at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Entry time-to-live in seconds. Must be positive when given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds: Option<u64>,
}

/// Notification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Whether lifecycle notifications are emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
}

/// Default TTL for the availability cache.
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

impl Config {
    /// Layers `overlay` over `self`, field by field.
    ///
    /// Fields set in the overlay win; unset overlay fields keep the base
    /// value.
    #[must_use]
    pub fn merged_with(self, overlay: Self) -> Self {
        Self {
            database: match (self.database, overlay.database) {
                (base, None) => base,
                (None, over) => over,
                (Some(base), Some(over)) => Some(DatabaseSettings {
                    path: over.path.or(base.path),
                }),
            },
            cache: match (self.cache, overlay.cache) {
                (base, None) => base,
                (None, over) => over,
                (Some(base), Some(over)) => Some(CacheSettings {
                    enabled: over.enabled.or(base.enabled),
                    ttl_seconds: over.ttl_seconds.or(base.ttl_seconds),
                }),
            },
            notifications: match (self.notifications, overlay.notifications) {
                (base, None) => base,
                (None, over) => over,
                (Some(base), Some(over)) => Some(NotificationSettings {
                    enabled: over.enabled.or(base.enabled),
                }),
            },
        }
    }

    /// Validates the merged configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the cache TTL is zero.
    pub fn validate(&self) -> Result<()> {
        if let Some(cache) = &self.cache {
            if cache.ttl_seconds == Some(0) {
                return Err(Error::Validation {
                    field: "cache.ttl_seconds".into(),
                    message: "must be greater than zero".into(),
                });
            }
        }
        Ok(())
    }

    /// Returns the configured database path, if any.
    #[must_use]
    pub fn database_path(&self) -> Option<&Path> {
        self.database.as_ref()?.path.as_deref()
    }

    /// Returns whether the availability cache should be installed.
    ///
    /// Defaults to `false`: the cache is an opt-in optimization.
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        self.cache
            .as_ref()
            .and_then(|c| c.enabled)
            .unwrap_or(false)
    }

    /// Returns the cache TTL, defaulting to 30 seconds.
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        self.cache
            .as_ref()
            .and_then(|c| c.ttl_seconds)
            .map_or(DEFAULT_CACHE_TTL, Duration::from_secs)
    }

    /// Returns whether lifecycle notifications are emitted.
    ///
    /// Defaults to `true`.
    #[must_use]
    pub fn notifications_enabled(&self) -> bool {
        self.notifications
            .as_ref()
            .and_then(|n| n.enabled)
            .unwrap_or(true)
    }
}
