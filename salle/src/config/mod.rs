//! Configuration system for salle.
//!
//! This module provides layered configuration with support for:
//! - YAML configuration files (`salle.yaml` and a private
//!   `salle.local.yaml` next to it)
//! - Environment variable overrides (`SALLE_*`)
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`SALLE_*`)
//! 3. Private project config (`salle.local.yaml`)
//! 4. Project config (`salle.yaml`)
//! 5. Built-in defaults
//!
//! # Examples
//!
//! Basic usage with defaults:
//!
//! ```
//! use salle::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .build()
//!     .unwrap();
//! assert!(config.database.is_none());
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use salle::config::{CacheSettings, Config, ConfigBuilder};
//!
//! let custom = Config {
//!     cache: Some(CacheSettings {
//!         enabled: Some(true),
//!         ttl_seconds: Some(15),
//!     }),
//!     ..Config::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.cache_enabled());
//! ```

pub mod builder;
pub mod environment;
pub mod schema;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use schema::{CacheSettings, Config, DatabaseSettings, NotificationSettings};
