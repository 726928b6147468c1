//! Shared types for Flash Narrative: configuration, the monitoring profile,
//! mention records and the record loader.

pub mod app_config;
pub mod config;
pub mod count;
pub mod loader;
pub mod mention;
pub mod profile;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, KpiThresholds};
pub use config::{load_app_config, load_app_config_from_env};
pub use count::{coerce_count, RawCount};
pub use loader::{load_mentions, read_mentions_csv, read_mentions_json, LoadError};
pub use mention::Mention;
pub use profile::{load_profile, parse_profile, validate_profile, MonitoringProfile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read profile file '{path}': {source}")]
    ProfileFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile file: {0}")]
    ProfileFileParse(serde_yaml::Error),

    #[error("profile validation failed: {0}")]
    Validation(String),
}
