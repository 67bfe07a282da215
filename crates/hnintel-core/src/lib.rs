//! Shared input model and configuration for HN Intel.
//!
//! The ideas pipeline consumes a read-only snapshot of posts, emerging topics
//! and blog authority produced by the ingestion and graph collaborators. This
//! crate owns the shape of that snapshot and the environment-driven settings
//! used by the binaries.

pub mod app_config;
pub mod config;
pub mod posts;
pub mod snapshot;

pub use app_config::AppConfig;
pub use config::{
    load_app_config, load_app_config_from_env, parse_reference_date, parse_similarity_threshold,
};
pub use posts::{BlogAuthority, EmergingTopic, Post};
pub use snapshot::{load_snapshot, Snapshot};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read snapshot file {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot JSON: {0}")]
    SnapshotJson(#[source] serde_json::Error),

    #[error("failed to parse snapshot YAML: {0}")]
    SnapshotYaml(#[source] serde_yaml::Error),

    #[error("snapshot validation failed: {0}")]
    Validation(String),
}
