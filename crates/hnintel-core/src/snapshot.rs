use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::posts::{BlogAuthority, EmergingTopic, Post};
use crate::ConfigError;

/// Everything the ideas pipeline reads: posts plus the trend and authority
/// data computed upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub emerging: Vec<EmergingTopic>,
    /// Keyed by blog name.
    #[serde(default)]
    pub authority: BTreeMap<String, BlogAuthority>,
}

/// Load and validate a snapshot file.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML; everything else is
/// parsed as JSON.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_snapshot(path: &Path) -> Result<Snapshot, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SnapshotIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    let snapshot: Snapshot = if is_yaml {
        serde_yaml::from_str(&content).map_err(ConfigError::SnapshotYaml)?
    } else {
        serde_json::from_str(&content).map_err(ConfigError::SnapshotJson)?
    };

    validate_snapshot(&snapshot)?;

    Ok(snapshot)
}

fn validate_snapshot(snapshot: &Snapshot) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for post in &snapshot.posts {
        if post.url.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "post {} has an empty url",
                post.id
            )));
        }
        if !seen_ids.insert(post.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate post id: {}",
                post.id
            )));
        }
    }

    for topic in &snapshot.emerging {
        if !topic.acceleration.is_finite() || topic.acceleration < 0.0 {
            return Err(ConfigError::Validation(format!(
                "emerging topic '{}' has invalid acceleration {}",
                topic.keyword, topic.acceleration
            )));
        }
    }

    for (blog, auth) in &snapshot.authority {
        if !auth.pagerank.is_finite() || auth.pagerank < 0.0 {
            return Err(ConfigError::Validation(format!(
                "blog '{blog}' has invalid pagerank {}",
                auth.pagerank
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
