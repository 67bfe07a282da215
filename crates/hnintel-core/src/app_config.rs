use std::path::PathBuf;

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    /// JSON or YAML file holding posts, emerging topics and blog authority.
    pub snapshot_path: PathBuf,
    /// Requested TF-IDF vocabulary size. The pipeline caps it at 200.
    pub max_features: usize,
    pub top_n: usize,
    pub similarity_threshold: f64,
    /// Where to write `ideas.md` / `ideas.json`. Reports are skipped when unset.
    pub output_dir: Option<PathBuf>,
    /// Pins "today" for recency scoring. Uses the current UTC date when unset.
    pub reference_date: Option<NaiveDate>,
}
