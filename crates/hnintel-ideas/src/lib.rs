//! Project-idea mining for HN Intel.
//!
//! Scans blog posts for pain-point language, scores each signal on trend
//! momentum, blog authority, breadth and recency, groups related signals with
//! average-linkage clustering over TF-IDF vectors, and explains each
//! resulting idea in plain prose. Everything here is a pure, synchronous
//! computation over an in-memory snapshot.

pub mod cluster;
pub mod extract;
pub mod justify;
pub mod linkage;
pub mod pipeline;
pub mod scorer;
pub mod summary;
pub mod types;
pub mod vectorize;

mod html;

pub use cluster::{cluster_signals, title_case, DEFAULT_SIMILARITY_THRESHOLD};
pub use extract::{classify_text, extract_pain_signals};
pub use justify::build_justification;
pub use pipeline::{generate_ideas, generate_ideas_with, IdeasParams};
pub use scorer::score_signals;
pub use summary::{summarize_idea, IdeaSummary, SourceRef};
pub use types::{Idea, PainType, PainTypeBreakdown, ScoreBreakdown, Signal};
pub use vectorize::{vectorize_signals, TfidfModel};
