//! Ideas pipeline orchestration.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use hnintel_core::{BlogAuthority, EmergingTopic, Post};

use crate::cluster::{cluster_signals, DEFAULT_SIMILARITY_THRESHOLD};
use crate::extract::extract_pain_signals;
use crate::scorer::score_signals;
use crate::vectorize::{vectorize_signals, MAX_FEATURES_CAP};
use crate::Idea;

/// Knobs for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdeasParams {
    /// Requested vocabulary size; capped at 200.
    pub max_features: usize,
    pub top_n: usize,
    pub similarity_threshold: f64,
    /// "Today" for recency decay.
    pub reference_date: NaiveDate,
}

impl IdeasParams {
    /// Defaults with the current UTC date as the reference date.
    #[must_use]
    pub fn new(max_features: usize, top_n: usize) -> Self {
        Self {
            max_features,
            top_n,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            reference_date: Utc::now().date_naive(),
        }
    }
}

/// Run the full pipeline against today's date and the default threshold.
#[must_use]
pub fn generate_ideas(
    posts: &[Post],
    emerging: &[EmergingTopic],
    authority: &BTreeMap<String, BlogAuthority>,
    max_features: usize,
    top_n: usize,
) -> Vec<Idea> {
    generate_ideas_with(
        posts,
        emerging,
        authority,
        &IdeasParams::new(max_features, top_n),
    )
}

/// Run the full pipeline.
///
/// 1. Extract pain signals from posts.
/// 2. Vectorize signal texts (vocabulary capped at 200 terms).
/// 3. Score signals on trend, authority and recency.
/// 4. Cluster into ideas, fold blog breadth back into scores and rank.
/// 5. Keep the first `top_n` ideas.
///
/// No posts or no signals produce an empty list.
#[must_use]
pub fn generate_ideas_with(
    posts: &[Post],
    emerging: &[EmergingTopic],
    authority: &BTreeMap<String, BlogAuthority>,
    params: &IdeasParams,
) -> Vec<Idea> {
    let mut signals = extract_pain_signals(posts);
    if signals.is_empty() {
        tracing::info!(posts = posts.len(), "no pain signals found");
        return Vec::new();
    }
    tracing::info!(
        posts = posts.len(),
        signals = signals.len(),
        "extracted pain signals"
    );

    let model = vectorize_signals(&signals, params.max_features.min(MAX_FEATURES_CAP));
    if model.is_none() {
        tracing::info!(
            signals = signals.len(),
            "vectorizer disabled; grouping all signals into one idea"
        );
    }

    score_signals(&mut signals, emerging, authority, params.reference_date);

    let mut ideas = cluster_signals(signals, model.as_ref(), params.similarity_threshold);
    let found = ideas.len();
    ideas.truncate(params.top_n);

    tracing::info!(ideas = found, kept = ideas.len(), "ranked project ideas");
    ideas
}
