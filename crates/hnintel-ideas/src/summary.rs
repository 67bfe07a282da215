//! Condensed per-idea view for interactive display.

use std::collections::HashSet;

use serde::Serialize;

use crate::Idea;

const QUOTE_CHARS: usize = 100;
const MAX_SOURCES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceRef {
    pub blog_name: String,
    pub post_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdeaSummary {
    /// One-based rank.
    pub rank: usize,
    pub label: String,
    pub impact_score: f64,
    pub blog_count: usize,
    pub signal_count: usize,
    /// First 100 characters of the representative quote.
    pub quote: String,
    /// Up to three unique `(blog, post)` pairs, in source order.
    pub sources: Vec<SourceRef>,
}

#[must_use]
pub fn summarize_idea(idea: &Idea) -> IdeaSummary {
    let mut seen = HashSet::new();
    let sources = idea
        .sources
        .iter()
        .filter(|s| seen.insert((s.blog_name.as_str(), s.post_url.as_str())))
        .take(MAX_SOURCES)
        .map(|s| SourceRef {
            blog_name: s.blog_name.clone(),
            post_url: s.post_url.clone(),
        })
        .collect();

    IdeaSummary {
        rank: idea.idea_id + 1,
        label: idea.label.clone(),
        impact_score: idea.impact_score,
        blog_count: idea.blog_count,
        signal_count: idea.signal_count,
        quote: idea.representative_quote.chars().take(QUOTE_CHARS).collect(),
        sources,
    }
}
