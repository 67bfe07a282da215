//! Rule-based impact scoring for pain signals.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use hnintel_core::{BlogAuthority, EmergingTopic};

use crate::types::{round4, ScoreBreakdown, Signal};

/// Days over which recency decays by a factor of `e`.
const RECENCY_DECAY_DAYS: f64 = 365.0;

/// Score every signal in place.
///
/// Breadth is left at zero; the clusterer fills it in once it knows how many
/// blogs share each idea. Scoring is a pure function of the inputs and
/// `today`, so re-scoring the same signals yields identical values.
pub fn score_signals(
    signals: &mut [Signal],
    emerging: &[EmergingTopic],
    authority: &BTreeMap<String, BlogAuthority>,
    today: NaiveDate,
) {
    if signals.is_empty() {
        return;
    }

    // A keyword listed twice keeps its last acceleration.
    let accel_by_keyword: BTreeMap<&str, f64> = emerging
        .iter()
        .map(|t| (t.keyword.as_str(), t.acceleration))
        .collect();
    let max_accel = nonzero_or_one(accel_by_keyword.values().copied().fold(0.0_f64, f64::max));
    let max_pagerank = nonzero_or_one(
        authority
            .values()
            .map(|a| a.pagerank)
            .fold(0.0_f64, f64::max),
    );

    let topics: Vec<(HashSet<String>, f64)> = accel_by_keyword
        .iter()
        .map(|(keyword, &accel)| (word_set(keyword), accel))
        .collect();

    for signal in signals.iter_mut() {
        let breakdown = ScoreBreakdown {
            trend: round4(trend_score(&signal.signal_text, &topics, max_accel)),
            authority: round4(authority_score(&signal.blog_name, authority, max_pagerank)),
            breadth: 0.0,
            recency: round4(recency_score(&signal.published, today)),
        };
        signal.impact_score = breakdown.impact();
        signal.score_breakdown = breakdown;
    }

    tracing::debug!(
        signals = signals.len(),
        emerging = emerging.len(),
        blogs_with_authority = authority.len(),
        "scored pain signals"
    );
}

/// Replace a signal's breadth factor and recompute its impact.
pub(crate) fn apply_breadth(signal: &mut Signal, breadth: f64) {
    signal.score_breakdown.breadth = round4(breadth.clamp(0.0, 1.0));
    signal.impact_score = signal.score_breakdown.impact();
}

fn trend_score(text: &str, topics: &[(HashSet<String>, f64)], max_accel: f64) -> f64 {
    let words = word_set(text);
    topics
        .iter()
        .filter(|(kw_words, _)| !kw_words.is_disjoint(&words))
        .map(|(_, accel)| accel / max_accel)
        .fold(0.0_f64, f64::max)
        .clamp(0.0, 1.0)
}

fn authority_score(
    blog_name: &str,
    authority: &BTreeMap<String, BlogAuthority>,
    max_pagerank: f64,
) -> f64 {
    authority
        .get(blog_name)
        .map_or(0.0, |a| (a.pagerank / max_pagerank).clamp(0.0, 1.0))
}

/// `exp(-days / 365)` for an ISO date prefix; 0 when missing or unparsable.
fn recency_score(published: &str, today: NaiveDate) -> f64 {
    let prefix: String = published.chars().take(10).collect();
    let Ok(date) = NaiveDate::parse_from_str(&prefix, "%Y-%m-%d") else {
        return 0.0;
    };
    #[allow(clippy::cast_precision_loss)]
    let days = (today - date).num_days() as f64;
    (-days / RECENCY_DECAY_DAYS).exp().clamp(0.0, 1.0)
}

fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

fn nonzero_or_one(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        1.0
    }
}
