//! Grouping scored signals into ranked project ideas.

use std::collections::HashSet;

use crate::justify::build_justification;
use crate::linkage::{average_linkage, DistanceMatrix};
use crate::scorer::apply_breadth;
use crate::types::{PainType, PainTypeBreakdown, Signal};
use crate::vectorize::TfidfModel;
use crate::Idea;

/// Default minimum average cosine similarity for two groups to merge.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

const TOP_KEYWORDS: usize = 5;
const LABEL_KEYWORDS: usize = 3;
const FALLBACK_LABEL: &str = "General Improvement";

/// Cluster scored signals into ideas, apply the breadth feedback pass and
/// rank the result.
///
/// With no model (fewer than two signals, or an empty vocabulary) every
/// signal lands in a single keyword-less idea.
#[must_use]
pub fn cluster_signals(
    signals: Vec<Signal>,
    model: Option<&TfidfModel>,
    similarity_threshold: f64,
) -> Vec<Idea> {
    if signals.is_empty() {
        return Vec::new();
    }

    let total_blogs = distinct_blogs(&signals).max(1);

    let mut ideas = match model {
        Some(model) if signals.len() > 1 && model.rows.len() == signals.len() => {
            let matrix = DistanceMatrix::cosine(&model.rows);
            let labels = average_linkage(matrix).cut(1.0 - similarity_threshold);
            group_by_label(signals, &labels)
                .into_iter()
                .map(|(indices, members)| {
                    let keywords = centroid_keywords(model, &indices);
                    make_idea(members, keywords)
                })
                .collect()
        }
        _ => vec![make_idea(signals, Vec::new())],
    };

    for idea in &mut ideas {
        #[allow(clippy::cast_precision_loss)]
        let breadth = idea.blog_count as f64 / total_blogs as f64;
        for source in &mut idea.sources {
            apply_breadth(source, breadth);
        }
        idea.impact_score = idea
            .sources
            .iter()
            .map(|s| s.impact_score)
            .fold(0.0_f64, f64::max);
        idea.justification = build_justification(idea);
    }

    ideas.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));
    for (position, idea) in ideas.iter_mut().enumerate() {
        idea.idea_id = position;
    }

    tracing::debug!(
        ideas = ideas.len(),
        total_blogs,
        similarity_threshold,
        "clustered signals into ideas"
    );
    ideas
}

/// Members of each cluster in input order, clusters ordered by label.
fn group_by_label(signals: Vec<Signal>, labels: &[usize]) -> Vec<(Vec<usize>, Vec<Signal>)> {
    let n_clusters = labels.iter().max().map_or(0, |m| m + 1);
    let mut groups: Vec<(Vec<usize>, Vec<Signal>)> = vec![(Vec::new(), Vec::new()); n_clusters];
    for (idx, (signal, &label)) in signals.into_iter().zip(labels).enumerate() {
        groups[label].0.push(idx);
        groups[label].1.push(signal);
    }
    groups
}

/// Highest-weight centroid terms, weight > 0, lower feature index first on ties.
fn centroid_keywords(model: &TfidfModel, indices: &[usize]) -> Vec<String> {
    if indices.is_empty() {
        return Vec::new();
    }
    let mut centroid = vec![0.0_f64; model.n_features()];
    for &i in indices {
        for (acc, v) in centroid.iter_mut().zip(&model.rows[i]) {
            *acc += v;
        }
    }
    #[allow(clippy::cast_precision_loss)]
    let n = indices.len() as f64;
    for v in &mut centroid {
        *v /= n;
    }

    let mut order: Vec<usize> = (0..centroid.len()).collect();
    order.sort_by(|&a, &b| centroid[b].total_cmp(&centroid[a]).then(a.cmp(&b)));
    order
        .into_iter()
        .take(TOP_KEYWORDS)
        .filter(|&i| centroid[i] > 0.0)
        .map(|i| model.vocabulary[i].clone())
        .collect()
}

fn make_idea(mut members: Vec<Signal>, keywords: Vec<String>) -> Idea {
    let pain_type_breakdown = PainTypeBreakdown::from_signals(&members);
    let blog_count = distinct_blogs(&members);

    members.sort_by(|a, b| b.impact_score.total_cmp(&a.impact_score));
    let representative_quote = members
        .first()
        .map(|s| s.signal_text.clone())
        .unwrap_or_default();
    let impact_score = members.first().map_or(0.0, |s| s.impact_score);

    Idea {
        idea_id: 0,
        label: generate_label(&keywords, &pain_type_breakdown),
        impact_score,
        justification: String::new(),
        keywords,
        signal_count: members.len(),
        blog_count,
        pain_type_breakdown,
        representative_quote,
        sources: members,
    }
}

/// `"Simplified Database Migration"` style label from the dominant pain type
/// and the top keywords.
fn generate_label(keywords: &[String], breakdown: &PainTypeBreakdown) -> String {
    if keywords.is_empty() {
        return FALLBACK_LABEL.to_string();
    }
    let topic = keywords
        .iter()
        .take(LABEL_KEYWORDS)
        .map(|k| title_case(k))
        .collect::<Vec<_>>()
        .join(" ");

    match breakdown.dominant().unwrap_or(PainType::Wish) {
        PainType::Wish => format!("Better {topic}"),
        PainType::Frustration => format!("Improved {topic}"),
        PainType::Gap => format!("{topic} Solution"),
        PainType::Difficulty => format!("Simplified {topic}"),
        PainType::Broken => format!("Reliable {topic}"),
        PainType::Opportunity => format!("{topic} Platform"),
    }
}

/// Uppercase the first letter of each alphabetic run, lowercase the rest.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

fn distinct_blogs(signals: &[Signal]) -> usize {
    signals
        .iter()
        .map(|s| s.blog_name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

#[cfg(test)]
#[path = "cluster_test.rs"]
mod tests;
