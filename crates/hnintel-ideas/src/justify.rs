//! Deterministic prose explaining why an idea is worth pursuing.

use crate::Idea;

const HIGH_IMPACT: f64 = 0.7;
const MODERATE_IMPACT: f64 = 0.4;

const FALLBACK: &str = "Potential opportunity identified from blog content.";

/// Build a short justification from an idea's evidence.
#[must_use]
pub fn build_justification(idea: &Idea) -> String {
    let mut parts: Vec<String> = Vec::new();

    let mut blogs: Vec<&str> = Vec::new();
    for source in &idea.sources {
        if !blogs.contains(&source.blog_name.as_str()) {
            blogs.push(&source.blog_name);
        }
    }

    if idea.blog_count >= 3 {
        parts.push(format!(
            "{} blogs independently describe this need, including {}.",
            idea.blog_count,
            blogs.iter().take(3).copied().collect::<Vec<_>>().join(", ")
        ));
    } else if idea.blog_count > 0 {
        let plural = if idea.signal_count == 1 { "" } else { "s" };
        parts.push(format!(
            "Raised by {} ({} signal{plural}).",
            blogs.join(" and "),
            idea.signal_count
        ));
    }

    let breakdown = idea.pain_type_breakdown.by_count_desc();
    if !breakdown.is_empty() {
        let listed = breakdown
            .iter()
            .map(|(pain_type, count)| format!("{count} {pain_type}"))
            .collect::<Vec<_>>()
            .join(", ");
        let noun = if breakdown.len() > 1 { "categories" } else { "category" };
        parts.push(format!("Pain signals span {listed} {noun}."));
    }

    if !idea.keywords.is_empty() {
        let listed = idea
            .keywords
            .iter()
            .take(5)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        parts.push(format!("Related trending topics: {listed}."));
    }

    if idea.impact_score >= HIGH_IMPACT {
        parts.push("High impact score suggests strong demand for a solution.".to_string());
    } else if idea.impact_score >= MODERATE_IMPACT {
        parts.push("Moderate impact score indicates a viable project opportunity.".to_string());
    }

    if parts.is_empty() {
        FALLBACK.to_string()
    } else {
        parts.join(" ")
    }
}
