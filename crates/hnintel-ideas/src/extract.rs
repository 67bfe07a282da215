//! Pain-signal extraction from post text.

use std::collections::HashMap;
use std::sync::LazyLock;

use hnintel_core::Post;
use rayon::prelude::*;
use regex::Regex;

use crate::html::strip_html;
use crate::types::{PainType, ScoreBreakdown, Signal};

/// Extracted sentences shorter than this (in characters) are discarded.
pub const MIN_SIGNAL_CHARS: usize = 10;

/// Characters of context kept on each side of a match that no sentence contains.
const FALLBACK_WINDOW_CHARS: usize = 80;

static PAIN_PATTERNS: LazyLock<Vec<(PainType, Regex)>> = LazyLock::new(|| {
    PainType::ALL
        .iter()
        .map(|&pain_type| {
            let re = Regex::new(pattern_source(pain_type)).expect("valid regex");
            (pain_type, re)
        })
        .collect()
});

static SENTENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?\n]+[.!?\n]?").expect("valid regex"));

fn pattern_source(pain_type: PainType) -> &'static str {
    match pain_type {
        PainType::Wish => {
            r"(?i)(?:i wish|would be nice|if only|someone should build|wish there was|wish someone would|hope someone builds|we really need)"
        }
        PainType::Frustration => {
            r"(?i)(?:frustrat\w*|annoy\w*|pain point|drives me crazy|infuriat\w*|maddening|exasperat\w*|fed up with)"
        }
        PainType::Gap => {
            r"(?i)(?:no good (?:way|tool|solution)|missing|lacking|gap in|underserved|no (?:easy|reliable|decent) way|still no|doesn't exist|yet to see a good|unmet need)"
        }
        PainType::Difficulty => {
            r"(?i)(?:hard to|difficult to|impossible to|struggle with|struggling to|too complicated|overly complex|shouldn't be this hard|takes too long to|painful to)"
        }
        PainType::Broken => {
            r"(?i)(?:broken|doesn't work|unreliable|flaky|buggy|unusable|constantly break\w*|keeps failing|fragile)"
        }
        PainType::Opportunity => {
            r"(?i)(?:opportunity|untapped|need for|demand for|ripe for disruption|market for|room for|space for a|begging for)"
        }
    }
}

/// Scan posts for pain-pattern language and return one signal per
/// `(post_url, signal_type)`, keeping the longest sentence for each.
///
/// Signals appear in post order, then pattern order, then position of the
/// first match that created them. Posts are scanned in parallel; the dedup
/// reduction is sequential so the output is deterministic.
#[must_use]
pub fn extract_pain_signals(posts: &[Post]) -> Vec<Signal> {
    let scans: Vec<Vec<(PainType, String)>> = posts.par_iter().map(scan_post).collect();

    let mut acc = SignalAccumulator::default();
    for (post, matches) in posts.iter().zip(scans) {
        for (pain_type, sentence) in matches {
            acc.offer(post, pain_type, sentence);
        }
    }

    let signals = acc.into_signals();
    tracing::debug!(
        posts = posts.len(),
        signals = signals.len(),
        "extracted pain signals"
    );
    signals
}

/// Classify a single piece of text, returning the first pain type whose
/// patterns match it.
#[must_use]
pub fn classify_text(text: &str) -> Option<PainType> {
    PAIN_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(pain_type, _)| *pain_type)
}

/// Every qualifying `(type, sentence)` match in one post, in pattern order.
fn scan_post(post: &Post) -> Vec<(PainType, String)> {
    let full_text = format!("{}. {}", post.title, strip_html(&post.description));

    let mut found = Vec::new();
    for (pain_type, re) in PAIN_PATTERNS.iter() {
        for m in re.find_iter(&full_text) {
            let sentence = surrounding_sentence(&full_text, m.start(), m.end());
            if sentence.chars().count() < MIN_SIGNAL_CHARS {
                continue;
            }
            found.push((*pain_type, sentence.to_string()));
        }
    }
    found
}

/// The trimmed sentence containing `text[start..end]`, or a window of
/// context around it when no single sentence spans the match.
fn surrounding_sentence(text: &str, start: usize, end: usize) -> &str {
    for m in SENTENCE_RE.find_iter(text) {
        if m.start() > start {
            break;
        }
        if m.end() >= end {
            return m.as_str().trim();
        }
    }

    let lo = text[..start]
        .char_indices()
        .rev()
        .nth(FALLBACK_WINDOW_CHARS - 1)
        .map_or(0, |(i, _)| i);
    let hi = text[end..]
        .char_indices()
        .nth(FALLBACK_WINDOW_CHARS)
        .map_or(text.len(), |(i, _)| end + i);
    text[lo..hi].trim()
}

/// Dedup state threaded through the reduction: one slot per
/// `(post_url, signal_type)`, remembering where its signal lives.
#[derive(Default)]
struct SignalAccumulator {
    signals: Vec<Signal>,
    slots: HashMap<(String, PainType), usize>,
}

impl SignalAccumulator {
    fn offer(&mut self, post: &Post, pain_type: PainType, sentence: String) {
        let key = (post.url.clone(), pain_type);
        if let Some(&idx) = self.slots.get(&key) {
            let existing = &mut self.signals[idx];
            if sentence.chars().count() > existing.signal_text.chars().count() {
                existing.signal_text = sentence;
            }
            return;
        }

        self.slots.insert(key, self.signals.len());
        self.signals.push(Signal {
            post_id: post.id,
            blog_id: post.blog_id,
            blog_name: post.blog_name.clone(),
            post_title: post.title.clone(),
            post_url: post.url.clone(),
            published: post.published.clone(),
            signal_text: sentence,
            signal_type: pain_type,
            score_breakdown: ScoreBreakdown::default(),
            impact_score: 0.0,
        });
    }

    fn into_signals(self) -> Vec<Signal> {
        self.signals
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
