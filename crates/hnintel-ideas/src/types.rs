use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Category of unmet need a pain signal expresses.
///
/// Variant order is the order the extractor scans pattern sets in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PainType {
    Wish,
    Frustration,
    Gap,
    Difficulty,
    Broken,
    Opportunity,
}

impl PainType {
    pub const ALL: [PainType; 6] = [
        PainType::Wish,
        PainType::Frustration,
        PainType::Gap,
        PainType::Difficulty,
        PainType::Broken,
        PainType::Opportunity,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PainType::Wish => "wish",
            PainType::Frustration => "frustration",
            PainType::Gap => "gap",
            PainType::Difficulty => "difficulty",
            PainType::Broken => "broken",
            PainType::Opportunity => "opportunity",
        }
    }
}

impl std::fmt::Display for PainType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-factor scores, each in `[0.0, 1.0]` and stored rounded to 4 decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub trend: f64,
    pub authority: f64,
    pub breadth: f64,
    pub recency: f64,
}

impl ScoreBreakdown {
    pub const TREND_WEIGHT: f64 = 0.35;
    pub const AUTHORITY_WEIGHT: f64 = 0.25;
    pub const BREADTH_WEIGHT: f64 = 0.25;
    pub const RECENCY_WEIGHT: f64 = 0.15;

    /// Weighted composite of the four factors, rounded to 4 decimals.
    #[must_use]
    pub fn impact(&self) -> f64 {
        round4(
            Self::TREND_WEIGHT * self.trend
                + Self::AUTHORITY_WEIGHT * self.authority
                + Self::BREADTH_WEIGHT * self.breadth
                + Self::RECENCY_WEIGHT * self.recency,
        )
    }
}

/// A sentence-level excerpt expressing unmet need, with full provenance back
/// to the post and blog it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub post_id: i64,
    pub blog_id: i64,
    pub blog_name: String,
    pub post_title: String,
    pub post_url: String,
    pub published: String,
    pub signal_text: String,
    pub signal_type: PainType,
    /// Zeroed until the scorer runs; breadth stays zero until clustering.
    #[serde(default)]
    pub score_breakdown: ScoreBreakdown,
    #[serde(default)]
    pub impact_score: f64,
}

/// Pain-type counts in first-seen order.
///
/// Serialized as a JSON object (`{"gap": 2, "wish": 1}`) keeping that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PainTypeBreakdown(Vec<(PainType, usize)>);

impl PainTypeBreakdown {
    /// Count signal types in the order they are first encountered.
    #[must_use]
    pub fn from_signals<'a, I>(signals: I) -> Self
    where
        I: IntoIterator<Item = &'a Signal>,
    {
        let mut counts: Vec<(PainType, usize)> = Vec::new();
        for signal in signals {
            match counts.iter_mut().find(|(t, _)| *t == signal.signal_type) {
                Some((_, n)) => *n += 1,
                None => counts.push((signal.signal_type, 1)),
            }
        }
        Self(counts)
    }

    #[must_use]
    pub fn get(&self, pain_type: PainType) -> usize {
        self.0
            .iter()
            .find(|(t, _)| *t == pain_type)
            .map_or(0, |(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PainType, usize)> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most frequent type; on ties, the one seen first.
    #[must_use]
    pub fn dominant(&self) -> Option<PainType> {
        let mut best: Option<(PainType, usize)> = None;
        for &(t, n) in &self.0 {
            if best.map_or(true, |(_, best_n)| n > best_n) {
                best = Some((t, n));
            }
        }
        best.map(|(t, _)| t)
    }

    /// Entries by descending count; equal counts keep first-seen order.
    #[must_use]
    pub fn by_count_desc(&self) -> Vec<(PainType, usize)> {
        let mut sorted = self.0.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl Serialize for PainTypeBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (pain_type, count) in &self.0 {
            map.serialize_entry(pain_type, count)?;
        }
        map.end()
    }
}

/// A cluster of related pain signals representing one candidate project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Idea {
    /// Zero-based rank after final sorting.
    pub idea_id: usize,
    pub label: String,
    pub impact_score: f64,
    pub justification: String,
    /// Top centroid terms, highest weight first.
    pub keywords: Vec<String>,
    pub signal_count: usize,
    pub blog_count: usize,
    pub pain_type_breakdown: PainTypeBreakdown,
    pub representative_quote: String,
    /// Member signals, highest pre-clustering impact first.
    pub sources: Vec<Signal>,
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
