//! TF-IDF keyword vectors over signal texts.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::types::Signal;

/// Hard ceiling on vocabulary size, whatever the caller asks for.
pub const MAX_FEATURES_CAP: usize = 200;

/// Terms found in more than this fraction of documents are dropped.
const MAX_DF_RATIO: f64 = 0.8;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-zA-Z][a-zA-Z0-9]{2,}\b").expect("valid regex"));

/// General English stop words.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
    "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
    "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together",
    "too", "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up",
    "upon", "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when",
    "whence", "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon",
    "wherever", "whether", "which", "while", "whither", "who", "whoever", "whole", "whom",
    "whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your",
    "yours", "yourself", "yourselves",
];

/// Pain-trigger and filler vocabulary. Detection already keys on these words,
/// so keeping them would make every cluster label about "frustrating" things.
const PAIN_STOP_WORDS: &[&str] = &[
    "wish", "would", "nice", "someone", "should", "hope", "really", "need", "frustrat",
    "frustrating", "frustrated", "annoy", "annoying", "annoyed", "pain", "point", "drives",
    "crazy", "maddening", "good", "way", "tool", "solution", "missing", "lacking", "gap",
    "underserved", "easy", "reliable", "decent", "still", "exist", "unmet", "hard", "difficult",
    "impossible", "struggle", "struggling", "complicated", "complex", "long", "painful",
    "broken", "work", "unreliable", "flaky", "buggy", "unusable", "failing", "fragile",
    "opportunity", "untapped", "demand", "ripe", "disruption", "market", "room", "space",
    "begging", "people", "things", "just", "like", "think", "know", "want", "make", "going",
    "don", "doesn", "didn", "isn", "wasn", "aren", "won", "can", "lot", "much", "many", "even",
    "also", "actually", "right", "new", "old", "try", "tried", "trying", "able", "said", "says",
    "kind", "sort",
];

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ENGLISH_STOP_WORDS
        .iter()
        .chain(PAIN_STOP_WORDS)
        .copied()
        .collect()
});

/// A fitted TF-IDF model: alphabetical vocabulary plus one L2-normalized row
/// per signal, in signal order.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfModel {
    pub vocabulary: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl TfidfModel {
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Fit TF-IDF over the signal texts.
///
/// Returns `None` (the disabled state) for fewer than two signals or when
/// document-frequency pruning leaves no terms. `max_features` is clamped to
/// `[1, MAX_FEATURES_CAP]`.
#[must_use]
pub fn vectorize_signals(signals: &[Signal], max_features: usize) -> Option<TfidfModel> {
    if signals.len() < 2 {
        return None;
    }
    let max_features = max_features.clamp(1, MAX_FEATURES_CAP);

    let docs: Vec<BTreeMap<String, usize>> = signals
        .iter()
        .map(|s| term_counts(&s.signal_text))
        .collect();
    let n_docs = docs.len();

    // term -> (document frequency, corpus frequency)
    let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for doc in &docs {
        for (term, &count) in doc {
            let entry = stats.entry(term.as_str()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += count;
        }
    }

    let min_df = n_docs.min(2);
    #[allow(clippy::cast_precision_loss)]
    let max_df = MAX_DF_RATIO * n_docs as f64;

    #[allow(clippy::cast_precision_loss)]
    let mut kept: Vec<(&str, usize, usize)> = stats
        .into_iter()
        .filter(|&(_, (df, _))| df >= min_df && (df as f64) <= max_df)
        .map(|(term, (df, tf))| (term, df, tf))
        .collect();

    if kept.is_empty() {
        tracing::debug!(signals = n_docs, "no terms survived pruning; vectorizer disabled");
        return None;
    }

    if kept.len() > max_features {
        kept.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));
        kept.truncate(max_features);
    }
    kept.sort_by(|a, b| a.0.cmp(b.0));

    #[allow(clippy::cast_precision_loss)]
    let idf: Vec<f64> = kept
        .iter()
        .map(|&(_, df, _)| ((1.0 + n_docs as f64) / (1.0 + df as f64)).ln() + 1.0)
        .collect();

    let rows = docs
        .iter()
        .map(|doc| {
            #[allow(clippy::cast_precision_loss)]
            let mut row: Vec<f64> = kept
                .iter()
                .zip(&idf)
                .map(|(&(term, _, _), &w)| doc.get(term).map_or(0.0, |&c| c as f64 * w))
                .collect();
            l2_normalize(&mut row);
            row
        })
        .collect();

    let vocabulary: Vec<String> = kept.into_iter().map(|(t, _, _)| t.to_string()).collect();
    tracing::debug!(
        signals = n_docs,
        features = vocabulary.len(),
        "fitted signal vectorizer"
    );

    Some(TfidfModel { vocabulary, rows })
}

/// Surviving unigrams plus bigrams of adjacent surviving unigrams.
fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let unigrams: Vec<&str> = TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(*t))
        .collect();

    let mut terms: Vec<String> = unigrams.iter().map(|t| (*t).to_string()).collect();
    terms.extend(unigrams.windows(2).map(|w| format!("{} {}", w[0], w[1])));
    terms
}

fn term_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for term in tokenize(text) {
        *counts.entry(term).or_insert(0) += 1;
    }
    counts
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in row.iter_mut() {
            *v /= norm;
        }
    }
}
