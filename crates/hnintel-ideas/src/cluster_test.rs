use super::*;
use crate::types::ScoreBreakdown;

fn signal(blog: &str, text: &str, pain_type: PainType, impact: f64) -> Signal {
    Signal {
        post_id: 1,
        blog_id: 1,
        blog_name: blog.to_string(),
        post_title: "Post".to_string(),
        post_url: format!("https://{blog}/{}", text.len()),
        published: String::new(),
        signal_text: text.to_string(),
        signal_type: pain_type,
        score_breakdown: ScoreBreakdown {
            trend: impact / 0.35,
            ..ScoreBreakdown::default()
        },
        impact_score: impact,
    }
}

fn model(vocabulary: &[&str], rows: Vec<Vec<f64>>) -> TfidfModel {
    TfidfModel {
        vocabulary: vocabulary.iter().map(|v| (*v).to_string()).collect(),
        rows,
    }
}

// -----------------------------------------------------------------------
// fast paths
// -----------------------------------------------------------------------

#[test]
fn no_signals_no_ideas() {
    assert!(cluster_signals(Vec::new(), None, 0.3).is_empty());
}

#[test]
fn single_signal_becomes_one_idea() {
    let ideas = cluster_signals(
        vec![signal("alpha", "hard to debug lambdas", PainType::Difficulty, 0.1)],
        None,
        0.3,
    );
    assert_eq!(ideas.len(), 1);
    let idea = &ideas[0];
    assert_eq!(idea.idea_id, 0);
    assert_eq!(idea.label, "General Improvement");
    assert!(idea.keywords.is_empty());
    assert_eq!(idea.signal_count, 1);
    assert_eq!(idea.blog_count, 1);
    // One blog out of one: breadth 1.0 adds 0.25.
    assert_eq!(idea.sources[0].score_breakdown.breadth, 1.0);
    assert!((idea.impact_score - 0.35).abs() < 1e-12);
}

#[test]
fn disabled_model_wraps_everything_in_one_idea() {
    let signals = vec![
        signal("alpha", "no good way to correlate logs", PainType::Gap, 0.0),
        signal("beta", "still no good way to search logs", PainType::Gap, 0.0),
    ];
    let ideas = cluster_signals(signals, None, 0.3);
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0].blog_count, 2);
    assert_eq!(ideas[0].signal_count, 2);
}

// -----------------------------------------------------------------------
// general path
// -----------------------------------------------------------------------

#[test]
fn similar_rows_merge_and_dissimilar_rows_stay_apart() {
    let signals = vec![
        signal("alpha", "kubernetes networking is painful", PainType::Difficulty, 0.1),
        signal("beta", "terraform state drift again", PainType::Broken, 0.2),
        signal("gamma", "kubernetes networking breaks", PainType::Difficulty, 0.05),
    ];
    let m = model(
        &["kubernetes", "networking", "terraform"],
        vec![
            vec![0.8, 0.6, 0.0],
            vec![0.0, 0.0, 1.0],
            vec![0.6, 0.8, 0.0],
        ],
    );
    let ideas = cluster_signals(signals, Some(&m), 0.3);
    assert_eq!(ideas.len(), 2);

    let k8s = ideas.iter().find(|i| i.signal_count == 2).unwrap();
    assert_eq!(k8s.keywords, vec!["kubernetes", "networking"]);
    assert_eq!(k8s.label, "Simplified Kubernetes Networking");
    assert_eq!(k8s.blog_count, 2);
    assert_eq!(k8s.representative_quote, "kubernetes networking is painful");

    let tf = ideas.iter().find(|i| i.signal_count == 1).unwrap();
    assert_eq!(tf.label, "Reliable Terraform");
}

#[test]
fn breadth_is_fraction_of_all_blogs() {
    let signals = vec![
        signal("alpha", "kubernetes networking is painful", PainType::Difficulty, 0.0),
        signal("beta", "terraform state drift", PainType::Broken, 0.0),
        signal("gamma", "python packaging", PainType::Gap, 0.0),
    ];
    let m = model(
        &["kubernetes", "python", "terraform"],
        vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0], vec![0.0, 1.0, 0.0]],
    );
    let ideas = cluster_signals(signals, Some(&m), 0.3);
    assert_eq!(ideas.len(), 3);
    for idea in &ideas {
        assert_eq!(idea.blog_count, 1);
        for source in &idea.sources {
            assert_eq!(source.score_breakdown.breadth, 0.3333);
        }
    }
}

#[test]
fn ideas_are_ranked_with_positional_ids() {
    let signals = vec![
        signal("alpha", "low impact thing", PainType::Gap, 0.05),
        signal("beta", "high impact thing", PainType::Wish, 0.3),
        signal("gamma", "middle impact thing", PainType::Broken, 0.1),
    ];
    let m = model(
        &["one", "three", "two"],
        vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]],
    );
    let ideas = cluster_signals(signals, Some(&m), 0.3);
    let quotes: Vec<&str> = ideas.iter().map(|i| i.representative_quote.as_str()).collect();
    assert_eq!(
        quotes,
        vec!["high impact thing", "middle impact thing", "low impact thing"]
    );
    for (pos, idea) in ideas.iter().enumerate() {
        assert_eq!(idea.idea_id, pos);
    }
    for pair in ideas.windows(2) {
        assert!(pair[0].impact_score >= pair[1].impact_score);
    }
}

#[test]
fn equal_scores_keep_cluster_order() {
    let signals = vec![
        signal("alpha", "first cluster text", PainType::Gap, 0.0),
        signal("beta", "second cluster text", PainType::Gap, 0.0),
    ];
    let m = model(&["aaa", "bbb"], vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    let ideas = cluster_signals(signals, Some(&m), 0.3);
    assert_eq!(ideas[0].representative_quote, "first cluster text");
    assert_eq!(ideas[1].representative_quote, "second cluster text");
}

#[test]
fn sources_are_sorted_by_prior_impact_and_counts_hold() {
    let signals = vec![
        signal("alpha", "logs search one", PainType::Gap, 0.1),
        signal("alpha", "logs search two", PainType::Wish, 0.3),
        signal("beta", "logs search three", PainType::Gap, 0.2),
    ];
    let m = model(&["logs"], vec![vec![1.0], vec![1.0], vec![1.0]]);
    let ideas = cluster_signals(signals, Some(&m), 0.3);
    assert_eq!(ideas.len(), 1);
    let idea = &ideas[0];
    let texts: Vec<&str> = idea.sources.iter().map(|s| s.signal_text.as_str()).collect();
    assert_eq!(texts, vec!["logs search two", "logs search three", "logs search one"]);
    assert_eq!(idea.signal_count, idea.sources.len());
    assert_eq!(idea.blog_count, 2);
    assert_eq!(idea.pain_type_breakdown.get(PainType::Gap), 2);
    assert_eq!(idea.label, "Logs Solution");
    assert!(!idea.justification.is_empty());
}

#[test]
fn idea_score_is_max_recomputed_member_score() {
    let signals = vec![
        signal("alpha", "logs one", PainType::Gap, 0.35),
        signal("beta", "logs two", PainType::Gap, 0.0),
    ];
    let m = model(&["logs"], vec![vec![1.0], vec![1.0]]);
    let ideas = cluster_signals(signals, Some(&m), 0.3);
    // trend 1.0 and breadth 2/2.
    assert!((ideas[0].impact_score - 0.6).abs() < 1e-12);
}

// -----------------------------------------------------------------------
// helpers
// -----------------------------------------------------------------------

#[test]
fn keywords_skip_zero_weights() {
    let m = model(&["aaa", "bbb", "ccc"], vec![vec![0.0, 1.0, 0.0]]);
    assert_eq!(centroid_keywords(&m, &[0]), vec!["bbb"]);
}

#[test]
fn keywords_break_ties_by_feature_index() {
    let m = model(
        &["aaa", "bbb", "ccc", "ddd", "eee", "fff"],
        vec![vec![0.4; 6]],
    );
    assert_eq!(
        centroid_keywords(&m, &[0]),
        vec!["aaa", "bbb", "ccc", "ddd", "eee"]
    );
}

#[test]
fn label_templates_follow_dominant_type() {
    let kws = vec!["database".to_string(), "schema migration".to_string()];
    let breakdown = PainTypeBreakdown::from_signals(&[
        signal("a", "x", PainType::Opportunity, 0.0),
        signal("a", "y", PainType::Wish, 0.0),
        signal("a", "z", PainType::Wish, 0.0),
    ]);
    assert_eq!(
        generate_label(&kws, &breakdown),
        "Better Database Schema Migration"
    );
    assert_eq!(
        generate_label(&[], &breakdown),
        "General Improvement"
    );
}

#[test]
fn title_case_matches_word_starts() {
    assert_eq!(title_case("k8s operator"), "K8S Operator");
    assert_eq!(title_case("ci pipelines"), "Ci Pipelines");
}
