//! End-to-end runs of the ideas pipeline over a small in-memory corpus.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use hnintel_core::{BlogAuthority, EmergingTopic, Post};
use hnintel_ideas::{generate_ideas, generate_ideas_with, IdeasParams, PainType};

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn params(top_n: usize) -> IdeasParams {
    IdeasParams {
        max_features: 500,
        top_n,
        similarity_threshold: 0.3,
        reference_date: reference_date(),
    }
}

fn post(id: i64, blog: &str, description: &str, published: &str) -> Post {
    Post {
        id,
        blog_id: i64::from(blog.as_bytes()[0]),
        blog_name: blog.to_string(),
        title: "Notes".to_string(),
        url: format!("https://{}.example.com/posts/{id}", blog.to_lowercase()),
        published: published.to_string(),
        description: description.to_string(),
    }
}

fn corpus() -> Vec<Post> {
    vec![
        post(
            1,
            "Alpha",
            "<p>Kubernetes networking is hard to debug across clusters.</p>",
            "2025-02-01",
        ),
        post(
            2,
            "Beta",
            "<p>Kubernetes networking is painful to debug without packet captures.</p>",
            "2024-11-12T10:00:00Z",
        ),
        post(
            3,
            "Gamma",
            "<p>Terraform state locking is fragile when several teams apply changes.</p>",
            "2024-06-30",
        ),
        post(
            4,
            "Alpha",
            "<p>Our Terraform state locking keeps failing in CI pipelines.</p>",
            "",
        ),
        post(
            5,
            "Beta",
            "<p>Python packaging is so frustrating for beginners &amp; experts alike.</p>",
            "not a date",
        ),
        post(
            6,
            "Gamma",
            "<p>We benchmarked three compilers on the same workload.</p>",
            "2025-01-15",
        ),
    ]
}

fn emerging() -> Vec<EmergingTopic> {
    vec![
        EmergingTopic {
            keyword: "kubernetes".to_string(),
            acceleration: 3.0,
            recent_score: 12.0,
            historical_avg: 4.0,
        },
        EmergingTopic {
            keyword: "terraform".to_string(),
            acceleration: 1.5,
            recent_score: 6.0,
            historical_avg: 4.0,
        },
    ]
}

fn authority() -> BTreeMap<String, BlogAuthority> {
    [("Alpha", 0.5), ("Beta", 0.25), ("Gamma", 0.1)]
        .into_iter()
        .map(|(name, pagerank)| {
            (
                name.to_string(),
                BlogAuthority {
                    pagerank,
                    betweenness: 0.0,
                    in_degree: 1,
                    out_degree: 1,
                },
            )
        })
        .collect()
}

#[test]
fn empty_posts_produce_no_ideas() {
    assert!(generate_ideas(&[], &[], &BTreeMap::new(), 500, 20).is_empty());
}

#[test]
fn posts_without_pain_language_produce_no_ideas() {
    let posts = vec![post(
        1,
        "Alpha",
        "<p>We benchmarked three compilers on the same workload.</p>",
        "2025-01-15",
    )];
    assert!(generate_ideas_with(&posts, &emerging(), &authority(), &params(20)).is_empty());
}

#[test]
fn log_search_signals_from_two_blogs_form_one_idea() {
    let posts = vec![
        post(1, "Alpha", "There is no good way to correlate logs.", "2025-02-01"),
        post(2, "Beta", "There is still no good way to search logs.", "2025-02-01"),
    ];
    let ideas = generate_ideas_with(&posts, &[], &BTreeMap::new(), &params(20));
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0].blog_count, 2);
    assert_eq!(ideas[0].signal_count, 2);
    assert!(ideas[0]
        .sources
        .iter()
        .all(|s| s.signal_type == PainType::Gap));
}

#[test]
fn log_search_signals_share_an_idea_within_larger_corpus() {
    let posts = vec![
        post(1, "Alpha", "There is no good way to correlate logs.", "2025-02-01"),
        post(2, "Beta", "There is still no good way to search logs.", "2025-02-01"),
        post(3, "Gamma", "Python packaging is so frustrating for beginners.", "2025-01-10"),
        post(4, "Delta", "Our Kubernetes upgrades are fragile.", "2024-12-01"),
        post(5, "Gamma", "Monorepo builds are hard to cache.", "2024-10-20"),
    ];
    let ideas = generate_ideas_with(&posts, &[], &BTreeMap::new(), &params(20));
    assert_eq!(ideas.len(), 4);
    assert_eq!(ideas.iter().map(|i| i.signal_count).sum::<usize>(), 5);

    let logs = ideas
        .iter()
        .find(|i| i.sources.iter().any(|s| s.blog_name == "Alpha"))
        .unwrap();
    assert_eq!(logs.blog_count, 2);
    assert_eq!(logs.signal_count, 2);
    assert_eq!(logs.keywords, vec!["logs".to_string()]);
    assert_eq!(logs.label, "Logs Solution");
    let mut blogs: Vec<&str> = logs.sources.iter().map(|s| s.blog_name.as_str()).collect();
    blogs.sort_unstable();
    assert_eq!(blogs, vec!["Alpha", "Beta"]);
    assert!(logs.sources.iter().all(|s| s.signal_text.contains("logs")));
}

#[test]
fn ideas_satisfy_structural_invariants() {
    let ideas = generate_ideas_with(&corpus(), &emerging(), &authority(), &params(20));
    assert!(!ideas.is_empty());

    let all_blogs: HashSet<&str> = ideas
        .iter()
        .flat_map(|i| i.sources.iter().map(|s| s.blog_name.as_str()))
        .collect();

    for (position, idea) in ideas.iter().enumerate() {
        assert_eq!(idea.idea_id, position);
        assert_eq!(idea.signal_count, idea.sources.len());
        let blogs: HashSet<&str> = idea.sources.iter().map(|s| s.blog_name.as_str()).collect();
        assert_eq!(idea.blog_count, blogs.len());
        assert!(!idea.justification.is_empty());
        assert!((0.0..=1.0).contains(&idea.impact_score));

        #[allow(clippy::cast_precision_loss)]
        let expected_breadth =
            ((idea.blog_count as f64 / all_blogs.len() as f64) * 10_000.0).round() / 10_000.0;
        for s in &idea.sources {
            let b = s.score_breakdown;
            for v in [b.trend, b.authority, b.breadth, b.recency, s.impact_score] {
                assert!((0.0..=1.0).contains(&v), "{v} out of range for {s:?}");
            }
            assert_eq!(b.breadth, expected_breadth);
            assert!(s.signal_text.chars().count() >= 10);
        }
    }

    for pair in ideas.windows(2) {
        assert!(pair[0].impact_score >= pair[1].impact_score);
    }
}

#[test]
fn one_signal_per_post_and_type() {
    let ideas = generate_ideas_with(&corpus(), &emerging(), &authority(), &params(20));
    let mut keys = HashSet::new();
    for s in ideas.iter().flat_map(|i| &i.sources) {
        assert!(keys.insert((s.post_url.clone(), s.signal_type)), "duplicate {s:?}");
    }
    assert_eq!(keys.len(), 5);
}

#[test]
fn runs_are_deterministic() {
    let first = generate_ideas_with(&corpus(), &emerging(), &authority(), &params(20));
    let second = generate_ideas_with(&corpus(), &emerging(), &authority(), &params(20));
    assert_eq!(first, second);
}

#[test]
fn top_n_truncates_ranked_list() {
    let all = generate_ideas_with(&corpus(), &emerging(), &authority(), &params(20));
    let top = generate_ideas_with(&corpus(), &emerging(), &authority(), &params(1));
    assert_eq!(top.len(), 1);
    assert_eq!(top[0], all[0]);
}

#[test]
fn ideas_serialize_with_expected_field_names() {
    let ideas = generate_ideas_with(&corpus(), &emerging(), &authority(), &params(20));
    let json = serde_json::to_value(&ideas).unwrap();
    let first = &json[0];
    for field in [
        "idea_id",
        "label",
        "impact_score",
        "justification",
        "keywords",
        "signal_count",
        "blog_count",
        "pain_type_breakdown",
        "representative_quote",
        "sources",
    ] {
        assert!(first.get(field).is_some(), "missing {field}");
    }
    assert!(first["sources"][0]["score_breakdown"]["breadth"].is_number());
}
