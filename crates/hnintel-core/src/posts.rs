use serde::{Deserialize, Deserializer, Serialize};

/// A blog post as stored by the feed ingester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub blog_id: i64,
    pub blog_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub url: String,
    /// ISO-8601 date or timestamp as the feed reported it. May be empty or
    /// in a non-ISO format; consumers must tolerate both.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub published: String,
    /// Raw HTML body or summary from the feed.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

/// A keyword whose usage is accelerating across recent periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmergingTopic {
    pub keyword: String,
    /// Ratio of recent to historical usage. Always positive when produced by
    /// the trend analyzer.
    pub acceleration: f64,
    #[serde(default)]
    pub recent_score: f64,
    #[serde(default)]
    pub historical_avg: f64,
}

/// Citation-graph centrality for one blog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogAuthority {
    /// PageRank in `[0.0, 1.0]`.
    pub pagerank: f64,
    #[serde(default)]
    pub betweenness: f64,
    #[serde(default)]
    pub in_degree: u32,
    #[serde(default)]
    pub out_degree: u32,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
