//! `ideas` command: run the pipeline over a snapshot and print the results.

mod report;

use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Args;
use hnintel_core::{parse_reference_date, parse_similarity_threshold, AppConfig};
use hnintel_ideas::{generate_ideas_with, summarize_idea, title_case, Idea, IdeasParams};

pub(crate) use report::write_ideas_report;

/// Flags for `ideas`. Anything left unset falls back to the environment config.
#[derive(Debug, Args)]
pub struct IdeasArgs {
    /// Snapshot file (JSON, or YAML by extension)
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Max TF-IDF features (capped at 200)
    #[arg(long)]
    pub max_features: Option<usize>,

    /// Number of ideas to surface
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Minimum average cosine similarity for signals to share an idea
    #[arg(long, value_parser = parse_similarity_threshold)]
    pub similarity_threshold: Option<f64>,

    /// Pin "today" for recency scoring (YYYY-MM-DD)
    #[arg(long, value_parser = parse_reference_date)]
    pub reference_date: Option<NaiveDate>,

    /// Directory to write ideas.md and ideas.json into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl IdeasArgs {
    fn params(&self, config: &AppConfig) -> IdeasParams {
        IdeasParams {
            max_features: self.max_features.unwrap_or(config.max_features),
            top_n: self.top_n.unwrap_or(config.top_n),
            similarity_threshold: self
                .similarity_threshold
                .unwrap_or(config.similarity_threshold),
            reference_date: self
                .reference_date
                .or(config.reference_date)
                .unwrap_or_else(|| Utc::now().date_naive()),
        }
    }
}

/// Load the snapshot, surface ideas, print them and optionally write reports.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or a report cannot be written.
pub(crate) fn run_ideas(config: &AppConfig, args: &IdeasArgs) -> anyhow::Result<()> {
    let snapshot_path = args
        .snapshot
        .clone()
        .unwrap_or_else(|| config.snapshot_path.clone());
    let snapshot = hnintel_core::load_snapshot(&snapshot_path)
        .with_context(|| format!("loading snapshot {}", snapshot_path.display()))?;

    let params = args.params(config);
    tracing::info!(
        posts = snapshot.posts.len(),
        emerging = snapshot.emerging.len(),
        blogs_with_authority = snapshot.authority.len(),
        reference_date = %params.reference_date,
        "surfacing project ideas"
    );

    let ideas = generate_ideas_with(
        &snapshot.posts,
        &snapshot.emerging,
        &snapshot.authority,
        &params,
    );

    print!("{}", render_ideas(&ideas));

    if let Some(dir) = args.output_dir.as_ref().or(config.output_dir.as_ref()) {
        let (md_path, json_path) = write_ideas_report(&ideas, dir)?;
        println!("Reports written to {}/:", dir.display());
        println!("  {}", md_path.display());
        println!("  {}", json_path.display());
    }

    Ok(())
}

/// Console listing of the condensed view of each idea.
fn render_ideas(ideas: &[Idea]) -> String {
    if ideas.is_empty() {
        return "No project ideas found. Try fetching more posts first.\n".to_string();
    }

    let mut lines = vec![format!("Found {} project ideas:", ideas.len()), String::new()];
    for idea in ideas {
        let summary = summarize_idea(idea);
        lines.push(format!("  {}. {}", summary.rank, title_case(&summary.label)));
        lines.push(format!(
            "     Impact: {:.2} | Blogs: {} | Signals: {}",
            summary.impact_score, summary.blog_count, summary.signal_count
        ));
        if !summary.quote.is_empty() {
            lines.push(format!("     \"{}...\"", summary.quote));
        }
        lines.push("     Sources:".to_string());
        lines.extend(
            summary
                .sources
                .iter()
                .map(|source| format!("       - {}: {}", source.blog_name, source.post_url)),
        );
        lines.push(String::new());
    }
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
#[path = "ideas_test.rs"]
mod tests;
