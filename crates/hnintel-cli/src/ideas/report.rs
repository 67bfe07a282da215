//! Markdown and JSON reports for surfaced ideas.

use std::path::{Path, PathBuf};

use anyhow::Context;
use hnintel_ideas::Idea;
use serde::Serialize;

const MAX_QUOTES: usize = 3;

#[derive(Serialize)]
struct IdeasDocument<'a> {
    ideas: &'a [Idea],
}

/// Write `ideas.md` and `ideas.json` into `dir`, creating it if needed.
///
/// # Errors
///
/// Returns an error if the directory or either file cannot be written.
pub(crate) fn write_ideas_report(ideas: &[Idea], dir: &Path) -> anyhow::Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating report directory {}", dir.display()))?;

    let md_path = dir.join("ideas.md");
    std::fs::write(&md_path, render_markdown(ideas))
        .with_context(|| format!("writing {}", md_path.display()))?;

    let json_path = dir.join("ideas.json");
    let json = serde_json::to_string_pretty(&IdeasDocument { ideas })?;
    std::fs::write(&json_path, json)
        .with_context(|| format!("writing {}", json_path.display()))?;

    tracing::info!(
        ideas = ideas.len(),
        dir = %dir.display(),
        "wrote ideas reports"
    );
    Ok((md_path, json_path))
}

fn render_markdown(ideas: &[Idea]) -> String {
    let mut lines = vec!["# Project Ideas Report".to_string(), String::new()];

    if ideas.is_empty() {
        lines.push("No project ideas detected.".to_string());
        lines.push(String::new());
        return lines.join("\n");
    }

    for idea in ideas {
        lines.push(format!("## {}. {}", idea.idea_id + 1, idea.label));
        lines.push(format!(
            "**Impact Score**: {:.2} | **Blogs**: {} | **Signals**: {}",
            idea.impact_score, idea.blog_count, idea.signal_count
        ));
        lines.push(String::new());

        if !idea.justification.is_empty() {
            lines.push("### Justification".to_string());
            lines.push(String::new());
            lines.push(idea.justification.clone());
            lines.push(String::new());
        }

        if !idea.sources.is_empty() {
            lines.push("### Sources".to_string());
            lines.push(String::new());
            lines.push("| Blog | Post | Date | Pain Type |".to_string());
            lines.push("|------|------|------|-----------|".to_string());
            for s in &idea.sources {
                let date: String = s.published.chars().take(10).collect();
                let date = if date.is_empty() { "N/A".to_string() } else { date };
                lines.push(format!(
                    "| [{}]({}) | {} | {} | {} |",
                    escape_cell(&s.blog_name),
                    s.post_url,
                    escape_cell(&s.post_title),
                    date,
                    s.signal_type
                ));
            }
            lines.push(String::new());
        }

        let quotes: Vec<_> = idea
            .sources
            .iter()
            .filter(|s| !s.signal_text.is_empty())
            .take(MAX_QUOTES)
            .collect();
        if !quotes.is_empty() {
            lines.push("### Key Quotes".to_string());
            lines.push(String::new());
            for q in quotes {
                lines.push(format!("> \"{}\" - **{}**", q.signal_text, q.blog_name));
                lines.push(String::new());
            }
        }

        lines.push("---".to_string());
        lines.push(String::new());
    }
    lines.push(String::new());
    lines.join("\n")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
