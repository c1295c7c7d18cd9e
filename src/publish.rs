// src/publish.rs
//! Publisher boundary and post composition.
//!
//! The core does not know how publishing happens (browser automation, API,
//! webhook); it only hands over the already-committed winner. Composition of
//! the post body is pure string assembly and lives here so every publisher
//! renders the same shape.

use anyhow::Result;

use crate::article::Article;

#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    /// Publish one article. The item handed in is already recorded as
    /// posted in the history store.
    async fn publish(&self, article: &Article) -> Result<()>;
}

/// Render the social post body for an article: headline, a summary trimmed
/// to at most three sentences, the link, and a hashtag block.
pub fn compose_post(article: &Article) -> String {
    let title = article.title.trim();
    let summary = trim_summary(&article.summary, 3);
    let url = article.url.trim();
    let tag = article.topic_tag.replace(' ', "");

    let mut parts: Vec<String> = Vec::new();
    if !title.is_empty() {
        parts.push(title.to_string());
    }
    if !summary.is_empty() {
        parts.push(summary);
    }
    if !url.is_empty() {
        parts.push(format!("Read the full article: {}", url));
    }
    if !article.source.trim().is_empty() {
        parts.push(format!("via {}", article.source.trim()));
    }
    if !tag.is_empty() {
        parts.push(format!("#AI #TechNews #{}", tag));
    }

    parts.join("\n\n")
}

/// Keep the first `max_sentences` sentences of a summary, normalized to a
/// single trailing period.
fn trim_summary(summary: &str, max_sentences: usize) -> String {
    let sentences: Vec<&str> = summary
        .split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(max_sentences)
        .collect();
    if sentences.is_empty() {
        String::new()
    } else {
        format!("{}.", sentences.join(". "))
    }
}
