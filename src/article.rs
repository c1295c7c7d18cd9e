// src/article.rs
//! Normalized article model — the one shape every source adapter must emit
//! before the selection core will look at it.

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOPIC: &str = "artificial intelligence";
pub const DEFAULT_TOPIC_TAG: &str = "AI";
pub const DEFAULT_RELEVANCE_SCORE: f32 = 0.8;

/// A candidate article as delivered by a source adapter.
///
/// `url` is the identity: two articles with equal `url` are the same item,
/// whatever the other fields say. `relevance_score` is overwritten by the
/// scorer during selection; the adapter-provided value is a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub source: String,
    /// Source-reported timestamp, format unconstrained. Display only; the
    /// core never parses it.
    #[serde(default)]
    pub published_at: String,
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_topic_tag")]
    pub topic_tag: String,
    #[serde(default = "default_relevance_score")]
    pub relevance_score: f32,
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

fn default_topic_tag() -> String {
    DEFAULT_TOPIC_TAG.to_string()
}

fn default_relevance_score() -> f32 {
    DEFAULT_RELEVANCE_SCORE
}

impl Default for Article {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: String::new(),
            summary: String::new(),
            content: String::new(),
            source: String::new(),
            published_at: String::new(),
            topic: default_topic(),
            topic_tag: default_topic_tag(),
            relevance_score: DEFAULT_RELEVANCE_SCORE,
        }
    }
}

impl Article {
    /// Minimal constructor for adapters that only have a title and link.
    /// Everything else takes the base-formatting defaults.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>, tag: impl Into<String>) -> Self {
        self.topic = topic.into();
        self.topic_tag = tag.into();
        self
    }
}
