// src/relevance.rs
//! Relevance scoring: bounded numeric scores for candidate articles.
//!
//! One scorer, two strategies. The keyword-weighted strategy ranks
//! API-sourced items by weighted keyword hits (ceiling 5.0). The
//! bucket-weighted strategy ranks freshly scraped, unstructured content with
//! fixed weight buckets (ceiling 1.0). Both are deterministic pure functions
//! of their inputs, so runs are reproducible.

use crate::article::Article;
use crate::config::{CuratorConfig, ScoreStrategy};

/// Ceiling for the keyword-weighted strategy.
pub const KEYWORD_SCORE_CAP: f32 = 5.0;
/// Ceiling for the bucket-weighted strategy.
pub const BUCKET_SCORE_CAP: f32 = 1.0;

/// Fixed technical keyword set used by the bucket-weighted strategy.
const TECHNICAL_KEYWORDS: [&str; 6] = [
    "ai",
    "ml",
    "artificial intelligence",
    "machine learning",
    "neural",
    "deep learning",
];

/// Scores articles against a configured keyword/topic signal set.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    strategy: ScoreStrategy,
    /// Lower-cased; matching is case-insensitive substring.
    keywords: Vec<String>,
    topic: String,
    min_word_count: usize,
}

impl RelevanceScorer {
    pub fn new(
        strategy: ScoreStrategy,
        keywords: impl IntoIterator<Item = impl Into<String>>,
        topic: impl Into<String>,
        min_word_count: usize,
    ) -> Self {
        Self {
            strategy,
            keywords: keywords
                .into_iter()
                .map(|k| k.into().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            topic: topic.into().to_lowercase(),
            min_word_count,
        }
    }

    pub fn from_config(cfg: &CuratorConfig) -> Self {
        Self::new(
            cfg.strategy,
            cfg.keywords.iter().cloned(),
            cfg.topic.clone(),
            cfg.min_word_count,
        )
    }

    /// The ceiling scores are clamped to under the active strategy.
    pub fn upper_bound(&self) -> f32 {
        match self.strategy {
            ScoreStrategy::KeywordWeighted => KEYWORD_SCORE_CAP,
            ScoreStrategy::BucketWeighted => BUCKET_SCORE_CAP,
        }
    }

    /// Score an article. Always within `[0.0, upper_bound()]`.
    pub fn score(&self, article: &Article) -> f32 {
        match self.strategy {
            ScoreStrategy::KeywordWeighted => self.score_keyword_weighted(article),
            ScoreStrategy::BucketWeighted => self.score_bucket_weighted(article),
        }
    }

    /// Per configured keyword: +2.0 in title, +1.0 in summary, +0.5 in
    /// content. Hits accumulate additively; the sum is capped at 5.0.
    fn score_keyword_weighted(&self, article: &Article) -> f32 {
        let title = article.title.to_lowercase();
        let summary = article.summary.to_lowercase();
        let content = article.content.to_lowercase();

        let mut score = 0.0f32;
        for keyword in &self.keywords {
            if title.contains(keyword.as_str()) {
                score += 2.0;
            }
            if summary.contains(keyword.as_str()) {
                score += 1.0;
            }
            if content.contains(keyword.as_str()) {
                score += 0.5;
            }
        }

        score.min(KEYWORD_SCORE_CAP)
    }

    /// Fixed weight buckets, each capped independently, summed and clamped
    /// to 1.0:
    /// - topic present in title+content: +0.3
    /// - technical keyword hits, 2 hits for the full +0.4, fewer linear
    /// - topic in title +0.2, else any technical keyword in title +0.1
    /// - content length >= `min_word_count` words: +0.1
    fn score_bucket_weighted(&self, article: &Article) -> f32 {
        let title = article.title.to_lowercase();
        let text = format!("{} {}", title, article.content.to_lowercase());

        let mut score = 0.0f32;

        if !self.topic.is_empty() && text.contains(self.topic.as_str()) {
            score += 0.3;
        }

        let hits = TECHNICAL_KEYWORDS
            .iter()
            .filter(|k| text.contains(*k))
            .count();
        if hits > 0 {
            score += 0.4 * (hits as f32 / 2.0).min(1.0);
        }

        if !self.topic.is_empty() && title.contains(self.topic.as_str()) {
            score += 0.2;
        } else if TECHNICAL_KEYWORDS.iter().any(|k| title.contains(*k)) {
            score += 0.1;
        }

        let words = article.content.split_whitespace().count();
        if words >= self.min_word_count {
            score += 0.1;
        }

        score.min(BUCKET_SCORE_CAP)
    }
}
