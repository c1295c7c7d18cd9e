// src/config.rs
//! Curator configuration: filter thresholds, keyword list, dedup window, and
//! the scoring strategy. Loads from TOML or JSON with coded defaults.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "CURATOR_CONFIG_PATH";

pub const DEFAULT_MIN_RELEVANCE_SCORE: f32 = 0.5;
pub const DEFAULT_MAX_ARTICLES: usize = 3;
pub const DEFAULT_DEDUP_WINDOW_DAYS: i64 = 30;
pub const DEFAULT_MIN_WORD_COUNT: usize = 100;
pub const DEFAULT_HISTORY_PATH: &str = "posts.json";

/// Which relevance strategy the pipeline scores with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreStrategy {
    /// Per-keyword weighted hits in title/summary/content, capped at 5.0.
    #[default]
    KeywordWeighted,
    /// Fixed weight buckets for scraped, unstructured content, capped at 1.0.
    BucketWeighted,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    pub min_relevance_score: f32,
    pub max_articles: usize,
    /// Lower-cased on load; matching is case-insensitive substring.
    pub keywords: Vec<String>,
    pub dedup_window_days: i64,
    pub strategy: ScoreStrategy,
    /// Topic signal for the bucket-weighted strategy.
    pub topic: String,
    /// Word-count floor for the bucket-weighted length bonus.
    pub min_word_count: usize,
    pub history_path: PathBuf,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            min_relevance_score: DEFAULT_MIN_RELEVANCE_SCORE,
            max_articles: DEFAULT_MAX_ARTICLES,
            keywords: Vec::new(),
            dedup_window_days: DEFAULT_DEDUP_WINDOW_DAYS,
            strategy: ScoreStrategy::default(),
            topic: crate::article::DEFAULT_TOPIC.to_string(),
            min_word_count: DEFAULT_MIN_WORD_COUNT,
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
        }
    }
}

impl CuratorConfig {
    /// Load from an explicit path. Supports TOML or JSON, picked by extension
    /// with a content-sniffing fallback.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading curator config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let mut cfg = parse_config(&content, ext.as_str())?;
        cfg.normalize();
        Ok(cfg)
    }

    /// Load using env var + fallback:
    /// 1) $CURATOR_CONFIG_PATH
    /// 2) config/curator.toml
    /// 3) coded defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("CURATOR_CONFIG_PATH points to non-existent path"));
            }
        }
        let toml_p = PathBuf::from("config/curator.toml");
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        Ok(Self::default())
    }

    /// Lower-case keywords, drop empties, and clamp odd numeric values back
    /// to sane defaults.
    fn normalize(&mut self) {
        self.keywords = self
            .keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        if !self.min_relevance_score.is_finite() {
            self.min_relevance_score = DEFAULT_MIN_RELEVANCE_SCORE;
        }
        if self.dedup_window_days <= 0 {
            self.dedup_window_days = DEFAULT_DEDUP_WINDOW_DAYS;
        }
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<CuratorConfig> {
    let try_toml = hint_ext == "toml" || !s.trim_start().starts_with('{');
    if try_toml {
        if let Ok(v) = toml::from_str(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = serde_json::from_str(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = toml::from_str(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported curator config format"))
}
