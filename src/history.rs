// src/history.rs
//! Posting history: which URLs (and optionally topics) have already been
//! published, with time-windowed lookups.
//!
//! Backed by a single JSON document on disk. Every operation opens the file,
//! does its work, and closes it again — no handle is held between calls.
//! Lookups fail open: an unreachable store must not block the pipeline, at
//! the cost of a possible duplicate post.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Default lookback window for "was this posted recently?" checks.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// One published item. Created exactly once, when an article wins selection.
/// `title` is denormalized for audit display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostedRecord {
    pub url: String,
    pub title: String,
    pub posted_at: DateTime<Utc>,
}

/// On-disk shape: URL-keyed records plus an optional topic ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    posted_urls: HashMap<String, PostedRecord>,
    #[serde(default)]
    posted_topics: HashMap<String, DateTime<Utc>>,
}

/// Persistent posting history, exclusive owner of the record file.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True iff `url` was marked posted within the last `window_days` days.
    /// Returns `false` on any storage failure (logged as a warning).
    pub fn was_posted_recently(&self, url: &str, window_days: i64) -> bool {
        match self.load() {
            Ok(file) => match file.posted_urls.get(url) {
                Some(rec) => rec.posted_at > Utc::now() - Duration::days(window_days),
                None => false,
            },
            Err(e) => {
                warn!(error = ?e, url, "history lookup failed; treating as not posted");
                false
            }
        }
    }

    /// `was_posted_recently` with the default 30-day window.
    pub fn was_posted_recently_default(&self, url: &str) -> bool {
        self.was_posted_recently(url, DEFAULT_WINDOW_DAYS)
    }

    /// Record `url` as posted now. Idempotent: a repeated mark refreshes
    /// `posted_at`. Failures are logged and swallowed.
    pub fn mark_posted(&self, url: &str, title: &str) {
        self.mark_posted_at(url, title, Utc::now());
    }

    /// Record `url` as posted at an explicit timestamp (history imports and
    /// tests; `mark_posted` is the normal entry point).
    pub fn mark_posted_at(&self, url: &str, title: &str, posted_at: DateTime<Utc>) {
        let result = self.load_or_default().and_then(|mut file| {
            file.posted_urls.insert(
                url.to_string(),
                PostedRecord {
                    url: url.to_string(),
                    title: title.to_string(),
                    posted_at,
                },
            );
            self.save(&file)
        });
        if let Err(e) = result {
            warn!(error = ?e, url, "failed to mark url as posted");
        }
    }

    /// The most recently posted record, if any.
    pub fn last_posted(&self) -> Option<PostedRecord> {
        match self.load() {
            Ok(file) => file.posted_urls.into_values().max_by_key(|r| r.posted_at),
            Err(e) => {
                warn!(error = ?e, "history lookup failed; no last posted record");
                None
            }
        }
    }

    /// True iff `topic` was marked posted within the last `window_days` days.
    /// Same fail-open contract as the URL lookup.
    pub fn was_topic_posted_recently(&self, topic: &str, window_days: i64) -> bool {
        match self.load() {
            Ok(file) => match file.posted_topics.get(topic) {
                Some(ts) => *ts > Utc::now() - Duration::days(window_days),
                None => false,
            },
            Err(e) => {
                warn!(error = ?e, topic, "history lookup failed; treating as not posted");
                false
            }
        }
    }

    /// Record `topic` as posted now. Written only on explicit caller request;
    /// the selection pipeline itself keys on URLs.
    pub fn mark_topic_posted(&self, topic: &str) {
        let result = self.load_or_default().and_then(|mut file| {
            file.posted_topics.insert(topic.to_string(), Utc::now());
            self.save(&file)
        });
        if let Err(e) = result {
            warn!(error = ?e, topic, "failed to mark topic as posted");
        }
    }

    fn load(&self) -> Result<HistoryFile> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("reading history from {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parsing history from {}", self.path.display()))
    }

    /// A missing file is an empty history, not an error.
    fn load_or_default(&self) -> Result<HistoryFile> {
        if self.path.exists() {
            self.load()
        } else {
            Ok(HistoryFile::default())
        }
    }

    /// Write through a temp file + rename so a crash mid-write cannot leave
    /// a truncated history behind.
    fn save(&self, file: &HistoryFile) -> Result<()> {
        let content = serde_json::to_string_pretty(file).context("serializing history")?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .with_context(|| format!("writing history to {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing history at {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, HistoryStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(tmp.path().join("posts.json"));
        (tmp, store)
    }

    #[test]
    fn mark_then_lookup_is_true() {
        let (_tmp, store) = store();
        store.mark_posted("https://example.com/a", "A");
        assert!(store.was_posted_recently("https://example.com/a", 30));
        assert!(store.was_posted_recently_default("https://example.com/a"));
        assert!(!store.was_posted_recently("https://example.com/b", 30));
    }

    #[test]
    fn window_boundary_29_in_31_out() {
        let (_tmp, store) = store();
        store.mark_posted_at(
            "https://example.com/old",
            "Old",
            Utc::now() - Duration::days(31),
        );
        store.mark_posted_at(
            "https://example.com/new",
            "New",
            Utc::now() - Duration::days(29),
        );
        assert!(!store.was_posted_recently("https://example.com/old", 30));
        assert!(store.was_posted_recently("https://example.com/new", 30));
    }

    #[test]
    fn remark_refreshes_posted_at() {
        let (_tmp, store) = store();
        store.mark_posted_at(
            "https://example.com/a",
            "A",
            Utc::now() - Duration::days(40),
        );
        assert!(!store.was_posted_recently("https://example.com/a", 30));
        store.mark_posted("https://example.com/a", "A");
        assert!(store.was_posted_recently("https://example.com/a", 30));
    }

    #[test]
    fn last_posted_returns_newest() {
        let (_tmp, store) = store();
        store.mark_posted_at(
            "https://example.com/a",
            "A",
            Utc::now() - Duration::days(2),
        );
        store.mark_posted_at(
            "https://example.com/b",
            "B",
            Utc::now() - Duration::days(1),
        );
        let last = store.last_posted().unwrap();
        assert_eq!(last.url, "https://example.com/b");
        assert_eq!(last.title, "B");
    }

    #[test]
    fn corrupt_file_fails_open() {
        let (_tmp, store) = store();
        fs::write(store.path(), "not json").unwrap();
        assert!(!store.was_posted_recently("https://example.com/a", 30));
        assert!(store.last_posted().is_none());
    }

    #[test]
    fn topic_ledger_has_window_semantics() {
        let (_tmp, store) = store();
        store.mark_topic_posted("artificial intelligence");
        assert!(store.was_topic_posted_recently("artificial intelligence", 30));
        assert!(!store.was_topic_posted_recently("robotics", 30));
    }
}
