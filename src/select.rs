// src/select.rs
//! Selection pipeline: reduce a raw batch of candidate articles to at most
//! `max_articles` winners, enforcing dedup against posting history and a
//! minimum-relevance gate, and committing the single top-ranked winner.
//!
//! Stage order is fixed; each stage feeds the next:
//! dedup → score → threshold → sort → truncate → commit.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::article::Article;
use crate::config::CuratorConfig;
use crate::history::HistoryStore;
use crate::relevance::RelevanceScorer;

/// One-time metrics registration (so series show up on an exporter).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("select_input_total", "Candidate articles entering the pipeline.");
        describe_counter!("select_no_url_total", "Candidates dropped for an empty URL.");
        describe_counter!(
            "select_dedup_total",
            "Candidates dropped as posted within the dedup window."
        );
        describe_counter!(
            "select_below_threshold_total",
            "Candidates dropped below the minimum relevance score."
        );
        describe_counter!("select_kept_total", "Candidates surviving all stages.");
    });
}

/// Per-stage drop counts for one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectStats {
    pub input: usize,
    pub dropped_no_url: usize,
    pub dropped_recently_posted: usize,
    pub dropped_below_threshold: usize,
    pub truncated: usize,
    pub selected: usize,
}

/// Internal pipeline faults. The public `select` never surfaces these; it
/// logs them and degrades to an empty result, which callers cannot tell
/// apart from "nothing to post". Tests go through `try_select` when the
/// distinction matters.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("configured minimum relevance score is not finite")]
    InvalidThreshold,
}

/// The dedup → score → threshold → sort → truncate → commit pipeline.
///
/// Single-threaded, single-run: one batch in, at most one committed winner
/// out per invocation.
pub struct SelectionPipeline {
    store: HistoryStore,
    scorer: RelevanceScorer,
    min_relevance_score: f32,
    max_articles: usize,
    dedup_window_days: i64,
}

impl SelectionPipeline {
    pub fn new(store: HistoryStore, scorer: RelevanceScorer, cfg: &CuratorConfig) -> Self {
        Self {
            store,
            scorer,
            min_relevance_score: cfg.min_relevance_score,
            max_articles: cfg.max_articles,
            dedup_window_days: cfg.dedup_window_days,
        }
    }

    /// Build store and scorer straight from configuration.
    pub fn from_config(cfg: &CuratorConfig) -> Self {
        Self::new(
            HistoryStore::new(cfg.history_path.clone()),
            RelevanceScorer::from_config(cfg),
            cfg,
        )
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Run the pipeline. Never fails: internal faults are logged and
    /// collapse to an empty result, indistinguishable from "nothing to
    /// post" through this entry point.
    pub fn select(&self, batch: Vec<Article>) -> (Vec<Article>, SelectStats) {
        match self.try_select(batch) {
            Ok(out) => out,
            Err(e) => {
                error!(error = %e, "selection pipeline failed; returning empty result");
                (Vec::new(), SelectStats::default())
            }
        }
    }

    /// Fallible variant of [`select`](Self::select), used by tests and
    /// callers that want to observe internal faults before they are merged
    /// into the empty-result contract.
    pub fn try_select(&self, batch: Vec<Article>) -> Result<(Vec<Article>, SelectStats), SelectError> {
        ensure_metrics_described();

        if !self.min_relevance_score.is_finite() {
            return Err(SelectError::InvalidThreshold);
        }

        let mut stats = SelectStats {
            input: batch.len(),
            ..SelectStats::default()
        };
        counter!("select_input_total").increment(batch.len() as u64);

        if batch.is_empty() {
            return Ok((Vec::new(), stats));
        }

        // 1) Dedup: no URL means no identity; recently posted means ineligible.
        let mut unposted = Vec::with_capacity(batch.len());
        for article in batch {
            if article.url.is_empty() {
                stats.dropped_no_url += 1;
                continue;
            }
            if self
                .store
                .was_posted_recently(&article.url, self.dedup_window_days)
            {
                stats.dropped_recently_posted += 1;
                continue;
            }
            unposted.push(article);
        }
        counter!("select_no_url_total").increment(stats.dropped_no_url as u64);
        counter!("select_dedup_total").increment(stats.dropped_recently_posted as u64);

        if unposted.is_empty() {
            info!("all candidate articles were posted recently or lacked a url");
            return Ok((Vec::new(), stats));
        }

        // 2) + 3) Score each survivor and gate on the minimum. A scoring
        // fault counts as score 0 for that item, never a batch failure.
        let mut candidates = Vec::with_capacity(unposted.len());
        for mut article in unposted {
            let score = self.scorer.score(&article);
            let score = if score.is_finite() {
                score
            } else {
                warn!(url = %article.url, "non-finite relevance score; treating as 0");
                0.0
            };
            article.relevance_score = score;
            if score < self.min_relevance_score {
                stats.dropped_below_threshold += 1;
                continue;
            }
            candidates.push(article);
        }
        counter!("select_below_threshold_total").increment(stats.dropped_below_threshold as u64);

        // 4) Sort descending by score. Ties keep input order (stable sort),
        // which is the documented deterministic tie-break.
        candidates.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(Ordering::Equal)
        });

        // 5) Truncate to the configured maximum.
        if candidates.len() > self.max_articles {
            stats.truncated = candidates.len() - self.max_articles;
            candidates.truncate(self.max_articles);
        }
        stats.selected = candidates.len();
        counter!("select_kept_total").increment(candidates.len() as u64);

        // 6) Commit the single top-ranked winner, and only it. Runners-up
        // stay eligible for the next run. The winner is recorded as posted
        // here, at selection time, before any publish attempt is made.
        if let Some(winner) = candidates.first() {
            self.store.mark_posted(&winner.url, &winner.title);
            info!(
                input = stats.input,
                selected = stats.selected,
                winner = %winner.url,
                top_score = winner.relevance_score,
                "selection complete"
            );
        } else {
            info!(input = stats.input, "no candidate articles survived selection");
        }

        Ok((candidates, stats))
    }
}
