// src/bot.rs
//! Single-run orchestration: fetch from all sources, select, publish.
//!
//! One invocation does one complete pass and publishes at most one article.
//! Scheduling repeated runs (cron, timers) is the caller's business.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::article::Article;
use crate::publish::Publisher;
use crate::select::{SelectStats, SelectionPipeline};
use crate::source::{fetch_all, ContentSource};

/// What one pass produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The winner was committed to history and handed to the publisher.
    Posted(Article),
    /// Nothing survived selection. Normal, not an error.
    NothingToPost,
}

/// Fetch one batch from every source, run selection, and publish the winner
/// if there is one.
///
/// The winner is recorded in the history store during selection, before the
/// publish attempt. A publisher failure therefore leaves the URL marked as
/// posted; the error is surfaced to the caller.
pub async fn run_once(
    sources: &[Box<dyn ContentSource>],
    pipeline: &SelectionPipeline,
    publisher: &dyn Publisher,
) -> Result<(RunOutcome, SelectStats)> {
    let batch = fetch_all(sources).await;
    info!(fetched = batch.len(), "collected candidate articles");

    let (selected, stats) = pipeline.select(batch);
    let Some(winner) = selected.into_iter().next() else {
        info!("no article selected this run");
        return Ok((RunOutcome::NothingToPost, stats));
    };

    if let Err(e) = publisher.publish(&winner).await {
        warn!(url = %winner.url, "publish failed for an already-committed winner");
        return Err(e).with_context(|| format!("publishing {}", winner.url));
    }

    info!(url = %winner.url, score = winner.relevance_score, "published winning article");
    Ok((RunOutcome::Posted(winner), stats))
}
