// src/lib.rs
// Public library surface for integration tests (and embedding in a bot binary).

pub mod article;
pub mod bot;
pub mod config;
pub mod history;
pub mod publish;
pub mod relevance;
pub mod select;
pub mod source;

// ---- Re-exports for stable public API ----
pub use crate::article::Article;
pub use crate::bot::{run_once, RunOutcome};
pub use crate::config::{CuratorConfig, ScoreStrategy};
pub use crate::history::{HistoryStore, PostedRecord};
pub use crate::publish::{compose_post, Publisher};
pub use crate::relevance::RelevanceScorer;
pub use crate::select::{SelectError, SelectStats, SelectionPipeline};
pub use crate::source::ContentSource;
