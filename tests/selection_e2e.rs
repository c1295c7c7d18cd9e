// tests/selection_e2e.rs
// End-to-end pass over a mixed batch: empty-url drop, dedup drop, threshold
// drop, descending sort, single winner commit.

use chrono::{Duration, Utc};
use social_news_curator::{
    Article, CuratorConfig, HistoryStore, RelevanceScorer, ScoreStrategy, SelectionPipeline,
};

fn bucket_cfg(history_path: std::path::PathBuf) -> CuratorConfig {
    CuratorConfig {
        strategy: ScoreStrategy::BucketWeighted,
        min_relevance_score: 0.5,
        max_articles: 3,
        history_path,
        ..CuratorConfig::default()
    }
}

#[test]
fn five_item_batch_reduces_to_two_and_commits_one() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = bucket_cfg(tmp.path().join("posts.json"));
    let store = HistoryStore::new(cfg.history_path.clone());

    // One URL was already posted five days ago: inside the 30-day window.
    store.mark_posted_at(
        "https://news.example/posted",
        "Already posted",
        Utc::now() - Duration::days(5),
    );

    let pipeline = SelectionPipeline::new(store, RelevanceScorer::from_config(&cfg), &cfg);

    let long_content = format!("deep learning recap {}", "word ".repeat(100));
    let batch = vec![
        // dropped: no identity
        Article::new("Untracked story", ""),
        // dropped: posted five days ago
        Article::new("Already posted", "https://news.example/posted"),
        // scores 0.3: one technical hit (0.2) + technical title bonus (0.1)
        Article::new("Neural networks update", "https://news.example/low"),
        // scores 0.6: two technical hits (0.4) + title bonus (0.1) + length (0.1)
        Article::new("Deep learning and machine learning", "https://news.example/mid")
            .with_content(long_content),
        // scores 0.9: topic in text (0.3) + two hits (0.4) + topic in title (0.2)
        Article::new(
            "Artificial intelligence breakthrough",
            "https://news.example/high",
        )
        .with_content("machine learning angle"),
    ];

    let (out, stats) = pipeline.select(batch);

    assert_eq!(stats.input, 5);
    assert_eq!(stats.dropped_no_url, 1);
    assert_eq!(stats.dropped_recently_posted, 1);
    assert_eq!(stats.dropped_below_threshold, 1);

    let urls: Vec<_> = out.iter().map(|a| a.url.as_str()).collect();
    assert_eq!(urls, vec!["https://news.example/high", "https://news.example/mid"]);
    assert!((out[0].relevance_score - 0.9).abs() < 1e-6);
    assert!((out[1].relevance_score - 0.6).abs() < 1e-6);

    // Only the winner is committed; the runner-up stays eligible.
    assert!(pipeline
        .store()
        .was_posted_recently("https://news.example/high", 30));
    assert!(!pipeline
        .store()
        .was_posted_recently("https://news.example/mid", 30));
}

#[test]
fn runner_up_wins_the_next_run() {
    let tmp = tempfile::tempdir().unwrap();
    let cfg = bucket_cfg(tmp.path().join("posts.json"));
    let pipeline = SelectionPipeline::from_config(&cfg);

    let batch = vec![
        Article::new(
            "Artificial intelligence breakthrough",
            "https://news.example/high",
        ),
        Article::new("Artificial intelligence runner-up", "https://news.example/second"),
    ];

    let (first, _) = pipeline.select(batch.clone());
    assert_eq!(first[0].url, "https://news.example/high");

    let (second, stats) = pipeline.select(batch);
    assert_eq!(stats.dropped_recently_posted, 1);
    assert_eq!(second[0].url, "https://news.example/second");
}
