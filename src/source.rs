// src/source.rs
//! Adapter boundary: every content source (news API, RSS, social search,
//! scraper) lives behind this trait and delivers normalized articles.

use anyhow::Result;

use crate::article::Article;

#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the current batch of candidate articles from this source.
    async fn fetch_articles(&self) -> Result<Vec<Article>>;
    fn name(&self) -> &'static str;
}

/// Collect one batch from every source. A failing source is logged and
/// skipped; the rest of the batch still goes through.
pub async fn fetch_all(sources: &[Box<dyn ContentSource>]) -> Vec<Article> {
    let mut batch = Vec::new();
    for source in sources {
        match source.fetch_articles().await {
            Ok(mut articles) => {
                tracing::info!(source = source.name(), count = articles.len(), "fetched articles");
                batch.append(&mut articles);
            }
            Err(e) => {
                tracing::warn!(error = ?e, source = source.name(), "source fetch failed");
            }
        }
    }
    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct Fixed(Vec<Article>);

    #[async_trait::async_trait]
    impl ContentSource for Fixed {
        async fn fetch_articles(&self) -> Result<Vec<Article>> {
            Ok(self.0.clone())
        }
        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    struct Broken;

    #[async_trait::async_trait]
    impl ContentSource for Broken {
        async fn fetch_articles(&self) -> Result<Vec<Article>> {
            Err(anyhow!("connection refused"))
        }
        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn failing_source_does_not_poison_the_batch() {
        let sources: Vec<Box<dyn ContentSource>> = vec![
            Box::new(Broken),
            Box::new(Fixed(vec![Article::new("A", "https://x/a")])),
        ];
        let batch = fetch_all(&sources).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].url, "https://x/a");
    }
}
