use crate::{
    clients::ArticleSource,
    error::{PipelineError, Result},
    models::Article,
};
use async_trait::async_trait;
use feed_rs::parser;

/// Fetches a feed and reduces it to its newest entry.
#[derive(Clone)]
pub struct FeedClient {
    http: reqwest::Client,
}

impl FeedClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ArticleSource for FeedClient {
    async fn latest(&self, feed_url: &str) -> Result<Article> {
        log::info!("Fetching feed: {}", feed_url);

        let response = self
            .http
            .get(feed_url)
            .send()
            .await
            .map_err(|e| PipelineError::Feed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Feed(format!(
                "feed endpoint returned {}",
                status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PipelineError::Feed(e.to_string()))?;

        latest_entry(&body)
    }
}

/// Parses raw feed bytes and extracts the newest entry.
pub fn latest_entry(xml: &[u8]) -> Result<Article> {
    let feed = parser::parse(xml).map_err(|e| PipelineError::Feed(e.to_string()))?;

    let entry = feed
        .entries
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::Feed("feed has no entries".to_string()))?;

    Ok(Article {
        title: entry.title.map(|t| t.content).unwrap_or_default(),
        summary: entry.summary.map(|s| s.content).unwrap_or_default(),
        link: entry
            .links
            .into_iter()
            .next()
            .map(|l| l.href)
            .unwrap_or_default(),
    })
}
