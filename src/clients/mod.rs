pub mod feed_client;
pub mod image_client;
pub mod text_client;

use crate::{
    config::Config,
    error::{PipelineError, Result},
    models::Article,
};
use async_trait::async_trait;
use std::time::Duration;

pub use feed_client::FeedClient;
pub use image_client::{HordeClient, ImageJobPoller, ImageJobService};
pub use text_client::TextClient;

/// Source of the newest article for a feed URL.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn latest(&self, feed_url: &str) -> Result<Article>;
}

/// Turns a feed entry into article prose.
#[async_trait]
pub trait ProseGenerator: Send + Sync {
    async fn generate(&self, article: &Article) -> Result<String>;
}

/// The remote collaborators of one pipeline run. Generic over its parts so
/// the pipeline can be driven by scripted implementations in tests; the
/// default instantiation talks HTTP through a single shared client.
pub struct Services<F = FeedClient, T = TextClient, S = HordeClient> {
    feed_client: F,
    text_client: T,
    image_poller: ImageJobPoller<S>,
}

impl Services {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        Ok(Self {
            feed_client: FeedClient::new(http.clone()),
            text_client: TextClient::new(http.clone(), config.text_api.clone()),
            image_poller: ImageJobPoller::new(
                HordeClient::new(http, config.horde.clone()),
                &config.poll,
            ),
        })
    }
}

impl<F, T, S> Services<F, T, S>
where
    F: ArticleSource,
    T: ProseGenerator,
    S: ImageJobService,
{
    pub fn from_parts(feed_client: F, text_client: T, image_poller: ImageJobPoller<S>) -> Self {
        Self {
            feed_client,
            text_client,
            image_poller,
        }
    }

    pub fn feed(&self) -> &F {
        &self.feed_client
    }

    pub fn text(&self) -> &T {
        &self.text_client
    }

    pub fn image(&self) -> &ImageJobPoller<S> {
        &self.image_poller
    }
}
