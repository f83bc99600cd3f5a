pub mod cleaner;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod pipeline;
pub mod writer;

pub use cleaner::TextCleaner;
pub use clients::{
    ArticleSource, FeedClient, HordeClient, ImageJobPoller, ImageJobService, ProseGenerator,
    Services, TextClient,
};
pub use config::{Config, HordeConfig, PollConfig, TextApiConfig, Topic};
pub use error::{PipelineError, Result};
pub use models::*;
pub use pipeline::{run_all, run_topic, TopicOutput};
pub use writer::PostWriter;
