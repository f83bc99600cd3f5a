use crate::{
    cleaner::TextCleaner,
    clients::{ArticleSource, ImageJobService, ProseGenerator, Services},
    config::{Config, Topic},
    error::Result,
    models::{FrontMatter, GeneratedAsset, GenerationRequest, Post},
    writer::PostWriter,
};
use chrono::NaiveDate;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// What a successful per-topic run leaves on disk.
#[derive(Debug)]
pub struct TopicOutput {
    pub topic: String,
    pub post_path: PathBuf,
    pub asset: GeneratedAsset,
}

/// One topic, start to finish: newest feed entry → generated prose →
/// illustration → Markdown post. Any failure aborts the topic at that
/// stage; in particular no post is written when image generation failed.
pub async fn run_topic<F, T, S>(
    services: &Services<F, T, S>,
    config: &Config,
    cleaner: &TextCleaner,
    topic: &Topic,
    date: NaiveDate,
    cancel: &CancellationToken,
) -> Result<TopicOutput>
where
    F: ArticleSource,
    T: ProseGenerator,
    S: ImageJobService,
{
    let article = services.feed().latest(&topic.feed_url).await?;
    log::info!("[{}] latest article: {}", topic.name, article.title);

    let raw_text = services.text().generate(&article).await?;
    let body = cleaner.clean(&raw_text);

    let request = GenerationRequest {
        prompt: article.title.clone(),
        width: config.horde.width,
        height: config.horde.height,
        count: config.horde.count,
    };
    let image_path = config
        .images_dir
        .join(format!("{}_{}.png", date.format("%Y%m%d"), topic.name));
    let asset = services
        .image()
        .generate(&request, &image_path, cancel)
        .await?;

    let post = Post {
        front_matter: FrontMatter {
            layout: "post".to_string(),
            title: article.title,
            date,
        },
        image_path: asset.local_path.display().to_string(),
        body,
    };
    let post_path = PostWriter::new(config.posts_dir.clone())
        .write(&topic.name, &post)
        .await?;

    Ok(TopicOutput {
        topic: topic.name.clone(),
        post_path,
        asset,
    })
}

/// Runs every configured topic sequentially. Topics are independent, so a
/// failed one does not stop the rest.
pub async fn run_all<F, T, S>(
    services: &Services<F, T, S>,
    config: &Config,
    cancel: &CancellationToken,
) -> Result<Vec<(String, Result<TopicOutput>)>>
where
    F: ArticleSource,
    T: ProseGenerator,
    S: ImageJobService,
{
    let cleaner = TextCleaner::new(&config.strip_patterns)?;
    let date = chrono::Local::now().date_naive();

    let mut results = Vec::with_capacity(config.topics.len());
    for topic in &config.topics {
        let result = run_topic(services, config, &cleaner, topic, date, cancel).await;
        match &result {
            Ok(output) => log::info!("[{}] post ready: {}", topic.name, output.post_path.display()),
            Err(e) => log::error!("[{}] pipeline aborted: {}", topic.name, e),
        }
        results.push((topic.name.clone(), result));
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ImageJobPoller;
    use crate::config::PollConfig;
    use crate::error::PipelineError;
    use crate::models::{Article, Generation, JobHandle, JobStatus};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::time::Duration;

    struct StubFeed {
        articles: HashMap<String, Article>,
    }

    impl StubFeed {
        fn with_article(feed_url: &str, title: &str) -> Self {
            let mut articles = HashMap::new();
            articles.insert(
                feed_url.to_string(),
                Article {
                    title: title.to_string(),
                    summary: "summary".to_string(),
                    link: "https://example.com/a".to_string(),
                },
            );
            Self { articles }
        }
    }

    #[async_trait]
    impl ArticleSource for StubFeed {
        async fn latest(&self, feed_url: &str) -> Result<Article> {
            self.articles.get(feed_url).cloned().ok_or_else(|| {
                PipelineError::Feed(format!("feed endpoint returned 404 for {}", feed_url))
            })
        }
    }

    struct StubText;

    #[async_trait]
    impl ProseGenerator for StubText {
        async fn generate(&self, article: &Article) -> Result<String> {
            Ok(format!("{}についての本文。", article.title))
        }
    }

    struct FailingJobs;

    #[async_trait]
    impl ImageJobService for FailingJobs {
        async fn submit(&self, _request: &GenerationRequest) -> Result<JobHandle> {
            Err(PipelineError::Submission(
                "submission endpoint returned 503".to_string(),
            ))
        }

        async fn status(&self, _handle: &JobHandle) -> Result<JobStatus> {
            Err(PipelineError::StatusCheck("not scripted".to_string()))
        }

        async fn fetch_image(&self, _url: &str) -> Result<Vec<u8>> {
            Err(PipelineError::Download("not scripted".to_string()))
        }
    }

    struct InstantJobs {
        bytes: Vec<u8>,
    }

    #[async_trait]
    impl ImageJobService for InstantJobs {
        async fn submit(&self, _request: &GenerationRequest) -> Result<JobHandle> {
            Ok(JobHandle {
                id: "job-1".to_string(),
            })
        }

        async fn status(&self, _handle: &JobHandle) -> Result<JobStatus> {
            Ok(JobStatus {
                done: true,
                generations: vec![Generation {
                    image_url: "http://x/y.png".to_string(),
                }],
            })
        }

        async fn fetch_image(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.bytes.clone())
        }
    }

    fn services<S: ImageJobService>(feed: StubFeed, jobs: S) -> Services<StubFeed, StubText, S> {
        let poll = PollConfig::new()
            .with_interval(Duration::from_millis(0))
            .with_max_attempts(3);
        Services::from_parts(feed, StubText, ImageJobPoller::new(jobs, &poll))
    }

    fn scratch_config(topics: Vec<Topic>) -> (std::path::PathBuf, Config) {
        let dir = std::env::temp_dir().join(format!("blogsmith-test-{}", uuid::Uuid::new_v4()));
        let config = Config::new()
            .with_topics(topics)
            .with_output_dirs(dir.join("_posts"), dir.join("assets/images"));
        (dir, config)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn failed_image_generation_writes_no_post() {
        let topic = Topic::new("web3", "http://feeds/web3");
        let (dir, config) = scratch_config(vec![topic.clone()]);
        let services = services(
            StubFeed::with_article("http://feeds/web3", "Tokens on Chain"),
            FailingJobs,
        );
        let cleaner = TextCleaner::new(&[]).unwrap();

        let result = run_topic(
            &services,
            &config,
            &cleaner,
            &topic,
            date(),
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(result, Err(PipelineError::Submission(_))));
        assert!(!config.posts_dir.exists());
        assert!(!config.images_dir.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn successful_topic_writes_image_then_post() {
        let topic = Topic::new("web3", "http://feeds/web3");
        let (dir, config) = scratch_config(vec![topic.clone()]);
        let bytes = b"\x89PNGpipe".to_vec();
        let services = services(
            StubFeed::with_article("http://feeds/web3", "Tokens on Chain"),
            InstantJobs {
                bytes: bytes.clone(),
            },
        );
        let cleaner = TextCleaner::new(&[]).unwrap();

        let output = run_topic(
            &services,
            &config,
            &cleaner,
            &topic,
            date(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(output.post_path, config.posts_dir.join("2024-01-01-web3.md"));
        assert_eq!(
            output.asset.local_path,
            config.images_dir.join("20240101_web3.png")
        );
        assert_eq!(std::fs::read(&output.asset.local_path).unwrap(), bytes);

        let post = std::fs::read_to_string(&output.post_path).unwrap();
        assert!(post.contains("title: \"Tokens on Chain\""));
        assert!(post.contains("Tokens on Chainについての本文。"));
        assert!(post.contains(&output.asset.local_path.display().to_string()));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn a_failed_topic_does_not_stop_the_rest() {
        let topics = vec![
            Topic::new("web3", "http://feeds/web3"),
            Topic::new("ai", "http://feeds/ai"),
        ];
        let (dir, config) = scratch_config(topics);
        // Only the ai feed resolves; web3 aborts at the feed stage.
        let services = services(
            StubFeed::with_article("http://feeds/ai", "Models All The Way Down"),
            InstantJobs {
                bytes: b"\x89PNG".to_vec(),
            },
        );

        let results = run_all(&services, &config, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "web3");
        assert!(matches!(results[0].1, Err(PipelineError::Feed(_))));
        assert_eq!(results[1].0, "ai");
        assert!(results[1].1.is_ok());

        let posts: Vec<String> = std::fs::read_dir(&config.posts_dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(posts.len(), 1);
        assert!(posts[0].ends_with("-ai.md"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
