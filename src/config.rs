use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HORDE_URL: &str = "https://stablehorde.net/api/v2";
const DEFAULT_TEXT_API_URL: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.1";
const WEB3_FEED: &str = "https://www.blockchaingamer.biz/feed/";
const AI_FEED: &str = "https://venturebeat.com/category/ai/feed/";

#[derive(Debug, Clone)]
pub struct HordeConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub width: u32,
    pub height: u32,
    pub count: u32,
}

impl Default for HordeConfig {
    fn default() -> Self {
        HordeConfig {
            api_key: None,
            base_url: DEFAULT_HORDE_URL.to_string(),
            width: 512,
            height: 512,
            count: 1,
        }
    }
}

impl HordeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("HORDE_API_KEY").ok();
        let base_url = env::var("HORDE_API_URL").unwrap_or_else(|_| DEFAULT_HORDE_URL.to_string());

        HordeConfig {
            api_key,
            base_url,
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

#[derive(Debug, Clone)]
pub struct TextApiConfig {
    pub api_token: Option<String>,
    pub api_url: String,
}

impl Default for TextApiConfig {
    fn default() -> Self {
        TextApiConfig {
            api_token: None,
            api_url: DEFAULT_TEXT_API_URL.to_string(),
        }
    }
}

impl TextApiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_token = env::var("HF_API_TOKEN").ok();
        let api_url = env::var("HF_API_URL").unwrap_or_else(|_| DEFAULT_TEXT_API_URL.to_string());

        TextApiConfig { api_token, api_url }
    }

    pub fn with_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            interval: Duration::from_secs(10),
            max_attempts: 30,
        }
    }
}

impl PollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let interval = env::var("POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| PollConfig::default().interval);
        let max_attempts = env::var("POLL_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| PollConfig::default().max_attempts);

        PollConfig {
            interval,
            max_attempts,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Topic {
    pub name: String,
    pub feed_url: String,
}

impl Topic {
    pub fn new(name: impl Into<String>, feed_url: impl Into<String>) -> Self {
        Topic {
            name: name.into(),
            feed_url: feed_url.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub topics: Vec<Topic>,
    pub horde: HordeConfig,
    pub text_api: TextApiConfig,
    pub poll: PollConfig,
    pub posts_dir: PathBuf,
    pub images_dir: PathBuf,
    pub strip_patterns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            topics: vec![Topic::new("web3", WEB3_FEED), Topic::new("ai", AI_FEED)],
            horde: HordeConfig::default(),
            text_api: TextApiConfig::default(),
            poll: PollConfig::default(),
            posts_dir: PathBuf::from("_posts"),
            images_dir: PathBuf::from("assets/images"),
            strip_patterns: Vec::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let posts_dir = env::var("POSTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("_posts"));
        let images_dir = env::var("IMAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets/images"));

        Config {
            horde: HordeConfig::from_env(),
            text_api: TextApiConfig::from_env(),
            poll: PollConfig::from_env(),
            posts_dir,
            images_dir,
            ..Default::default()
        }
    }

    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self
    }

    pub fn with_horde(mut self, config: HordeConfig) -> Self {
        self.horde = config;
        self
    }

    pub fn with_text_api(mut self, config: TextApiConfig) -> Self {
        self.text_api = config;
        self
    }

    pub fn with_poll(mut self, config: PollConfig) -> Self {
        self.poll = config;
        self
    }

    pub fn with_strip_patterns(mut self, patterns: Vec<String>) -> Self {
        self.strip_patterns = patterns;
        self
    }

    pub fn with_output_dirs(
        mut self,
        posts_dir: impl Into<PathBuf>,
        images_dir: impl Into<PathBuf>,
    ) -> Self {
        self.posts_dir = posts_dir.into();
        self.images_dir = images_dir.into();
        self
    }
}
