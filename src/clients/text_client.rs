use crate::{
    clients::ProseGenerator,
    config::TextApiConfig,
    error::{PipelineError, Result},
    models::{Article, InferenceResponse},
};
use async_trait::async_trait;
use serde_json::json;

/// Hosted-LLM client: turns a feed entry into Japanese article prose.
#[derive(Clone)]
pub struct TextClient {
    http: reqwest::Client,
    config: TextApiConfig,
}

impl TextClient {
    pub fn new(http: reqwest::Client, config: TextApiConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl ProseGenerator for TextClient {
    async fn generate(&self, article: &Article) -> Result<String> {
        let prompt = build_prompt(article);
        log::info!("Generating article text via {}", self.config.api_url);

        let mut builder = self
            .http
            .post(&self.config.api_url)
            .json(&json!({ "inputs": prompt }));
        if let Some(token) = &self.config.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PipelineError::TextGeneration(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::TextGeneration(format!(
                "inference endpoint returned {}",
                status
            )));
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::TextGeneration(e.to_string()))?;

        parsed.into_text().ok_or_else(|| {
            PipelineError::TextGeneration("response contained no generated text".to_string())
        })
    }
}

fn build_prompt(article: &Article) -> String {
    format!(
        "\n次の内容について日本語で500-800字の記事を作成してください。\n・要約（翻訳含む）\n・私見を300字程度\n・出典リンクを最後に記載\n\nタイトル: {}\n要約元: {}\n出典: {}\n",
        article.title, article.summary, article.link
    )
}
