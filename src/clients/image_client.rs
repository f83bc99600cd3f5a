use crate::{
    config::{HordeConfig, PollConfig},
    error::{PipelineError, Result},
    models::{GeneratedAsset, GenerationRequest, JobHandle, JobStatus, SubmitResponse},
};
use async_trait::async_trait;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// The three remote interactions a generation job goes through. Split out
/// so the poller can be driven against a scripted implementation in tests.
#[async_trait]
pub trait ImageJobService: Send + Sync {
    async fn submit(&self, request: &GenerationRequest) -> Result<JobHandle>;
    async fn status(&self, handle: &JobHandle) -> Result<JobStatus>;
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}

/// Stable Horde client: async job submission, status by id, plain GET for
/// the finished image.
#[derive(Clone)]
pub struct HordeClient {
    http: reqwest::Client,
    config: HordeConfig,
}

impl HordeClient {
    pub fn new(http: reqwest::Client, config: HordeConfig) -> Self {
        Self { http, config }
    }
}

#[async_trait]
impl ImageJobService for HordeClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<JobHandle> {
        let payload = json!({
            "prompt": request.prompt,
            "params": {
                "n": request.count,
                "width": request.width,
                "height": request.height
            }
        });

        let mut builder = self
            .http
            .post(format!("{}/generate/async", self.config.base_url))
            .json(&payload);
        if let Some(key) = &self.config.api_key {
            builder = builder.header("apikey", key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PipelineError::Submission(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| PipelineError::Submission(e.to_string()))?;

        let handle = job_handle_from_response(status, &body)?;
        log::info!("Image job submitted: {}", handle.id);
        Ok(handle)
    }

    async fn status(&self, handle: &JobHandle) -> Result<JobStatus> {
        let mut builder = self.http.get(format!(
            "{}/generate/status/{}",
            self.config.base_url, handle.id
        ));
        if let Some(key) = &self.config.api_key {
            builder = builder.header("apikey", key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| PipelineError::StatusCheck(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::StatusCheck(format!(
                "status endpoint returned {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PipelineError::StatusCheck(e.to_string()))
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::Download(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Download(format!(
                "image endpoint returned {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::Download(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Turns a raw submission response into a handle. A non-success status or
/// a body without a job id is a `Submission` failure.
fn job_handle_from_response(status: reqwest::StatusCode, body: &[u8]) -> Result<JobHandle> {
    if !status.is_success() {
        return Err(PipelineError::Submission(format!(
            "submission endpoint returned {}",
            status
        )));
    }

    let body: SubmitResponse =
        serde_json::from_slice(body).map_err(|e| PipelineError::Submission(e.to_string()))?;

    let id = body.id.ok_or_else(|| {
        PipelineError::Submission(format!(
            "response carried no job id ({})",
            body.message.as_deref().unwrap_or("no message")
        ))
    })?;

    Ok(JobHandle { id })
}

/// Drives a job from submission to a downloaded asset:
/// `Submitted → (Polling)* → Done → Downloaded`. Polling is strictly
/// sequential with a bounded number of attempts; every other failure is
/// terminal for the calling pipeline.
pub struct ImageJobPoller<S> {
    service: S,
    interval: Duration,
    max_attempts: u32,
}

impl<S: ImageJobService> ImageJobPoller<S> {
    pub fn new(service: S, poll: &PollConfig) -> Self {
        Self {
            service,
            interval: poll.interval,
            max_attempts: poll.max_attempts,
        }
    }

    pub async fn submit(&self, request: &GenerationRequest) -> Result<JobHandle> {
        self.service.submit(request).await
    }

    /// Queries job status until `done` is observed, sleeping between
    /// attempts. The token is checked at the top of each iteration so a
    /// cancelled run never touches the filesystem.
    pub async fn poll(&self, handle: &JobHandle, cancel: &CancellationToken) -> Result<JobStatus> {
        for attempt in 1..=self.max_attempts {
            if cancel.is_cancelled() {
                return Err(PipelineError::Cancelled);
            }

            let status = self.service.status(handle).await?;
            if status.done {
                log::info!("Job {} done after {} status checks", handle.id, attempt);
                return Ok(status);
            }

            log::debug!(
                "Job {} still running (attempt {}/{})",
                handle.id,
                attempt,
                self.max_attempts
            );
            if attempt < self.max_attempts {
                tokio::time::sleep(self.interval).await;
            }
        }

        Err(PipelineError::Timeout {
            attempts: self.max_attempts,
        })
    }

    /// Fetches the first generation's image and persists it under `dest`,
    /// creating parent directories as needed.
    pub async fn download(&self, status: &JobStatus, dest: &Path) -> Result<GeneratedAsset> {
        let generation = status.generations.first().ok_or(PipelineError::EmptyResult)?;

        let bytes = self.service.fetch_image(&generation.image_url).await?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PipelineError::Download(e.to_string()))?;
        }
        tokio::fs::write(dest, &bytes)
            .await
            .map_err(|e| PipelineError::Download(e.to_string()))?;

        log::info!("Saved {} bytes to {}", bytes.len(), dest.display());
        Ok(GeneratedAsset {
            local_path: dest.to_path_buf(),
            bytes_written: bytes.len(),
        })
    }

    /// Full cycle: submit, wait for completion, download. The handle is
    /// dropped once the asset is on disk and is never reused.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        dest: &Path,
        cancel: &CancellationToken,
    ) -> Result<GeneratedAsset> {
        let handle = self.submit(request).await?;
        let status = self.poll(&handle, cancel).await?;
        self.download(&status, dest).await
    }
}
