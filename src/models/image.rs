use serde::Deserialize;
use std::path::PathBuf;

/// Parameters for one image-generation job. Built per call and discarded
/// after submission.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub count: u32,
}

/// Identifies a submitted job for subsequent status checks. Valid until a
/// terminal status is observed; never reused after the asset is downloaded.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub id: String,
}

/// Snapshot of a job's progress. Re-fetched on each poll; the service may
/// omit the generations array while the job is still waiting.
#[derive(Debug, Clone, Deserialize)]
pub struct JobStatus {
    pub done: bool,
    #[serde(default)]
    pub generations: Vec<Generation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Generation {
    #[serde(rename = "img")]
    pub image_url: String,
}

/// Body of a successful submission response.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    pub id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug)]
pub struct GeneratedAsset {
    pub local_path: PathBuf,
    pub bytes_written: usize,
}
