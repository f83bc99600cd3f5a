use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Text generation error: {0}")]
    TextGeneration(String),

    #[error("Job submission failed: {0}")]
    Submission(String),

    #[error("Status check failed: {0}")]
    StatusCheck(String),

    #[error("Job not done after {attempts} status checks")]
    Timeout { attempts: u32 },

    #[error("Job finished without any generations")]
    EmptyResult,

    #[error("Image download failed: {0}")]
    Download(String),

    #[error("Post write failed: {0}")]
    Write(String),

    #[error("Pipeline cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PipelineError>;
