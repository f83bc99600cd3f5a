use crate::{
    error::{PipelineError, Result},
    models::Post,
};
use std::path::{Path, PathBuf};

/// Writes rendered posts under the site's posts directory as
/// `YYYY-MM-DD-<topic>.md`.
pub struct PostWriter {
    posts_dir: PathBuf,
}

impl PostWriter {
    pub fn new(posts_dir: impl Into<PathBuf>) -> Self {
        Self {
            posts_dir: posts_dir.into(),
        }
    }

    pub async fn write(&self, topic: &str, post: &Post) -> Result<PathBuf> {
        let filename = format!("{}-{}.md", post.front_matter.date.format("%Y-%m-%d"), topic);
        let path = self.posts_dir.join(filename);

        write_file(&path, post.render().as_bytes()).await?;
        log::info!("Wrote post: {}", path.display());
        Ok(path)
    }
}

async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PipelineError::Write(e.to_string()))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| PipelineError::Write(e.to_string()))
}
