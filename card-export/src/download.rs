//! Where exported images end up.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

/// Receives finished PNG bytes under a filename.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Persist `bytes` as `filename`, returning the final location.
    async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

/// Saves downloads into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryDownloads {
    dir: PathBuf,
}

impl DirectoryDownloads {
    /// Create a sink writing into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DownloadSink for DirectoryDownloads {
    async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes).await?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "image saved");
        Ok(path)
    }
}
