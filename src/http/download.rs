//! Saving response bodies to disk

use super::RequestBuilder;
use crate::error::Result;
use std::path::Path;
use tokio::io::AsyncWriteExt;

impl RequestBuilder {
    /// Execute the request and write the response body to `destination`.
    ///
    /// Missing parent directories are created and an existing file is
    /// truncated. A failed request is returned as is and nothing is written.
    pub async fn download_file(&self, destination: impl AsRef<Path>) -> Result<()> {
        let destination = destination.as_ref();
        let data = self.execute().await?;

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && tokio::fs::metadata(parent).await.is_err() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::File::create(destination).await?;
        file.write_all(&data).await?;
        file.flush().await?;

        log::info!("Saved {} bytes to {}", data.len(), destination.display());
        Ok(())
    }
}
