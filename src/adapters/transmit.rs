use crate::domain::ports::Transmitter;
use crate::utils::error::{NodeError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Prints one stream per line on stdout.
#[derive(Debug, Clone, Default)]
pub struct StdoutTransmitter;

#[async_trait]
impl Transmitter for StdoutTransmitter {
    async fn transmit(&self, stream: &str, _is_hub: bool) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(stream.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

/// Appends one stream per line to a file on local storage.
#[derive(Debug, Clone)]
pub struct FileTransmitter {
    path: PathBuf,
}

impl FileTransmitter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Transmitter for FileTransmitter {
    async fn transmit(&self, stream: &str, is_hub: bool) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| NodeError::TransmissionError {
                message: format!("cannot open {}: {}", self.path.display(), e),
            })?;

        let mut line = String::with_capacity(stream.len() + 1);
        line.push_str(stream);
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = %self.path.display(), is_hub, bytes = line.len(), "stream written");
        Ok(())
    }
}
