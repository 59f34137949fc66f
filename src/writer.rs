use crate::markers::with_banner;
use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Writes a finished amalgamation, banner first, to its destination.
pub struct AmalgamationWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl AmalgamationWriter {
    /// Creates the destination file, making its parent directory if needed.
    pub async fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create output directory {}", parent.display()))?;
        }

        let file = File::create(path)
            .await
            .with_context(|| format!("Failed to create output file {}", path.display()))?;

        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    pub async fn write_amalgamation(&mut self, version_label: &str, body: &str) -> Result<()> {
        debug!("Writing {} bytes to {}", body.len(), self.path.display());

        self.writer
            .write_all(with_banner(version_label, body).as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        Ok(())
    }

    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await.context("Failed to flush output")
    }
}
