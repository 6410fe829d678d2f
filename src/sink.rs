// src/sink.rs
//! Persistence of the final board.

use async_trait::async_trait;
use chrono::FixedOffset;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::SinkError;
use crate::posting::{JobBoard, JobBoardDocument};

#[async_trait]
pub trait Sink: Send + Sync {
    async fn persist(&self, board: &JobBoard) -> Result<(), SinkError>;
}

/// Writes the board as pretty JSON. The file is replaced atomically so a
/// reader never sees a half-written document.
pub struct JsonFileSink {
    path: PathBuf,
    display_offset: FixedOffset,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>, display_offset: FixedOffset) -> Self {
        Self {
            path: path.into(),
            display_offset,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn render(&self, board: &JobBoard) -> Result<String, SinkError> {
        Ok(serde_json::to_string_pretty(
            &board.to_document(self.display_offset),
        )?)
    }
}

#[async_trait]
impl Sink for JsonFileSink {
    async fn persist(&self, board: &JobBoard) -> Result<(), SinkError> {
        let body = self.render(board)?;
        let io_err = |e: std::io::Error| SinkError::Io {
            path: self.path.display().to_string(),
            source: e,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let written = match tokio::fs::write(&tmp, body).await {
            Ok(()) => tokio::fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(rm) = tokio::fs::remove_file(&tmp).await {
                tracing::debug!(path = %tmp.display(), error = %rm, "temp file not removed");
            }
            return Err(io_err(e));
        }

        tracing::info!(
            path = %self.path.display(),
            active = board.active.len(),
            upcoming = board.upcoming.len(),
            "job board written"
        );
        Ok(())
    }
}

/// Keeps rendered documents in memory.
pub struct MemorySink {
    display_offset: FixedOffset,
    pub calls: Mutex<Vec<JobBoardDocument>>,
}

impl MemorySink {
    pub fn new(display_offset: FixedOffset) -> Self {
        Self {
            display_offset,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn last(&self) -> Option<JobBoardDocument> {
        self.calls.lock().ok().and_then(|c| c.last().cloned())
    }
}

#[async_trait]
impl Sink for MemorySink {
    async fn persist(&self, board: &JobBoard) -> Result<(), SinkError> {
        let doc = board.to_document(self.display_offset);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(doc);
        }
        Ok(())
    }
}
