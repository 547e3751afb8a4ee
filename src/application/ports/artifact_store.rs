use std::io;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{AudioArtifact, SessionId, StoragePath};

/// Write-once, read-many storage of output audio keyed by session.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Fails with `AlreadyExists` when the session already has an artifact.
    async fn put(
        &self,
        session_id: &SessionId,
        artifact: &AudioArtifact,
    ) -> Result<StoragePath, ArtifactStoreError>;

    async fn get(&self, session_id: &SessionId) -> Result<Option<AudioArtifact>, ArtifactStoreError>;

    async fn delete(&self, session_id: &SessionId) -> Result<(), ArtifactStoreError>;

    /// Removes every artifact written before `cutoff` and returns how many went away.
    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, ArtifactStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("artifact already exists: {0}")]
    AlreadyExists(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("listing failed: {0}")]
    ListFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
