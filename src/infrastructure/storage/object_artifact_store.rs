use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectMeta, ObjectStore, PutMode, PutOptions, PutPayload};

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::domain::{AudioArtifact, AudioFormat, SessionId, StoragePath};

/// Artifact store on top of any `object_store` backend. Each session owns
/// one object, `{session_id}/reply.{ext}`; the extension carries the format.
pub struct ObjectArtifactStore {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectArtifactStore {
    pub fn local(base_path: PathBuf) -> Result<Self, ArtifactStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| ArtifactStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(InMemory::new()),
        }
    }

    async fn session_objects(
        &self,
        session_id: &SessionId,
    ) -> Result<Vec<ObjectMeta>, ArtifactStoreError> {
        let prefix = StorePath::from(StoragePath::session_prefix(session_id).as_str());
        self.inner
            .list(Some(&prefix))
            .try_collect()
            .await
            .map_err(|e| ArtifactStoreError::ListFailed(e.to_string()))
    }
}

fn format_of(location: &StorePath) -> AudioFormat {
    location
        .extension()
        .and_then(AudioFormat::from_extension)
        .unwrap_or(AudioFormat::Wav)
}

#[async_trait]
impl ArtifactStore for ObjectArtifactStore {
    async fn put(
        &self,
        session_id: &SessionId,
        artifact: &AudioArtifact,
    ) -> Result<StoragePath, ArtifactStoreError> {
        if !self.session_objects(session_id).await?.is_empty() {
            return Err(ArtifactStoreError::AlreadyExists(session_id.to_string()));
        }

        let path = StoragePath::new(session_id, &artifact.file_name());
        let location = StorePath::from(path.as_str());
        let options = PutOptions {
            mode: PutMode::Create,
            ..Default::default()
        };

        match self
            .inner
            .put_opts(&location, PutPayload::from(artifact.bytes.clone()), options)
            .await
        {
            Ok(_) => Ok(path),
            Err(object_store::Error::AlreadyExists { .. }) => {
                Err(ArtifactStoreError::AlreadyExists(path.to_string()))
            }
            Err(e) => Err(ArtifactStoreError::UploadFailed(e.to_string())),
        }
    }

    async fn get(&self, session_id: &SessionId) -> Result<Option<AudioArtifact>, ArtifactStoreError> {
        let Some(meta) = self.session_objects(session_id).await?.into_iter().next() else {
            return Ok(None);
        };

        let result = match self.inner.get(&meta.location).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(ArtifactStoreError::DownloadFailed(e.to_string())),
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::DownloadFailed(e.to_string()))?;

        Ok(Some(AudioArtifact::new(bytes, format_of(&meta.location))))
    }

    async fn delete(&self, session_id: &SessionId) -> Result<(), ArtifactStoreError> {
        for meta in self.session_objects(session_id).await? {
            match self.inner.delete(&meta.location).await {
                Ok(()) | Err(object_store::Error::NotFound { .. }) => {}
                Err(e) => return Err(ArtifactStoreError::DeleteFailed(e.to_string())),
            }
        }
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, ArtifactStoreError> {
        let objects: Vec<ObjectMeta> = self
            .inner
            .list(None)
            .try_collect()
            .await
            .map_err(|e| ArtifactStoreError::ListFailed(e.to_string()))?;

        let mut purged = 0;
        for meta in objects.into_iter().filter(|m| m.last_modified < cutoff) {
            match self.inner.delete(&meta.location).await {
                Ok(()) => purged += 1,
                Err(object_store::Error::NotFound { .. }) => {}
                Err(e) => return Err(ArtifactStoreError::DeleteFailed(e.to_string())),
            }
        }

        Ok(purged)
    }
}
