use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::presentation::config::{ArtifactProviderSetting, ArtifactSettings};

use super::object_artifact_store::ObjectArtifactStore;

pub struct ArtifactStoreFactory;

impl ArtifactStoreFactory {
    pub fn create(settings: &ArtifactSettings) -> Result<Arc<dyn ArtifactStore>, ArtifactStoreError> {
        match settings.provider {
            ArtifactProviderSetting::Local => {
                let store = ObjectArtifactStore::local(PathBuf::from(&settings.local_path))?;
                Ok(Arc::new(store))
            }
            ArtifactProviderSetting::Memory => Ok(Arc::new(ObjectArtifactStore::in_memory())),
        }
    }
}
