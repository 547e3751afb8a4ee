use std::sync::Arc;
use std::time::Duration;

use voiceturn::application::ports::ArtifactStore;
use voiceturn::application::services::ArtifactJanitor;
use voiceturn::domain::{AudioArtifact, AudioFormat, SessionId};
use voiceturn::infrastructure::storage::ObjectArtifactStore;

#[tokio::test]
async fn given_expired_artifacts_when_sweeping_then_they_are_purged() {
    let store: Arc<dyn ArtifactStore> = Arc::new(ObjectArtifactStore::in_memory());
    let first = SessionId::new();
    let second = SessionId::new();
    for id in [&first, &second] {
        store
            .put(id, &AudioArtifact::new(vec![1u8, 2, 3], AudioFormat::Wav))
            .await
            .unwrap();
    }
    tokio::time::sleep(Duration::from_millis(20)).await;

    let janitor = ArtifactJanitor::new(Arc::clone(&store), Duration::ZERO, Duration::from_secs(60));
    let purged = janitor.sweep_once().await.unwrap();

    assert_eq!(purged, 2);
    assert!(store.get(&first).await.unwrap().is_none());
}

#[tokio::test]
async fn given_fresh_artifacts_when_sweeping_then_they_are_kept() {
    let store: Arc<dyn ArtifactStore> = Arc::new(ObjectArtifactStore::in_memory());
    let id = SessionId::new();
    store
        .put(&id, &AudioArtifact::new(vec![1u8], AudioFormat::Mp3))
        .await
        .unwrap();

    let janitor = ArtifactJanitor::new(
        Arc::clone(&store),
        Duration::from_secs(600),
        Duration::from_secs(60),
    );

    assert_eq!(janitor.sweep_once().await.unwrap(), 0);
    assert!(store.get(&id).await.unwrap().is_some());
}
