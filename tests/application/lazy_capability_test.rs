use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use voiceturn::application::ports::{BackendError, TranscriptionEngine};
use voiceturn::application::services::LazyCapability;

use crate::helpers::mocks::MockTranscriptionEngine;

#[tokio::test]
async fn given_concurrent_first_use_when_getting_then_builder_runs_once_and_instance_is_shared() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let capability: Arc<LazyCapability<dyn TranscriptionEngine>> = Arc::new(LazyCapability::new(
        "transcription",
        Arc::new(move || -> Result<Arc<dyn TranscriptionEngine>, String> {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(50));
            Ok(Arc::new(MockTranscriptionEngine::returning("hi")))
        }),
        None,
    ));

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let capability = Arc::clone(&capability);
            tokio::spawn(async move { capability.get().await.unwrap() })
        })
        .collect();

    let mut instances = Vec::new();
    for handle in handles {
        instances.push(handle.await.unwrap());
    }

    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert_eq!(capability.construction_attempts(), 1);
    assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
}

#[tokio::test]
async fn given_first_caller_dropped_mid_build_when_getting_again_then_builder_ran_once() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let capability: Arc<LazyCapability<dyn TranscriptionEngine>> = Arc::new(LazyCapability::new(
        "transcription",
        Arc::new(move || -> Result<Arc<dyn TranscriptionEngine>, String> {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(300));
            Ok(Arc::new(MockTranscriptionEngine::returning("hi")))
        }),
        None,
    ));

    let first = {
        let capability = Arc::clone(&capability);
        tokio::spawn(async move { capability.get().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    first.abort();

    let second = capability.get().await;

    assert!(second.is_ok());
    assert_eq!(built.load(Ordering::SeqCst), 1);
    assert_eq!(capability.construction_attempts(), 1);
}

#[tokio::test]
async fn given_failed_construction_without_cooldown_when_getting_again_then_failure_is_cached() {
    let capability: LazyCapability<dyn TranscriptionEngine> = LazyCapability::new(
        "transcription",
        Arc::new(|| -> Result<Arc<dyn TranscriptionEngine>, String> {
            Err("model missing".to_string())
        }),
        None,
    );

    let first = capability.get().await;
    let second = capability.get().await;

    assert_eq!(first.err(), Some(BackendError::Unavailable("model missing".to_string())));
    assert_eq!(second.err(), Some(BackendError::Unavailable("model missing".to_string())));
    assert_eq!(capability.construction_attempts(), 1);
}

#[tokio::test]
async fn given_failed_construction_with_elapsed_cooldown_when_getting_then_retries_and_recovers() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let capability: LazyCapability<dyn TranscriptionEngine> = LazyCapability::new(
        "transcription",
        Arc::new(move || -> Result<Arc<dyn TranscriptionEngine>, String> {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err("warming up".to_string())
            } else {
                Ok(Arc::new(MockTranscriptionEngine::returning("hi")))
            }
        }),
        Some(Duration::from_millis(20)),
    );

    assert!(capability.get().await.is_err());
    assert!(capability.get().await.is_err(), "still cooling down");

    tokio::time::sleep(Duration::from_millis(40)).await;

    assert!(capability.get().await.is_ok());
    assert_eq!(capability.construction_attempts(), 2);
}

#[tokio::test]
async fn given_disabled_capability_when_getting_then_unavailable_without_building() {
    let capability: LazyCapability<dyn TranscriptionEngine> =
        LazyCapability::disabled("transcription", "transcription is disabled");

    let result = capability.get().await;

    assert!(matches!(result, Err(BackendError::Unavailable(_))));
    assert_eq!(capability.construction_attempts(), 0);
}
