use std::sync::Arc;

use voiceturn::application::ports::{AudioConverter, BackendError};
use voiceturn::application::services::FormatNormalizer;
use voiceturn::domain::SessionId;

use crate::helpers::mocks::{ConverterBehavior, MockConverter};

fn normalizer(mocks: Vec<Arc<MockConverter>>) -> (tempfile::TempDir, FormatNormalizer) {
    let scratch = tempfile::TempDir::new().unwrap();
    let converters: Vec<Arc<dyn AudioConverter>> = mocks
        .into_iter()
        .map(|m| m as Arc<dyn AudioConverter>)
        .collect();
    let normalizer = FormatNormalizer::new(converters, scratch.path().to_path_buf());
    (scratch, normalizer)
}

#[tokio::test]
async fn given_empty_input_when_normalizing_then_format_unsupported_without_calling_converters() {
    let converter = MockConverter::new("ok", ConverterBehavior::Produces(160));
    let (_scratch, normalizer) = normalizer(vec![converter.clone()]);

    let result = normalizer.normalize(&SessionId::new(), b"").await;

    assert!(matches!(result, Err(BackendError::FormatUnsupported(_))));
    assert_eq!(converter.calls(), 0);
}

#[tokio::test]
async fn given_unavailable_and_failing_converters_when_normalizing_then_first_success_wins() {
    let missing = MockConverter::new("missing", ConverterBehavior::Unavailable);
    let broken = MockConverter::new("broken", ConverterBehavior::Fails);
    let silent = MockConverter::new("silent", ConverterBehavior::Empty);
    let working = MockConverter::new("working", ConverterBehavior::Produces(320));
    let never = MockConverter::new("never", ConverterBehavior::Produces(1));
    let (_scratch, normalizer) = normalizer(vec![
        missing.clone(),
        broken.clone(),
        silent.clone(),
        working.clone(),
        never.clone(),
    ]);

    let pcm = normalizer
        .normalize(&SessionId::new(), b"some audio")
        .await
        .unwrap();

    assert_eq!(pcm.samples.len(), 320);
    assert!(pcm.is_canonical());
    assert_eq!(missing.calls(), 0);
    assert_eq!(broken.calls(), 1);
    assert_eq!(silent.calls(), 1);
    assert_eq!(working.calls(), 1);
    assert_eq!(never.calls(), 0);
}

#[tokio::test]
async fn given_every_converter_failing_when_normalizing_then_reason_lists_each_failure() {
    let (_scratch, normalizer) = normalizer(vec![
        MockConverter::new("first", ConverterBehavior::Fails),
        MockConverter::new("second", ConverterBehavior::Empty),
    ]);

    let result = normalizer.normalize(&SessionId::new(), b"garbage").await;

    match result {
        Err(BackendError::FormatUnsupported(reason)) => {
            assert!(reason.contains("first"));
            assert!(reason.contains("second"));
        }
        other => panic!("expected FormatUnsupported, got {:?}", other.map(|p| p.samples.len())),
    }
}

#[tokio::test]
async fn given_no_available_converter_when_normalizing_then_reports_none_available() {
    let (_scratch, normalizer) = normalizer(vec![MockConverter::new(
        "missing",
        ConverterBehavior::Unavailable,
    )]);

    let result = normalizer.normalize(&SessionId::new(), b"audio").await;

    assert_eq!(
        result.map(|p| p.samples.len()),
        Err(BackendError::FormatUnsupported("no converter available".to_string()))
    );
}

#[tokio::test]
async fn given_successful_normalization_when_returning_then_scratch_directory_is_removed() {
    let converter = MockConverter::new("working", ConverterBehavior::Produces(16));
    let (_scratch, normalizer) = normalizer(vec![converter.clone()]);
    let session_id = SessionId::new();

    normalizer.normalize(&session_id, b"audio").await.unwrap();

    let workdir = converter.seen_workdir.lock().unwrap().clone().unwrap();
    assert!(
        workdir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .contains(&session_id.to_string())
    );
    assert!(!workdir.exists());
}
