use voiceturn::domain::{SessionId, StoragePath};

#[test]
fn given_session_id_and_filename_when_creating_path_then_format_is_uuid_slash_filename() {
    let session_id = SessionId::new();
    let path = StoragePath::new(&session_id, "reply.wav");

    let expected = format!("{}/reply.wav", session_id.as_uuid());
    assert_eq!(path.as_str(), expected);
}

#[test]
fn given_two_different_sessions_when_creating_paths_then_paths_differ() {
    let path_a = StoragePath::new(&SessionId::new(), "reply.wav");
    let path_b = StoragePath::new(&SessionId::new(), "reply.wav");

    assert_ne!(path_a, path_b);
}

#[test]
fn given_storage_path_when_splitting_then_exposes_session_and_file_name() {
    let session_id = SessionId::new();
    let path = StoragePath::new(&session_id, "reply.mp3");

    assert_eq!(path.session_segment(), session_id.to_string());
    assert_eq!(path.file_name(), "reply.mp3");
    assert_eq!(format!("{}", path), path.as_str());
}
