use voiceturn::domain::SessionId;

#[test]
fn given_two_new_sessions_when_comparing_then_ids_differ() {
    assert_ne!(SessionId::new(), SessionId::new());
}

#[test]
fn given_displayed_id_when_parsing_then_round_trips() {
    let id = SessionId::new();

    assert_eq!(SessionId::parse(&id.to_string()), Some(id));
}

#[test]
fn given_malformed_id_when_parsing_then_returns_none() {
    assert_eq!(SessionId::parse("not-a-session"), None);
    assert_eq!(SessionId::parse(""), None);
    assert_eq!(SessionId::parse("../etc/passwd"), None);
}
