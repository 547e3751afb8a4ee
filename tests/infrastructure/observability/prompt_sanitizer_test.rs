use voiceturn::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_short_prompt_when_sanitizing_then_returned_trimmed() {
    assert_eq!(sanitize_prompt("  what time is it  "), "what time is it");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncated_with_total() {
    let prompt = "a".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"a".repeat(100)));
    assert!(sanitized.ends_with("... (150 chars total)"));
}

#[test]
fn given_multibyte_text_past_limit_when_sanitizing_then_cut_on_char_boundary() {
    let prompt = "ø".repeat(120);

    let sanitized = sanitize_prompt(&prompt);

    assert!(sanitized.starts_with(&"ø".repeat(100)));
    assert!(sanitized.contains("(120 chars total)"));
}

#[test]
fn given_secrets_when_sanitizing_then_values_are_redacted() {
    let sanitized = sanitize_prompt("call with Bearer abc123 and api_key=xyz&x=1");

    assert!(!sanitized.contains("abc123"));
    assert!(!sanitized.contains("xyz"));
    assert!(sanitized.contains("Bearer [REDACTED]"));
    assert!(sanitized.contains("api_key=[REDACTED]&x=1"));
}
