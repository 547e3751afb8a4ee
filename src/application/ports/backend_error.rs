use std::time::Duration;

/// Failure taxonomy shared by every backend-facing stage. None of these ever
/// fails a turn; each is turned into a degraded output where it occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("backend timed out after {0:?}")]
    Timeout(Duration),
    #[error("backend rejected the request: {0}")]
    Rejected(String),
    #[error("unsupported audio format: {0}")]
    FormatUnsupported(String),
}

impl BackendError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "backend_unavailable",
            Self::Timeout(_) => "backend_timeout",
            Self::Rejected(_) => "backend_rejected",
            Self::FormatUnsupported(_) => "format_unsupported",
        }
    }
}
