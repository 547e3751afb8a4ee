use crate::application::ports::BackendError;

/// Result of a pipeline stage: either the real output or a well-defined
/// stand-in together with the reason the real output is missing.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    Real(T),
    Degraded { value: T, cause: BackendError },
}

impl<T> StageOutcome<T> {
    pub fn degraded(value: T, cause: BackendError) -> Self {
        Self::Degraded { value, cause }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Real(value) | Self::Degraded { value, .. } => value,
        }
    }

    pub fn into_parts(self) -> (T, Option<BackendError>) {
        match self {
            Self::Real(value) => (value, None),
            Self::Degraded { value, cause } => (value, Some(cause)),
        }
    }

    pub fn cause(&self) -> Option<&BackendError> {
        match self {
            Self::Real(_) => None,
            Self::Degraded { cause, .. } => Some(cause),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }
}
