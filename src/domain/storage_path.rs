use std::fmt;

use super::session_id::SessionId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new(session_id: &SessionId, filename: &str) -> Self {
        Self(format!("{}/{}", session_id.as_uuid(), filename))
    }

    /// Prefix under which every object of a session lives.
    pub fn session_prefix(session_id: &SessionId) -> Self {
        Self(session_id.as_uuid().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn session_segment(&self) -> &str {
        self.0.split('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
