use bytes::Bytes;

use super::audio_format::AudioFormat;

/// Encoded output audio as it is handed to the artifact store.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioArtifact {
    pub bytes: Bytes,
    pub format: AudioFormat,
}

impl AudioArtifact {
    pub fn new(bytes: impl Into<Bytes>, format: AudioFormat) -> Self {
        Self {
            bytes: bytes.into(),
            format,
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.format.as_mime()
    }

    pub fn file_name(&self) -> String {
        format!("reply.{}", self.format.extension())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
