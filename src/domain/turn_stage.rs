use std::fmt;

/// Lifecycle of a turn. Every stage advances unconditionally to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnStage {
    Ingested,
    Normalized,
    Transcribed,
    Replied,
    Synthesized,
    Stored,
    Complete,
}

impl TurnStage {
    pub fn next(self) -> Self {
        match self {
            Self::Ingested => Self::Normalized,
            Self::Normalized => Self::Transcribed,
            Self::Transcribed => Self::Replied,
            Self::Replied => Self::Synthesized,
            Self::Synthesized => Self::Stored,
            Self::Stored | Self::Complete => Self::Complete,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingested => "ingested",
            Self::Normalized => "normalized",
            Self::Transcribed => "transcribed",
            Self::Replied => "replied",
            Self::Synthesized => "synthesized",
            Self::Stored => "stored",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for TurnStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
