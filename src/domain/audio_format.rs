#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Opus,
    Flac,
    Aac,
    Webm,
}

impl AudioFormat {
    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Opus => "audio/opus",
            Self::Flac => "audio/flac",
            Self::Aac => "audio/aac",
            Self::Webm => "audio/webm",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
            Self::Flac => "flac",
            Self::Aac => "aac",
            Self::Webm => "webm",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "ogg" => Some(Self::Ogg),
            "opus" => Some(Self::Opus),
            "flac" => Some(Self::Flac),
            "aac" | "m4a" => Some(Self::Aac),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }

    /// Guesses the container from its leading magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WAVE" {
            return Some(Self::Wav);
        }
        if data.starts_with(b"OggS") {
            return Some(Self::Ogg);
        }
        if data.starts_with(b"fLaC") {
            return Some(Self::Flac);
        }
        if data.starts_with(&[0x1A, 0x45, 0xDF, 0xA3]) {
            return Some(Self::Webm);
        }
        if data.starts_with(b"ID3") || (data.len() >= 2 && data[0] == 0xFF && data[1] & 0xE0 == 0xE0)
        {
            // 0xFFF1/0xFFF9 is an ADTS frame, the rest of the sync range is MPEG audio.
            if data[0] == 0xFF && (data[1] == 0xF1 || data[1] == 0xF9) {
                return Some(Self::Aac);
            }
            return Some(Self::Mp3);
        }
        if data.len() >= 8 && &data[4..8] == b"ftyp" {
            return Some(Self::Aac);
        }
        None
    }
}
