//! Audio encoding preference and selection.

/// Encodings the recording controller knows how to tag an artifact with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    OpusWebm,
    OpusOgg,
    Wav,
    Mp3,
    Mp4,
    /// Container-only fallback when the device reports support for none
    /// of the preferred encodings.
    Webm,
}

/// Preference order: first supported wins.
pub const PREFERRED_ENCODINGS: [AudioEncoding; 5] = [
    AudioEncoding::OpusWebm,
    AudioEncoding::OpusOgg,
    AudioEncoding::Wav,
    AudioEncoding::Mp3,
    AudioEncoding::Mp4,
];

impl AudioEncoding {
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioEncoding::OpusWebm => "audio/webm;codecs=opus",
            AudioEncoding::OpusOgg => "audio/ogg;codecs=opus",
            AudioEncoding::Wav => "audio/wav",
            AudioEncoding::Mp3 => "audio/mp3",
            AudioEncoding::Mp4 => "audio/mp4",
            AudioEncoding::Webm => "audio/webm",
        }
    }

    /// Pick the first preferred encoding the device supports, falling
    /// back to plain webm.
    pub fn select(supports: impl Fn(AudioEncoding) -> bool) -> AudioEncoding {
        PREFERRED_ENCODINGS
            .into_iter()
            .find(|e| supports(*e))
            .unwrap_or(AudioEncoding::Webm)
    }
}
