pub mod quality;
pub mod selector;

use std::fmt;
use std::str::FromStr;
use crate::errors::{AppError, Result};

pub use quality::Quality;
pub use selector::FormatResolver;

/// Prefix that hands stream selection entirely to the caller
pub const CUSTOM_PREFIX: &str = "custom:";

/// Format used when the caller does not pick one
pub const DEFAULT_FORMAT: &str = "any";

/// Audio-only outputs that are extracted and re-encoded after download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCodec {
    M4a,
    Mp3,
    Opus,
    Wav,
}

impl AudioCodec {
    pub const ALL: [AudioCodec; 4] = [AudioCodec::M4a, AudioCodec::Mp3, AudioCodec::Opus, AudioCodec::Wav];

    pub fn as_str(&self) -> &'static str {
        match self {
            AudioCodec::M4a => "m4a",
            AudioCodec::Mp3 => "mp3",
            AudioCodec::Opus => "opus",
            AudioCodec::Wav => "wav",
        }
    }

    /// Whether the container can carry an embedded cover image
    pub fn supports_thumbnail(&self) -> bool {
        !matches!(self, AudioCodec::Wav)
    }
}

impl FromStr for AudioCodec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        AudioCodec::ALL
            .iter()
            .copied()
            .find(|codec| codec.as_str() == s)
            .ok_or_else(|| AppError::UnknownFormat(s.to_string()))
    }
}

impl fmt::Display for AudioCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format requested by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    Any,
    Mp4,
    Audio(AudioCodec),
    Thumbnail,
    Subtitles,
    /// Raw selector passed through untouched
    Custom(String),
}

impl Format {
    /// Parses a user-facing format name. `None` and the empty string both
    /// mean [`Format::Any`]; the `custom:` prefix is checked before any
    /// literal name.
    pub fn parse(name: Option<&str>) -> Result<Self> {
        let name = match name {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_FORMAT,
        };

        if let Some(selector) = name.strip_prefix(CUSTOM_PREFIX) {
            return Ok(Format::Custom(selector.to_string()));
        }

        match name {
            "any" => Ok(Format::Any),
            "mp4" => Ok(Format::Mp4),
            "thumbnail" => Ok(Format::Thumbnail),
            "subtitles" => Ok(Format::Subtitles),
            other => other
                .parse::<AudioCodec>()
                .map(Format::Audio)
                .map_err(|_| AppError::UnknownFormat(other.to_string())),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Format::Any => "any".to_string(),
            Format::Mp4 => "mp4".to_string(),
            Format::Audio(codec) => codec.as_str().to_string(),
            Format::Thumbnail => "thumbnail".to_string(),
            Format::Subtitles => "subtitles".to_string(),
            Format::Custom(selector) => format!("{}{}", CUSTOM_PREFIX, selector),
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Format::Any | Format::Mp4)
    }
}

impl FromStr for Format {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Format::parse(Some(s))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
