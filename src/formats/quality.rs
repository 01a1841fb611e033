// Quality strings mean different things per format family: a height cap for
// video, a codec quality level for audio, a language code for subtitles.
// Interpretation never fails; anything unrecognized stays `Raw` and is handed
// to the engine as-is.

use super::Format;

pub const BEST: &str = "best";
pub const AUDIO_ONLY: &str = "audio";

/// Highest value on the engine's audio quality scale (0 is best)
pub const MAX_CODEC_LEVEL: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quality {
    Best,
    AudioOnly,
    MaxHeight(u32),
    CodecLevel(u8),
    Language(String),
    Raw(String),
}

impl Quality {
    pub fn interpret(format: &Format, quality: &str) -> Self {
        if quality == BEST {
            return Quality::Best;
        }

        if format.is_video() {
            if quality == AUDIO_ONLY {
                return Quality::AudioOnly;
            }
            return match quality.parse::<u32>() {
                Ok(height) if height > 0 => Quality::MaxHeight(height),
                _ => Quality::Raw(quality.to_string()),
            };
        }

        match format {
            Format::Audio(_) => match quality.parse::<u8>() {
                Ok(level) if level <= MAX_CODEC_LEVEL => Quality::CodecLevel(level),
                _ => Quality::Raw(quality.to_string()),
            },
            Format::Subtitles if is_language_code(quality) => Quality::Language(quality.to_string()),
            _ => Quality::Raw(quality.to_string()),
        }
    }

    pub fn is_typed(&self) -> bool {
        !matches!(self, Quality::Raw(_))
    }
}

// Loose check: letters, digits and '-' (e.g. "en", "pt-BR", "zh-Hans")
fn is_language_code(value: &str) -> bool {
    !value.is_empty()
        && value.chars().next().map_or(false, |c| c.is_ascii_alphabetic())
        && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::AudioCodec;

    #[test]
    fn video_qualities() {
        assert_eq!(Quality::interpret(&Format::Mp4, "best"), Quality::Best);
        assert_eq!(Quality::interpret(&Format::Any, "audio"), Quality::AudioOnly);
        assert_eq!(Quality::interpret(&Format::Mp4, "720"), Quality::MaxHeight(720));
        assert_eq!(Quality::interpret(&Format::Mp4, "720p"), Quality::Raw("720p".to_string()));
        assert_eq!(Quality::interpret(&Format::Any, "0"), Quality::Raw("0".to_string()));
    }

    #[test]
    fn audio_qualities() {
        let mp3 = Format::Audio(AudioCodec::Mp3);
        assert_eq!(Quality::interpret(&mp3, "best"), Quality::Best);
        assert_eq!(Quality::interpret(&mp3, "5"), Quality::CodecLevel(5));
        assert_eq!(Quality::interpret(&mp3, "11"), Quality::Raw("11".to_string()));
        // bitrates are passed through for the engine to judge
        assert_eq!(Quality::interpret(&mp3, "192K"), Quality::Raw("192K".to_string()));
    }

    #[test]
    fn subtitle_languages() {
        assert_eq!(
            Quality::interpret(&Format::Subtitles, "pt-BR"),
            Quality::Language("pt-BR".to_string())
        );
        assert!(!Quality::interpret(&Format::Subtitles, "en,fr").is_typed());
    }

    #[test]
    fn custom_and_thumbnail_are_raw() {
        let custom = Format::Custom("bv".to_string());
        assert!(!Quality::interpret(&custom, "720").is_typed());
        assert!(!Quality::interpret(&Format::Thumbnail, "720").is_typed());
        assert!(Quality::interpret(&Format::Thumbnail, "best").is_typed());
    }
}
