use log::debug;
use crate::errors::Result;
use super::quality::{AUDIO_ONLY, BEST};
use super::Format;

/// Selector that picks the best audio stream, or the best combined one
pub const BEST_AUDIO: &str = "bestaudio/best";

/// Sentinel returned for subtitle-only requests; the options drive the engine
pub const SUBTITLES: &str = "subtitles";

/// Builds yt-dlp format selectors from a format + quality choice
pub struct FormatResolver;

impl FormatResolver {
    /// Resolves a user-facing format name and quality to a selector string.
    ///
    /// Fails with `AppError::UnknownFormat` when the name is not recognized.
    pub fn resolve(format: Option<&str>, quality: &str) -> Result<String> {
        let parsed = Format::parse(format)?;
        let selector = Self::selector_for(&parsed, quality);
        debug!("Resolved format '{}' (quality '{}') to selector '{}'", parsed, quality, selector);
        Ok(selector)
    }

    /// Selector for an already parsed format. Quality is only consulted for
    /// the video formats.
    pub fn selector_for(format: &Format, quality: &str) -> String {
        match format {
            Format::Custom(selector) => selector.clone(),
            // Nothing is downloaded besides the thumbnail
            Format::Thumbnail => BEST_AUDIO.to_string(),
            // Audio quality is applied when re-encoding, not when picking streams
            Format::Audio(_) => BEST_AUDIO.to_string(),
            Format::Any | Format::Mp4 => Self::video_selector(format, quality),
            Format::Subtitles => SUBTITLES.to_string(),
        }
    }

    fn video_selector(format: &Format, quality: &str) -> String {
        if quality == AUDIO_ONLY {
            return BEST_AUDIO.to_string();
        }

        let (video_ext, audio_ext) = match format {
            Format::Mp4 => ("[ext=mp4]", "[ext=m4a]"),
            _ => ("", ""),
        };
        let height = if quality != BEST {
            format!("[height<={}]", quality)
        } else {
            String::new()
        };
        let video = format!("{}{}", height, video_ext);

        format!("bestvideo{}+bestaudio{}/best{}", video, audio_ext, video)
    }
}
