use log::{debug, warn};
use crate::formats::quality::BEST;
use crate::formats::{AudioCodec, Format};
use super::{DownloadOptions, ExtractQuality, OutputTemplate, PostProcessor};

/// Template used for the subtitle file when only subtitles are requested
pub const TRANSCRIPT_TEMPLATE: &str = "transcript.srt";

/// Subtitle format requested from the engine
pub const SUBTITLE_FORMAT: &str = "ttml";

/// Adds format-specific flags and post-processing steps to caller options
pub struct OptionsAugmenter;

impl OptionsAugmenter {
    /// Returns a copy of `base` extended for `format`/`quality`.
    ///
    /// Never fails: an unrecognized format yields an unchanged copy (with an
    /// explicit, possibly empty, `postprocessors` list). Derived steps always
    /// run before the ones already in `base`.
    pub fn augment(format: &str, quality: &str, base: &DownloadOptions) -> DownloadOptions {
        match Format::parse(Some(format)) {
            Ok(parsed) => Self::augment_format(&parsed, quality, base),
            Err(_) => {
                warn!("No extra options for unrecognized format '{}'", format);
                Self::augment_format(&Format::Any, quality, base)
            }
        }
    }

    pub fn augment_format(format: &Format, quality: &str, base: &DownloadOptions) -> DownloadOptions {
        let mut opts = base.clone();
        let mut postprocessors = Vec::new();

        match format {
            Format::Audio(codec) => Self::audio(*codec, quality, &mut opts, &mut postprocessors),
            Format::Thumbnail => {
                opts.skip_download = Some(true);
                opts.write_thumbnail = Some(true);
                postprocessors.push(Self::jpg_thumbnails());
            }
            Format::Subtitles => {
                opts.skip_download = Some(true);
                opts.write_subs = Some(true);
                opts.write_auto_subs = Some(true);
                // quality carries the language code here
                opts.sub_lang = Some(quality.to_string());
                opts.sub_format = Some(SUBTITLE_FORMAT.to_string());
                opts.output_template = Some(OutputTemplate::default_only(TRANSCRIPT_TEMPLATE));
            }
            Format::Any | Format::Mp4 | Format::Custom(_) => {}
        }

        debug!(
            "Derived {} postprocessor(s) for format '{}', keeping {} from caller",
            postprocessors.len(),
            format,
            base.postprocessors().len()
        );

        postprocessors.extend(opts.postprocessors.take().unwrap_or_default());
        opts.postprocessors = Some(postprocessors);
        opts
    }

    fn audio(
        codec: AudioCodec,
        quality: &str,
        opts: &mut DownloadOptions,
        postprocessors: &mut Vec<PostProcessor>,
    ) {
        let quality = if quality == BEST {
            ExtractQuality::Level(0)
        } else {
            ExtractQuality::Raw(quality.to_string())
        };
        postprocessors.push(PostProcessor::ExtractAudio {
            codec: codec.as_str().to_string(),
            quality,
        });

        // Leave thumbnails alone when the caller already configured them
        if codec.supports_thumbnail() && !opts.writes_thumbnail() {
            opts.write_thumbnail = Some(true);
            postprocessors.push(Self::jpg_thumbnails());
            postprocessors.push(PostProcessor::Metadata);
            postprocessors.push(PostProcessor::EmbedThumbnail);
        }
    }

    fn jpg_thumbnails() -> PostProcessor {
        PostProcessor::ConvertThumbnails {
            format: "jpg".to_string(),
            when: "before_dl".to_string(),
        }
    }
}
