//! Turns a user-facing "format + quality" choice into what a yt-dlp style
//! download engine needs: a format selector string and an options mapping
//! with the matching post-processing steps.

pub mod cli;
pub mod config;
pub mod errors;
pub mod formats;
pub mod options;
pub mod security;

use serde::Serialize;
use crate::errors::Result;
use crate::formats::{Format, FormatResolver};
use crate::options::{DownloadOptions, OptionsAugmenter};

/// Everything the engine is handed for one download
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadRequest {
    pub format: String,
    pub ytdl_opts: DownloadOptions,
}

/// Resolves the selector, then augments `base` for the same format.
pub fn build_request(format: Option<&str>, quality: &str, base: &DownloadOptions) -> Result<DownloadRequest> {
    let parsed = Format::parse(format)?;
    let selector = FormatResolver::selector_for(&parsed, quality);
    let ytdl_opts = OptionsAugmenter::augment_format(&parsed, quality, base);

    log::info!("Prepared '{}' request with selector '{}'", parsed, selector);
    Ok(DownloadRequest {
        format: selector,
        ytdl_opts,
    })
}
