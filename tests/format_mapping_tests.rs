use dl_formats::build_request;
use dl_formats::errors::AppError;
use dl_formats::formats::FormatResolver;
use dl_formats::options::{DownloadOptions, OptionsAugmenter, PostProcessor};
use serde_json::json;

#[test]
fn audio_formats_select_best_audio_for_any_quality() {
    for format in ["m4a", "mp3", "opus", "wav"] {
        for quality in ["best", "0", "5", "720", "audio"] {
            assert_eq!(FormatResolver::resolve(Some(format), quality).unwrap(), "bestaudio/best");
        }
    }
}

#[test]
fn documented_selectors() {
    assert_eq!(
        FormatResolver::resolve(Some("mp4"), "720").unwrap(),
        "bestvideo[height<=720][ext=mp4]+bestaudio[ext=m4a]/best[height<=720][ext=mp4]"
    );
    assert_eq!(FormatResolver::resolve(Some("any"), "best").unwrap(), "bestvideo+bestaudio/best");
    assert_eq!(FormatResolver::resolve(Some("mp4"), "audio").unwrap(), "bestaudio/best");
    assert_eq!(FormatResolver::resolve(Some("thumbnail"), "1080").unwrap(), "bestaudio/best");
    assert_eq!(FormatResolver::resolve(Some("subtitles"), "en").unwrap(), "subtitles");
    assert_eq!(
        FormatResolver::resolve(None, "best").unwrap(),
        FormatResolver::resolve(Some("any"), "best").unwrap()
    );
}

#[test]
fn custom_selector_is_returned_verbatim() {
    for selector in ["", "XYZ", "bv*[vcodec^=av01]+ba/b", "custom:nested"] {
        let format = format!("custom:{}", selector);
        assert_eq!(FormatResolver::resolve(Some(format.as_str()), "720").unwrap(), selector);
    }
}

#[test]
fn bogus_format_is_rejected_by_resolver_only() {
    assert!(matches!(
        FormatResolver::resolve(Some("bogus"), "best"),
        Err(AppError::UnknownFormat(_))
    ));
    assert!(build_request(Some("bogus"), "best", &DownloadOptions::new()).is_err());

    // the augmenter never validates
    let opts = OptionsAugmenter::augment("bogus", "best", &DownloadOptions::new());
    assert!(opts.postprocessors().is_empty());
}

#[test]
fn mp3_best_document() {
    let opts = OptionsAugmenter::augment("mp3", "best", &DownloadOptions::new());
    assert_eq!(
        opts.to_json_value().unwrap(),
        json!({
            "writethumbnail": true,
            "postprocessors": [
                {"key": "FFmpegExtractAudio", "preferredcodec": "mp3", "preferredquality": 0},
                {"key": "FFmpegThumbnailsConvertor", "format": "jpg", "when": "before_dl"},
                {"key": "FFmpegMetadata"},
                {"key": "EmbedThumbnail"},
            ],
        })
    );
}

#[test]
fn wav_document() {
    let opts = OptionsAugmenter::augment("wav", "5", &DownloadOptions::new());
    assert_eq!(
        opts.to_json_value().unwrap(),
        json!({
            "postprocessors": [
                {"key": "FFmpegExtractAudio", "preferredcodec": "wav", "preferredquality": "5"},
            ],
        })
    );
}

#[test]
fn subtitles_document() {
    let opts = OptionsAugmenter::augment("subtitles", "fr", &DownloadOptions::new());
    assert_eq!(opts.skip_download, Some(true));
    assert_eq!(opts.write_subs, Some(true));
    assert_eq!(opts.write_auto_subs, Some(true));
    assert_eq!(opts.sub_lang.as_deref(), Some("fr"));
    assert_eq!(opts.sub_format.as_deref(), Some("ttml"));
    assert!(opts.postprocessors().is_empty());
    assert_eq!(
        opts.output_template.as_ref().and_then(|t| t.default_template()),
        Some("transcript.srt")
    );
}

#[test]
fn caller_postprocessors_follow_derived_ones_in_order() {
    let base = DownloadOptions::from_value(json!({
        "postprocessors": [
            {"key": "SponsorBlock", "categories": ["sponsor"]},
            {"key": "ModifyChapters", "remove_sponsor_segments": ["sponsor"]},
        ],
    }))
    .unwrap();

    for (format, derived) in [("mp3", 4), ("wav", 1), ("thumbnail", 1), ("subtitles", 0), ("mp4", 0)] {
        let before = base.clone();
        let opts = OptionsAugmenter::augment(format, "best", &base);
        assert_eq!(base, before, "base options changed for {}", format);

        let keys: Vec<_> = opts.postprocessors()[derived..].iter().map(PostProcessor::key).collect();
        assert_eq!(keys, vec![Some("SponsorBlock"), Some("ModifyChapters")], "format {}", format);
        assert_eq!(opts.postprocessors().len(), derived + 2);
    }
}

#[test]
fn request_combines_selector_and_options() {
    let base = DownloadOptions::from_value(json!({"quiet": true})).unwrap();
    let request = build_request(Some("opus"), "best", &base).unwrap();

    assert_eq!(request.format, "bestaudio/best");
    assert_eq!(request.ytdl_opts.extra.get("quiet"), Some(&json!(true)));
    assert_eq!(request.ytdl_opts.postprocessors().len(), 4);

    let video = build_request(None, "480", &DownloadOptions::new()).unwrap();
    assert_eq!(video.format, "bestvideo[height<=480]+bestaudio/best[height<=480]");
    assert_eq!(serde_json::to_value(&video.ytdl_opts).unwrap(), json!({"postprocessors": []}));
}
