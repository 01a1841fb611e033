pub mod augment;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::errors::Result;

pub use augment::OptionsAugmenter;

pub const SKIP_DOWNLOAD: &str = "skip_download";
pub const WRITE_SUBS: &str = "write_subs";
pub const WRITE_AUTO_SUBS: &str = "write_auto_subs";
pub const SUB_LANG: &str = "sub_lang";
pub const SUB_FORMAT: &str = "sub_format";
pub const OUTTMPL: &str = "outtmpl";
pub const WRITE_THUMBNAIL: &str = "writethumbnail";
pub const POSTPROCESSORS: &str = "postprocessors";

/// Options handed to the download engine.
///
/// Only the keys this crate ever sets are typed, and only when the caller's
/// value already has the expected JSON type. Everything else, including
/// nulls and non-bool flags, lives in `extra` and is passed through
/// verbatim. A typed value replaces an `extra` entry of the same name when
/// serialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct DownloadOptions {
    pub skip_download: Option<bool>,
    pub write_subs: Option<bool>,
    pub write_auto_subs: Option<bool>,
    pub sub_lang: Option<String>,
    pub sub_format: Option<String>,
    /// `outtmpl`
    pub output_template: Option<OutputTemplate>,
    /// `writethumbnail`
    pub write_thumbnail: Option<bool>,
    /// Executed by the engine in order
    pub postprocessors: Option<Vec<PostProcessor>>,
    pub extra: Map<String, Value>,
}

impl DownloadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// True when the caller already switched thumbnail writing on, by any
    /// truthy value
    pub fn writes_thumbnail(&self) -> bool {
        match self.write_thumbnail {
            Some(flag) => flag,
            None => self.extra.get(WRITE_THUMBNAIL).map_or(false, is_truthy),
        }
    }

    pub fn postprocessors(&self) -> &[PostProcessor] {
        self.postprocessors.as_deref().unwrap_or(&[])
    }

    /// Top-level keys of `overlay` replace the ones in `self`
    pub fn merged_with(&self, overlay: &DownloadOptions) -> Result<Self> {
        let mut merged = match self.to_json_value()? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        if let Value::Object(top) = overlay.to_json_value()? {
            merged.extend(top);
        }
        Self::from_value(Value::Object(merged))
    }
}

/// Python-style truthiness, the way the engine reads its flags
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn postprocessor_list(value: &Value) -> Option<Vec<PostProcessor>> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(map) => Some(PostProcessor::from(map.clone())),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

fn output_template(value: &Value) -> Option<OutputTemplate> {
    match value {
        Value::String(template) => Some(OutputTemplate::Single(template.clone())),
        Value::Object(map) => Some(OutputTemplate::PerType(map.clone())),
        _ => None,
    }
}

impl From<Map<String, Value>> for DownloadOptions {
    fn from(map: Map<String, Value>) -> Self {
        let flag = |key: &str| map.get(key).and_then(Value::as_bool);
        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

        let mut opts = DownloadOptions {
            skip_download: flag(SKIP_DOWNLOAD),
            write_subs: flag(WRITE_SUBS),
            write_auto_subs: flag(WRITE_AUTO_SUBS),
            sub_lang: text(SUB_LANG),
            sub_format: text(SUB_FORMAT),
            output_template: map.get(OUTTMPL).and_then(output_template),
            write_thumbnail: flag(WRITE_THUMBNAIL),
            postprocessors: map.get(POSTPROCESSORS).and_then(postprocessor_list),
            extra: Map::new(),
        };

        // whatever was not claimed by a typed field stays, in caller order
        let claimed = opts.typed_keys();
        opts.extra = map
            .into_iter()
            .filter(|(key, _)| !claimed.iter().any(|typed| *typed == key.as_str()))
            .collect();
        opts
    }
}

impl DownloadOptions {
    fn typed_keys(&self) -> Vec<&'static str> {
        let set = [
            (SKIP_DOWNLOAD, self.skip_download.is_some()),
            (WRITE_SUBS, self.write_subs.is_some()),
            (WRITE_AUTO_SUBS, self.write_auto_subs.is_some()),
            (SUB_LANG, self.sub_lang.is_some()),
            (SUB_FORMAT, self.sub_format.is_some()),
            (OUTTMPL, self.output_template.is_some()),
            (WRITE_THUMBNAIL, self.write_thumbnail.is_some()),
            (POSTPROCESSORS, self.postprocessors.is_some()),
        ];
        set.into_iter().filter(|(_, present)| *present).map(|(key, _)| key).collect()
    }
}

impl From<DownloadOptions> for Map<String, Value> {
    fn from(opts: DownloadOptions) -> Self {
        let mut map = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        };

        put(SKIP_DOWNLOAD, opts.skip_download.map(Value::Bool));
        put(WRITE_SUBS, opts.write_subs.map(Value::Bool));
        put(WRITE_AUTO_SUBS, opts.write_auto_subs.map(Value::Bool));
        put(SUB_LANG, opts.sub_lang.map(Value::String));
        put(SUB_FORMAT, opts.sub_format.map(Value::String));
        put(OUTTMPL, opts.output_template.map(|template| match template {
            OutputTemplate::Single(template) => Value::String(template),
            OutputTemplate::PerType(per_type) => Value::Object(per_type),
        }));
        put(WRITE_THUMBNAIL, opts.write_thumbnail.map(Value::Bool));
        put(POSTPROCESSORS, opts.postprocessors.map(|list| {
            Value::Array(list.into_iter().map(|p| Value::Object(p.into())).collect())
        }));

        for (key, value) in opts.extra {
            if !map.contains_key(&key) {
                map.insert(key, value);
            }
        }
        map
    }
}

/// `outtmpl` accepts either one template or a template per output type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputTemplate {
    Single(String),
    PerType(Map<String, Value>),
}

impl OutputTemplate {
    pub fn default_only(template: &str) -> Self {
        let mut map = Map::new();
        map.insert("default".to_string(), Value::String(template.to_string()));
        OutputTemplate::PerType(map)
    }

    pub fn default_template(&self) -> Option<&str> {
        match self {
            OutputTemplate::Single(template) => Some(template),
            OutputTemplate::PerType(map) => map.get("default").and_then(Value::as_str),
        }
    }
}

/// Quality passed to the audio extractor: `0` is the engine's best
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractQuality {
    Level(u8),
    Raw(String),
}

impl ExtractQuality {
    fn to_value(&self) -> Value {
        match self {
            ExtractQuality::Level(level) => Value::from(*level),
            ExtractQuality::Raw(raw) => Value::String(raw.clone()),
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .map(ExtractQuality::Level),
            Value::String(s) => Some(ExtractQuality::Raw(s.clone())),
            _ => None,
        }
    }
}

pub const KEY_EXTRACT_AUDIO: &str = "FFmpegExtractAudio";
pub const KEY_THUMBNAILS_CONVERTOR: &str = "FFmpegThumbnailsConvertor";
pub const KEY_METADATA: &str = "FFmpegMetadata";
pub const KEY_EMBED_THUMBNAIL: &str = "EmbedThumbnail";

/// One post-processing step, serialized as the engine's `{"key": ...}` object.
///
/// Caller-supplied steps that do not exactly match a known shape are kept as
/// `Other`, so they serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub enum PostProcessor {
    ExtractAudio { codec: String, quality: ExtractQuality },
    ConvertThumbnails { format: String, when: String },
    Metadata,
    EmbedThumbnail,
    Other(Map<String, Value>),
}

impl PostProcessor {
    pub fn key(&self) -> Option<&str> {
        match self {
            PostProcessor::ExtractAudio { .. } => Some(KEY_EXTRACT_AUDIO),
            PostProcessor::ConvertThumbnails { .. } => Some(KEY_THUMBNAILS_CONVERTOR),
            PostProcessor::Metadata => Some(KEY_METADATA),
            PostProcessor::EmbedThumbnail => Some(KEY_EMBED_THUMBNAIL),
            PostProcessor::Other(map) => map.get("key").and_then(Value::as_str),
        }
    }

    fn recognize(map: &Map<String, Value>) -> Option<Self> {
        let field = |name: &str| map.get(name).and_then(Value::as_str).map(str::to_string);

        match map.get("key")?.as_str()? {
            KEY_EXTRACT_AUDIO => Some(PostProcessor::ExtractAudio {
                codec: field("preferredcodec")?,
                quality: ExtractQuality::from_value(map.get("preferredquality")?)?,
            }),
            KEY_THUMBNAILS_CONVERTOR => Some(PostProcessor::ConvertThumbnails {
                format: field("format")?,
                when: field("when")?,
            }),
            KEY_METADATA => Some(PostProcessor::Metadata),
            KEY_EMBED_THUMBNAIL => Some(PostProcessor::EmbedThumbnail),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for PostProcessor {
    fn from(map: Map<String, Value>) -> Self {
        match PostProcessor::recognize(&map) {
            // extra fields would be lost in the typed form
            Some(known) if Map::from(known.clone()) == map => known,
            _ => PostProcessor::Other(map),
        }
    }
}

impl From<PostProcessor> for Map<String, Value> {
    fn from(processor: PostProcessor) -> Self {
        let mut map = Map::new();
        match processor {
            PostProcessor::ExtractAudio { codec, quality } => {
                map.insert("key".to_string(), KEY_EXTRACT_AUDIO.into());
                map.insert("preferredcodec".to_string(), Value::String(codec));
                map.insert("preferredquality".to_string(), quality.to_value());
            }
            PostProcessor::ConvertThumbnails { format, when } => {
                map.insert("key".to_string(), KEY_THUMBNAILS_CONVERTOR.into());
                map.insert("format".to_string(), Value::String(format));
                map.insert("when".to_string(), Value::String(when));
            }
            PostProcessor::Metadata => {
                map.insert("key".to_string(), KEY_METADATA.into());
            }
            PostProcessor::EmbedThumbnail => {
                map.insert("key".to_string(), KEY_EMBED_THUMBNAIL.into());
            }
            PostProcessor::Other(other) => return other,
        }
        map
    }
}
