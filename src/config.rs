use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use crate::errors::{AppError, Result};
use crate::formats::quality::BEST;
use crate::formats::DEFAULT_FORMAT;
use crate::options::DownloadOptions;

const APP_DIR: &str = "dl-formats";
const CONFIG_FILE: &str = "config.json";
const ENV_PREFIX: &str = "DL_FORMATS";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub default_format: String,
    pub default_quality: String,
    pub strict_quality: bool,
    /// Merged under every request before augmentation
    pub base_options: DownloadOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_format: DEFAULT_FORMAT.to_string(),
            default_quality: BEST.to_string(),
            strict_quality: false,
            base_options: DownloadOptions::default(),
        }
    }
}

/// The scalar settings that may be layered from file and environment
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Settings {
    default_format: String,
    default_quality: String,
    strict_quality: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let defaults = AppConfig::default();
        Self {
            default_format: defaults.default_format,
            default_quality: defaults.default_quality,
            strict_quality: defaults.strict_quality,
        }
    }
}

impl AppConfig {
    /// Loads the user config file (if any) with `DL_FORMATS_*` env overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Json).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let scalars: Settings = settings.try_deserialize()?;
        let config = AppConfig {
            default_format: scalars.default_format,
            default_quality: scalars.default_quality,
            strict_quality: scalars.strict_quality,
            base_options: Self::read_base_options(path)?,
        };
        log::debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    // Engine option names are case-sensitive and the config crate lowercases
    // map keys, so base options are read straight from the file.
    fn read_base_options(path: &Path) -> Result<DownloadOptions> {
        if !path.exists() {
            return Ok(DownloadOptions::default());
        }

        let content = std::fs::read_to_string(path)?;
        let mut file: Map<String, Value> = serde_json::from_str(&content)?;
        match file.remove("base_options") {
            Some(value) => DownloadOptions::from_value(value),
            None => Ok(DownloadOptions::default()),
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(config_dir) = path.parent() {
            if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
                std::fs::create_dir_all(config_dir)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config(config::ConfigError::Message("Could not find config directory".to_string())))?;

        Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config.default_format, "any");
        assert_eq!(config.default_quality, "best");
        assert!(!config.strict_quality);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            json!({
                "default_format": "mp3",
                "base_options": {"quiet": true, "writethumbnail": true},
            })
            .to_string(),
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.default_format, "mp3");
        assert_eq!(config.default_quality, "best");
        assert_eq!(config.base_options.write_thumbnail, Some(true));
        assert_eq!(config.base_options.extra.get("quiet"), Some(&json!(true)));
    }

    #[test]
    fn base_option_keys_keep_their_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let base_options = json!({
            "noPlaylist": true,
            "http_headers": {"User-Agent": "X", "Accept-Language": "en"},
        });
        std::fs::write(
            &path,
            json!({"default_quality": "720", "base_options": base_options.clone()}).to_string(),
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.default_quality, "720");
        assert_eq!(config.base_options.to_json_value().unwrap(), base_options);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = AppConfig {
            default_format: "subtitles".to_string(),
            default_quality: "en".to_string(),
            ..AppConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }
}
