use std::path::{Component, Path};
use log::warn;
use serde_json::Value;
use crate::errors::{AppError, Result};
use crate::formats::{Format, Quality};
use crate::options::{DownloadOptions, OutputTemplate};

const MAX_INPUT_LEN: usize = 500;

pub struct InputValidator {
    strict: bool,
}

impl InputValidator {
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Strict mode rejects quality strings that mean nothing for the format
    pub fn strict(strict: bool) -> Self {
        Self { strict }
    }

    pub fn validate_format_name(&self, name: &str) -> Result<Format> {
        // custom selectors may be empty, so only length and control chars are checked
        if name.len() > MAX_INPUT_LEN {
            return Err(AppError::Validation(format!(
                "Format too long (max {} characters)",
                MAX_INPUT_LEN
            )));
        }

        if name.chars().any(|c| c.is_control()) {
            return Err(AppError::Validation("Control characters not allowed in format".to_string()));
        }

        Format::parse(Some(name))
    }

    pub fn validate_quality(&self, format: &Format, quality: &str) -> Result<Quality> {
        if quality.is_empty() {
            return Err(AppError::Validation("Quality cannot be empty".to_string()));
        }

        if quality.len() > MAX_INPUT_LEN {
            return Err(AppError::Validation(format!(
                "Quality too long (max {} characters)",
                MAX_INPUT_LEN
            )));
        }

        let interpreted = Quality::interpret(format, quality);
        if !interpreted.is_typed() {
            // custom selectors and thumbnails ignore quality entirely
            let ignored = matches!(format, Format::Custom(_) | Format::Thumbnail);
            if self.strict && !ignored {
                return Err(AppError::InvalidQuality {
                    format: format.name(),
                    quality: quality.to_string(),
                });
            }
            warn!("Quality '{}' is passed through untyped for format '{}'", quality, format);
        }

        Ok(interpreted)
    }

    /// Rejects output templates that escape the download directory
    pub fn validate_options(&self, opts: &DownloadOptions) -> Result<()> {
        let templates: Vec<&str> = match &opts.output_template {
            None => Vec::new(),
            Some(OutputTemplate::Single(template)) => vec![template.as_str()],
            Some(OutputTemplate::PerType(map)) => map.values().filter_map(Value::as_str).collect(),
        };

        for template in templates {
            self.validate_output_template(template)?;
        }

        Ok(())
    }

    pub fn validate_output_template(&self, template: &str) -> Result<()> {
        if template.is_empty() {
            return Err(AppError::Validation("Output template cannot be empty".to_string()));
        }

        if template.contains('\0') {
            return Err(AppError::Validation("Null bytes not allowed in output template".to_string()));
        }

        let path = Path::new(template);
        if path.components().any(|component| matches!(component, Component::ParentDir)) {
            return Err(AppError::Validation("Path traversal detected in output template".to_string()));
        }

        Ok(())
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}
