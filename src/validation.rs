//! Validation of field values against format and bounds.
//
// Errors accumulate: a value that round-trips is checked against both
// bounds. Only a failed parse stops the checks.

use crate::config::{render_template, FieldConfig, MessageTemplates};
use crate::formatter::format_value;
use crate::parser::parse_text;
use crate::time_value::{Clock, FieldValue};
use log::debug;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("{value} is not a valid time - it must be in the format {format}")]
    InvalidFormat { value: String, format: String },
    #[error("The time in this field must be equal to or after {min}")]
    BelowMinimum { min: String },
    #[error("The time in this field must be equal to or before {max}")]
    AboveMaximum { max: String },
}

impl ValidationError {
    /// Render with the configured templates instead of the built-in text.
    pub fn message(&self, templates: &MessageTemplates) -> String {
        match self {
            ValidationError::InvalidFormat { value, format } => {
                render_template(&templates.invalid, &[value.as_str(), format.as_str()])
            }
            ValidationError::BelowMinimum { min } => render_template(&templates.min, &[min.as_str()]),
            ValidationError::AboveMaximum { max } => render_template(&templates.max, &[max.as_str()]),
        }
    }
}

/// Checks candidate values against a field configuration.
pub struct Validator<'a> {
    config: &'a FieldConfig,
    clock: &'a dyn Clock,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a FieldConfig, clock: &'a dyn Clock) -> Self {
        Self { config, clock }
    }

    pub fn validate(&self, value: &FieldValue) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if value.is_empty() {
            return errors;
        }

        let config = self.config;
        let text = format_value(value, &config.format);
        let Some(parsed) = parse_text(&text, &config.format, &config.alt_formats, self.clock)
        else {
            debug!("Value '{}' does not round-trip through '{}'", text, config.format);
            errors.push(ValidationError::InvalidFormat {
                value: text,
                format: config.format.pattern().to_string(),
            });
            return errors;
        };

        // Bounds use the held time; the display format may drop minutes.
        let checked = value.as_time().copied().unwrap_or(parsed);
        if let Some(min) = &config.min_value {
            if checked.is_before(min) {
                errors.push(ValidationError::BelowMinimum {
                    min: config.format.format_time(min.time_of_day()),
                });
            }
        }
        if let Some(max) = &config.max_value {
            if checked.is_after(max) {
                errors.push(ValidationError::AboveMaximum {
                    max: config.format.format_time(max.time_of_day()),
                });
            }
        }

        errors
    }

    /// Validate and render every error with the configured templates.
    pub fn messages(&self, value: &FieldValue) -> Vec<String> {
        self.validate(value).iter().map(|e| e.message(&self.config.messages)).collect()
    }
}
