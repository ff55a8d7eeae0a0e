use crate::parser::{parse_text, FormatError, TimeFormat};
use crate::time_value::{Clock, TimeValue};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FORMAT: &str = "h:iA";
pub const DEFAULT_SECONDS_FORMAT: &str = "h:i:sA";

const DEFAULT_ALT_FORMATS: &[&str] = &["g:iA", "g:i A", "h:i A", "giA", "hiA", "gA", "hA", "g A"];
const DEFAULT_SECONDS_ALT_FORMATS: &[&str] = &["g:i:sA", "g:i:s A", "h:i:s A"];

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("placeholder pattern is valid"));

// Tried after the configured formats when resolving bound strings.
const BOUND_FALLBACK_FORMATS: &[&str] = &["H:i:s", "H:i"];

/// Errors raised while turning settings into a usable field configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid format pattern: {0}")]
    Format(#[from] FormatError),
    #[error("Format '{0}' must end with a meridiem marker (a or A)")]
    MissingMeridiem(String),
    #[error("Cannot read {which} bound '{value}' as a time")]
    InvalidBound { which: &'static str, value: String },
    #[error("Minimum {min} is later than maximum {max}")]
    InvertedBounds { min: String, max: String },
}

/// Validation message templates. `{0}` and `{1}` are positional placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub invalid: String,
    pub min: String,
    pub max: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            invalid: "{0} is not a valid time - it must be in the format {1}".to_string(),
            min: "The time in this field must be equal to or after {0}".to_string(),
            max: "The time in this field must be equal to or before {0}".to_string(),
        }
    }
}

/// Fill `{0}`, `{1}`, ... in `template` with `args` in a single pass.
///
/// Placeholders inside substituted text are left alone. Placeholders with no
/// matching argument are kept as written.
pub fn render_template(template: &str, args: &[&str]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|i| args.get(i))
                .map_or_else(|| caps[0].to_string(), |arg| arg.to_string())
        })
        .into_owned()
}

/// Serializable field settings, as written in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSettings {
    #[serde(default)]
    pub capture_seconds: bool,
    pub format: Option<String>,
    pub alt_formats: Option<Vec<String>>,
    pub submit_format: Option<String>,
    pub min_value: Option<String>,
    pub max_value: Option<String>,
    #[serde(default)]
    pub messages: MessageTemplates,
}

/// Resolved configuration consumed by the engine.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    pub capture_seconds: bool,
    pub format: TimeFormat,
    pub alt_formats: Vec<TimeFormat>,
    pub submit_format: Option<TimeFormat>,
    pub min_value: Option<TimeValue>,
    pub max_value: Option<TimeValue>,
    pub messages: MessageTemplates,
}

impl FieldConfig {
    pub fn from_settings(settings: &FieldSettings, clock: &dyn Clock) -> Result<Self, ConfigError> {
        let default_format =
            if settings.capture_seconds { DEFAULT_SECONDS_FORMAT } else { DEFAULT_FORMAT };
        let format = TimeFormat::new(settings.format.as_deref().unwrap_or(default_format))?;
        if !format.ends_with_meridiem() {
            return Err(ConfigError::MissingMeridiem(format.pattern().to_string()));
        }

        let alt_formats = match &settings.alt_formats {
            Some(patterns) => patterns
                .iter()
                .map(|p| TimeFormat::new(p))
                .collect::<Result<Vec<_>, _>>()?,
            None => default_alt_formats(settings.capture_seconds)?,
        };
        for alt in alt_formats.iter().filter(|f| !f.has_meridiem()) {
            warn!(
                "Alternate format '{}' has no meridiem marker and will never match meridiem input",
                alt.pattern()
            );
        }

        let submit_format = settings.submit_format.as_deref().map(TimeFormat::new).transpose()?;

        let mut config = Self {
            capture_seconds: settings.capture_seconds,
            format,
            alt_formats,
            submit_format,
            min_value: None,
            max_value: None,
            messages: settings.messages.clone(),
        };

        if let Some(min) = &settings.min_value {
            config.min_value = Some(config.resolve_bound("minimum", min, clock)?);
        }
        if let Some(max) = &settings.max_value {
            config.max_value = Some(config.resolve_bound("maximum", max, clock)?);
        }
        config.check_bounds()?;

        debug!(
            "Field config: format={}, {} alternates, min={:?}, max={:?}",
            config.format,
            config.alt_formats.len(),
            config.min_value.map(|v| v.to_string()),
            config.max_value.map(|v| v.to_string())
        );
        Ok(config)
    }

    pub fn with_min_value(mut self, value: TimeValue) -> Result<Self, ConfigError> {
        self.min_value = Some(value);
        self.check_bounds()?;
        Ok(self)
    }

    pub fn with_max_value(mut self, value: TimeValue) -> Result<Self, ConfigError> {
        self.max_value = Some(value);
        self.check_bounds()?;
        Ok(self)
    }

    /// Format used for submitted values; falls back to the display format.
    pub fn submit_format(&self) -> &TimeFormat {
        self.submit_format.as_ref().unwrap_or(&self.format)
    }

    fn resolve_bound(
        &self,
        which: &'static str,
        text: &str,
        clock: &dyn Clock,
    ) -> Result<TimeValue, ConfigError> {
        if let Some(value) = parse_text(text, &self.format, &self.alt_formats, clock) {
            return Ok(value);
        }
        for pattern in BOUND_FALLBACK_FORMATS {
            let format = TimeFormat::new(pattern)?;
            if let Some(time) = format.parse_time(text.trim()) {
                return Ok(TimeValue::on_today(time, clock));
            }
        }
        Err(ConfigError::InvalidBound { which, value: text.to_string() })
    }

    fn check_bounds(&self) -> Result<(), ConfigError> {
        if let (Some(min), Some(max)) = (&self.min_value, &self.max_value) {
            if min.is_after(max) {
                return Err(ConfigError::InvertedBounds {
                    min: self.format.format_time(min.time_of_day()),
                    max: self.format.format_time(max.time_of_day()),
                });
            }
        }
        Ok(())
    }
}

fn default_alt_formats(capture_seconds: bool) -> Result<Vec<TimeFormat>, FormatError> {
    let seconds: &[&str] = if capture_seconds { DEFAULT_SECONDS_ALT_FORMATS } else { &[] };
    seconds.iter().chain(DEFAULT_ALT_FORMATS).map(|p| TimeFormat::new(p)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub prompt: String,
    pub show_submit_value: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { prompt: "time> ".to_string(), show_submit_value: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub field: FieldSettings,
    #[serde(default)]
    pub shell: ShellConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        // If config doesn't exist, create default
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(&config_path)?;
            return Ok(default_config);
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "ducktape", "meridiem-field")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::FixedClock;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 4, 22).unwrap().and_hms_opt(8, 0, 0).unwrap())
    }

    #[test]
    fn test_config_default() {
        let config = FieldConfig::from_settings(&FieldSettings::default(), &clock()).unwrap();
        assert_eq!(config.format.pattern(), "h:iA");
        assert_eq!(config.submit_format().pattern(), "h:iA");
        assert!(config.alt_formats.iter().any(|f| f.pattern() == "hiA"));
        assert!(config.min_value.is_none());
        assert!(config.max_value.is_none());
    }

    #[test]
    fn test_capture_seconds_defaults() {
        let settings = FieldSettings { capture_seconds: true, ..Default::default() };
        let config = FieldConfig::from_settings(&settings, &clock()).unwrap();
        assert_eq!(config.format.pattern(), "h:i:sA");
        assert_eq!(config.alt_formats[0].pattern(), "g:i:sA");
    }

    #[test]
    fn test_format_must_end_with_meridiem() {
        let settings = FieldSettings { format: Some("H:i".to_string()), ..Default::default() };
        let err = FieldConfig::from_settings(&settings, &clock()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingMeridiem(_)));
    }

    #[test]
    fn test_bounds_resolve_from_strings() {
        let settings = FieldSettings {
            min_value: Some("9:00AM".to_string()),
            max_value: Some("17:30".to_string()),
            ..Default::default()
        };
        let config = FieldConfig::from_settings(&settings, &clock()).unwrap();
        let min = config.min_value.unwrap();
        let max = config.max_value.unwrap();
        assert_eq!((min.hour(), min.minute()), (9, 0));
        assert_eq!((max.hour(), max.minute()), (17, 30));
    }

    #[test]
    fn test_bad_and_inverted_bounds() {
        let settings = FieldSettings { min_value: Some("lunch".to_string()), ..Default::default() };
        assert!(matches!(
            FieldConfig::from_settings(&settings, &clock()),
            Err(ConfigError::InvalidBound { which: "minimum", .. })
        ));

        let settings = FieldSettings {
            min_value: Some("5:00PM".to_string()),
            max_value: Some("9:00AM".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            FieldConfig::from_settings(&settings, &clock()),
            Err(ConfigError::InvertedBounds { .. })
        ));
    }

    #[test]
    fn test_render_template() {
        let template = "{0} is not a valid time - it must be in the format {1}";
        let rendered = render_template(template, &["9:7x", "h:iA"]);
        assert_eq!(rendered, "9:7x is not a valid time - it must be in the format h:iA");
    }

    #[test]
    fn test_render_template_ignores_placeholders_in_arguments() {
        let template = "{0} is not a valid time - it must be in the format {1}";
        let rendered = render_template(template, &["{1}AM", "h:iA"]);
        assert_eq!(rendered, "{1}AM is not a valid time - it must be in the format h:iA");

        assert_eq!(render_template("{0} and {5}", &["3PM"]), "3PM and {5}");
    }

    #[test]
    fn test_default_alt_format_order() {
        let config = FieldConfig::from_settings(&FieldSettings::default(), &clock()).unwrap();
        let patterns: Vec<&str> = config.alt_formats.iter().map(|f| f.pattern()).collect();
        assert_eq!(patterns, vec!["g:iA", "g:i A", "h:i A", "giA", "hiA", "gA", "hA", "g A"]);
    }

    #[test]
    fn test_config_save_load() -> Result<()> {
        let temp_dir = tempdir()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.field.capture_seconds = true;
        config.field.min_value = Some("8:00AM".to_string());
        config.field.messages.max = "Too late, {0} is the cutoff".to_string();
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_toml_uses_defaults() -> Result<()> {
        let config: Config = toml::from_str("[field]\nformat = \"g:i A\"\n")?;
        assert_eq!(config.field.format.as_deref(), Some("g:i A"));
        assert_eq!(config.field.messages, MessageTemplates::default());
        assert_eq!(config.shell, ShellConfig::default());
        Ok(())
    }
}
