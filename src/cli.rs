use crate::config::FieldSettings;
use crate::time_value::Meridiem;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// meridiem-field - 12-hour AM/PM time input with validation
#[derive(Debug, Parser)]
#[command(name = "meridiem-field")]
#[command(about = "Parse, format and validate 12-hour AM/PM times", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (if not specified, enters interactive mode)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub field: FieldArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Overrides applied on top of the loaded field settings
#[derive(Debug, Default, Args)]
pub struct FieldArgs {
    /// Display format, must end with a meridiem marker (e.g. "h:iA")
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Alternate format tried when the display format fails (repeatable)
    #[arg(long = "alt-format", global = true)]
    pub alt_formats: Vec<String>,

    /// Format used for submitted values
    #[arg(long, global = true)]
    pub submit_format: Option<String>,

    /// Earliest allowed time
    #[arg(long, global = true)]
    pub min: Option<String>,

    /// Latest allowed time
    #[arg(long, global = true)]
    pub max: Option<String>,

    /// Capture seconds as well as hours and minutes
    #[arg(long, global = true)]
    pub seconds: bool,
}

impl FieldArgs {
    pub fn apply(&self, settings: &mut FieldSettings) {
        if self.seconds {
            settings.capture_seconds = true;
        }
        if let Some(format) = &self.format {
            settings.format = Some(format.clone());
        }
        if !self.alt_formats.is_empty() {
            settings.alt_formats = Some(self.alt_formats.clone());
        }
        if let Some(format) = &self.submit_format {
            settings.submit_format = Some(format.clone());
        }
        if let Some(min) = &self.min {
            settings.min_value = Some(min.clone());
        }
        if let Some(max) = &self.max {
            settings.max_value = Some(max.clone());
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse one value and print the result
    Check {
        /// Raw text without meridiem (e.g. "3:45")
        #[arg(required = true)]
        text: String,

        /// Meridiem to combine with the text (am or pm)
        #[arg(long, short, default_value = "am")]
        meridiem: Meridiem,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}
