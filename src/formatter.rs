//! Formatting of field values back to text.

use crate::parser::TimeFormat;
use crate::time_value::{FieldValue, TimeValue};

/// Format a time value with `format`.
pub fn format_time(value: &TimeValue, format: &TimeFormat) -> String {
    format.format_time(value.time_of_day())
}

/// Format whatever the field holds. Unparsed text passes through unchanged.
pub fn format_value(value: &FieldValue, format: &TimeFormat) -> String {
    match value {
        FieldValue::Empty => String::new(),
        FieldValue::Time(time) => format_time(time, format),
        FieldValue::Text(text) => text.clone(),
    }
}

/// Remove a trailing meridiem marker (and the whitespace before it) from
/// formatted text, leaving what belongs in the text input.
pub fn strip_meridiem(text: &str) -> &str {
    let trimmed = text.trim_end();
    let lower = trimmed.to_ascii_lowercase();
    if lower.ends_with("am") || lower.ends_with("pm") {
        trimmed[..trimmed.len() - 2].trim_end()
    } else {
        trimmed
    }
}
