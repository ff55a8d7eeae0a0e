//! Parser module for meridiem time input
//!
//! `pattern` compiles format strings; `time_parser` applies them to raw
//! keyboard input with ordered fallbacks.

pub mod pattern;
pub mod time_parser;

pub use pattern::{FormatError, TimeFormat};
pub use time_parser::{parse_input, parse_raw, parse_text};
