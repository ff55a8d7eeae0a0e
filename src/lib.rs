pub mod app;
pub mod cli;
pub mod component;
pub mod config;
pub mod field;
pub mod formatter;
pub mod meridiem;
pub mod parser;
pub mod time_value;
pub mod validation;

// Re-export commonly used types
pub use component::Component;
pub use config::{Config, FieldConfig, FieldSettings};
pub use field::{ChangeEvent, FieldEvent, FieldView, MeridiemTimeField};
pub use parser::TimeFormat;
pub use time_value::{Clock, FieldValue, FixedClock, Meridiem, SystemClock, TimeValue};
pub use validation::ValidationError;
