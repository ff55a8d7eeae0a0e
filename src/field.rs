//! The meridiem time field: a text input paired with an AM/PM toggle.
//!
//! [`MeridiemTimeField`] owns the raw text, the toggle state and the parsed
//! value. Hosts drive it through [`Component::update`] and read it back
//! through [`Component::render`] or the accessor methods.

use crate::component::Component;
use crate::config::FieldConfig;
use crate::formatter::{format_time, strip_meridiem};
use crate::meridiem::MeridiemSync;
use crate::parser::{parse_input, parse_text};
use crate::time_value::{Clock, FieldValue, Meridiem, SystemClock};
use crate::validation::{ValidationError, Validator};
use log::debug;
use serde::Serialize;

/// Fired whenever the field's value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub previous: FieldValue,
    pub current: FieldValue,
    pub meridiem: Meridiem,
}

pub type ChangeListener = Box<dyn FnMut(&ChangeEvent)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// Raw keyboard text, without meridiem.
    Input(String),
    SelectMeridiem(Meridiem),
    SetValue(FieldValue),
    Clear,
}

/// What a host needs to draw the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub text: String,
    pub meridiem: Meridiem,
    pub options: [Meridiem; 2],
    pub errors: Vec<String>,
    pub valid: bool,
    pub submit_value: Option<String>,
}

pub struct MeridiemTimeField {
    config: FieldConfig,
    clock: Box<dyn Clock>,
    raw: String,
    value: FieldValue,
    meridiem: MeridiemSync,
    listeners: Vec<ChangeListener>,
}

impl MeridiemTimeField {
    pub fn new(config: FieldConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }

    pub fn with_clock(config: FieldConfig, clock: impl Clock + 'static) -> Self {
        Self {
            config,
            clock: Box::new(clock),
            raw: String::new(),
            value: FieldValue::Empty,
            meridiem: MeridiemSync::new(),
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn raw_value(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem.current(self.clock.as_ref())
    }

    pub fn on_change(&mut self, listener: impl FnMut(&ChangeEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Handle keyboard text. Returns `true` when the value changed.
    pub fn input(&mut self, raw: &str) -> bool {
        self.raw = raw.to_string();
        let meridiem = self.meridiem.pin(self.clock.as_ref());
        let config = &self.config;
        let value =
            parse_input(raw, meridiem, &config.format, &config.alt_formats, self.clock.as_ref());
        self.replace_value(value)
    }

    /// Handle an AM/PM selection. Returns `true` when the toggle moved.
    pub fn select_meridiem(&mut self, meridiem: Meridiem) -> bool {
        let recomputed = self.meridiem.select(
            meridiem,
            &self.value,
            &self.raw,
            &self.config,
            self.clock.as_ref(),
        );
        match recomputed {
            Some(value) => {
                self.replace_value(value);
                true
            }
            None => false,
        }
    }

    /// Set the value programmatically. Text is parsed as a complete time
    /// including its meridiem; a time moves the toggle to match.
    pub fn set_value(&mut self, value: FieldValue) -> bool {
        let value = match value {
            FieldValue::Text(text) => {
                let config = &self.config;
                parse_text(&text, &config.format, &config.alt_formats, self.clock.as_ref())
                    .map_or(FieldValue::Text(text), FieldValue::Time)
            }
            other => other,
        };

        match &value {
            FieldValue::Time(time) => {
                self.meridiem.set(time.meridiem());
                self.raw = strip_meridiem(&format_time(time, &self.config.format)).to_string();
            }
            FieldValue::Text(text) => self.raw = text.clone(),
            FieldValue::Empty => self.raw.clear(),
        }
        self.replace_value(value)
    }

    pub fn clear(&mut self) -> bool {
        self.raw.clear();
        self.replace_value(FieldValue::Empty)
    }

    /// Text for the input box. The meridiem lives in the toggle.
    pub fn display_text(&self) -> String {
        match &self.value {
            FieldValue::Time(time) => {
                strip_meridiem(&format_time(time, &self.config.format)).to_string()
            }
            _ => self.raw.clone(),
        }
    }

    pub fn errors(&self) -> Vec<ValidationError> {
        Validator::new(&self.config, self.clock.as_ref()).validate(&self.value)
    }

    pub fn error_messages(&self) -> Vec<String> {
        Validator::new(&self.config, self.clock.as_ref()).messages(&self.value)
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Value in the submit format; `None` when empty or invalid.
    pub fn submit_value(&self) -> Option<String> {
        let time = self.value.as_time()?;
        if !self.is_valid() {
            return None;
        }
        Some(format_time(time, self.config.submit_format()))
    }

    fn replace_value(&mut self, value: FieldValue) -> bool {
        if value == self.value {
            return false;
        }
        let event = ChangeEvent {
            previous: std::mem::replace(&mut self.value, value),
            current: self.value.clone(),
            meridiem: self.meridiem(),
        };
        debug!("Field value changed: {:?} -> {:?}", event.previous, event.current);
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
        true
    }
}

impl Component for MeridiemTimeField {
    type Event = FieldEvent;
    type View = FieldView;

    fn render(&self) -> FieldView {
        let errors = self.error_messages();
        FieldView {
            text: self.display_text(),
            meridiem: self.meridiem(),
            options: [Meridiem::Am, Meridiem::Pm],
            valid: errors.is_empty(),
            errors,
            submit_value: self.submit_value(),
        }
    }

    fn update(&mut self, event: FieldEvent) -> bool {
        match event {
            FieldEvent::Input(raw) => {
                let changed = self.raw != raw;
                self.input(&raw) || changed
            }
            FieldEvent::SelectMeridiem(meridiem) => self.select_meridiem(meridiem),
            FieldEvent::SetValue(value) => self.set_value(value),
            FieldEvent::Clear => self.clear(),
        }
    }

    fn destroy(&mut self) {
        self.listeners.clear();
        self.raw.clear();
        self.value = FieldValue::Empty;
        self.meridiem.reset();
    }
}
