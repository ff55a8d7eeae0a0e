//! AM/PM toggle state and value recomputation.

use crate::config::FieldConfig;
use crate::parser::parse_input;
use crate::time_value::{Clock, FieldValue, Meridiem};
use chrono::Timelike;
use log::debug;

/// Tracks which meridiem the toggle shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeridiemSync {
    selected: Option<Meridiem>,
}

impl MeridiemSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected(meridiem: Meridiem) -> Self {
        Self { selected: Some(meridiem) }
    }

    /// The selected meridiem, or the wall clock's when nothing is selected yet.
    pub fn current(&self, clock: &dyn Clock) -> Meridiem {
        self.selected.unwrap_or_else(|| Meridiem::from_hour(clock.now().hour()))
    }

    /// Like [`current`](Self::current), but stores the wall-clock default so
    /// later clock movement cannot flip the toggle.
    pub fn pin(&mut self, clock: &dyn Clock) -> Meridiem {
        let meridiem = self.current(clock);
        self.selected = Some(meridiem);
        meridiem
    }

    pub fn selected(&self) -> Option<Meridiem> {
        self.selected
    }

    /// Move the toggle without recomputing anything.
    pub fn set(&mut self, meridiem: Meridiem) {
        self.selected = Some(meridiem);
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }

    /// Apply a user selection.
    ///
    /// Returns the recomputed value, or `None` when `meridiem` is already
    /// current and a held time already sits in it. A held time keeps its
    /// dial position; held text is parsed again from `raw` with the new
    /// meridiem.
    pub fn select(
        &mut self,
        meridiem: Meridiem,
        value: &FieldValue,
        raw: &str,
        config: &FieldConfig,
        clock: &dyn Clock,
    ) -> Option<FieldValue> {
        let previous = self.pin(clock);
        self.selected = Some(meridiem);
        let time_matches = value.as_time().map_or(true, |time| time.meridiem() == meridiem);
        if previous == meridiem && time_matches {
            return None;
        }
        debug!("Meridiem changed from {} to {}", previous, meridiem);

        let recomputed = match value {
            FieldValue::Time(time) => {
                FieldValue::Time(time.with_meridiem(meridiem, config.capture_seconds, clock))
            }
            FieldValue::Text(_) | FieldValue::Empty => {
                parse_input(raw, meridiem, &config.format, &config.alt_formats, clock)
            }
        };
        Some(recomputed)
    }
}
