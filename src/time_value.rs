//! Time-of-day values for the meridiem field.
//!
//! A [`TimeValue`] is a full timestamp whose date part is always pinned to
//! "today" as reported by a [`Clock`]. Only hour, minute and second carry
//! meaning, so two values built on the same day compare by time of day.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Source of the current wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Reads the local system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// AM/PM indicator for 12-hour time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Meridiem a 24-hour hour falls in.
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 { Meridiem::Am } else { Meridiem::Pm }
    }

    /// Uppercase marker appended to raw input before parsing.
    pub fn marker(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }

    /// Convert a 12-hour clock hour (1-12) into a 24-hour hour.
    pub fn to_24_hour(self, hour12: u32) -> u32 {
        let base = hour12 % 12;
        match self {
            Meridiem::Am => base,
            Meridiem::Pm => base + 12,
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("'{0}' is not a meridiem, expected AM or PM")]
pub struct ParseMeridiemError(pub String);

impl FromStr for Meridiem {
    type Err = ParseMeridiemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "am" | "a" | "a.m." => Ok(Meridiem::Am),
            "pm" | "p" | "p.m." => Ok(Meridiem::Pm),
            _ => Err(ParseMeridiemError(s.to_string())),
        }
    }
}

/// A time of day carried on today's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeValue {
    inner: NaiveDateTime,
}

impl TimeValue {
    /// Build a value from 24-hour components. Returns `None` when any
    /// component is out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32, clock: &dyn Clock) -> Option<Self> {
        let time = NaiveTime::from_hms_opt(hour, minute, second)?;
        Some(Self::on_today(time, clock))
    }

    /// Place a time of day on the clock's current date.
    pub fn on_today(time: NaiveTime, clock: &dyn Clock) -> Self {
        Self { inner: clock.today().and_time(time) }
    }

    /// Re-pin an arbitrary timestamp to today, keeping its time of day.
    pub fn cleared(datetime: NaiveDateTime, clock: &dyn Clock) -> Self {
        Self::on_today(datetime.time(), clock)
    }

    /// Wall-clock "now" as a value.
    pub fn now(clock: &dyn Clock) -> Self {
        Self::cleared(clock.now(), clock)
    }

    pub fn hour(&self) -> u32 {
        self.inner.hour()
    }

    pub fn minute(&self) -> u32 {
        self.inner.minute()
    }

    pub fn second(&self) -> u32 {
        self.inner.second()
    }

    /// Hour on a 12-hour dial (1-12).
    pub fn hour12(&self) -> u32 {
        self.inner.hour12().1
    }

    pub fn meridiem(&self) -> Meridiem {
        Meridiem::from_hour(self.hour())
    }

    pub fn date(&self) -> NaiveDate {
        self.inner.date()
    }

    pub fn time_of_day(&self) -> NaiveTime {
        self.inner.time()
    }

    pub fn as_datetime(&self) -> NaiveDateTime {
        self.inner
    }

    /// Same dial position with a different meridiem. Seconds are dropped
    /// unless `keep_seconds` is set.
    pub fn with_meridiem(&self, meridiem: Meridiem, keep_seconds: bool, clock: &dyn Clock) -> Self {
        let second = if keep_seconds { self.second() } else { 0 };
        let hour = meridiem.to_24_hour(self.hour12());
        // hour < 24, minute and second come from a valid time
        Self::from_hms(hour, self.minute(), second, clock).unwrap_or(*self)
    }

    pub fn is_before(&self, other: &TimeValue) -> bool {
        self.time_of_day() < other.time_of_day()
    }

    pub fn is_after(&self, other: &TimeValue) -> bool {
        self.time_of_day() > other.time_of_day()
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner.format("%H:%M:%S"))
    }
}

/// What a field currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Empty,
    Time(TimeValue),
    /// Text that did not parse as a time.
    Text(String),
}

impl FieldValue {
    pub fn as_time(&self) -> Option<&TimeValue> {
        match self {
            FieldValue::Time(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }
}

impl From<TimeValue> for FieldValue {
    fn from(value: TimeValue) -> Self {
        FieldValue::Time(value)
    }
}

impl From<Option<TimeValue>> for FieldValue {
    fn from(value: Option<TimeValue>) -> Self {
        value.map_or(FieldValue::Empty, FieldValue::Time)
    }
}
