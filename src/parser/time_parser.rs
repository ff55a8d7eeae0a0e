//! Raw input parsing with ordered fallback formats.

use super::pattern::TimeFormat;
use crate::time_value::{Clock, FieldValue, Meridiem, TimeValue};
use log::debug;

/// Parse raw keyboard text combined with the selected meridiem.
///
/// The meridiem marker is appended to the trimmed input, then the primary
/// format and each alternate are tried in order. Blank input yields `None`.
///
/// # Examples
///
/// `"3:45"` with [`Meridiem::Pm`] against `h:iA` parses as 15:45.
pub fn parse_raw(
    raw: &str,
    meridiem: Meridiem,
    primary: &TimeFormat,
    alternates: &[TimeFormat],
    clock: &dyn Clock,
) -> Option<TimeValue> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let candidate = format!("{}{}", raw, meridiem.marker());
    parse_text(&candidate, primary, alternates, clock)
}

/// Turn raw keyboard text into a field value. Blank text is `Empty`; text
/// that does not parse is kept with the meridiem marker appended.
pub fn parse_input(
    raw: &str,
    meridiem: Meridiem,
    primary: &TimeFormat,
    alternates: &[TimeFormat],
    clock: &dyn Clock,
) -> FieldValue {
    if raw.trim().is_empty() {
        return FieldValue::Empty;
    }
    match parse_raw(raw, meridiem, primary, alternates, clock) {
        Some(time) => FieldValue::Time(time),
        None => FieldValue::Text(format!("{}{}", raw.trim(), meridiem.marker())),
    }
}

/// Parse text that already carries its meridiem, trying the primary format
/// first and then each alternate in order.
pub fn parse_text(
    text: &str,
    primary: &TimeFormat,
    alternates: &[TimeFormat],
    clock: &dyn Clock,
) -> Option<TimeValue> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    std::iter::once(primary).chain(alternates.iter()).find_map(|format| {
        let parsed = format.parse_time(text);
        debug!("Parsing '{}' with format '{}': {:?}", text, format.pattern(), parsed);
        parsed.map(|time| TimeValue::on_today(time, clock))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_value::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2025, 4, 22).unwrap().and_hms_opt(14, 0, 0).unwrap(),
        )
    }

    fn formats(patterns: &[&str]) -> Vec<TimeFormat> {
        patterns.iter().map(|p| TimeFormat::new(p).unwrap()).collect()
    }

    #[test]
    fn test_parse_raw_appends_meridiem() {
        let clock = clock();
        let primary = TimeFormat::new("h:iA").unwrap();

        let value = parse_raw("3:45", Meridiem::Pm, &primary, &[], &clock).unwrap();
        assert_eq!((value.hour(), value.minute()), (15, 45));

        let value = parse_raw(" 3:45 ", Meridiem::Am, &primary, &[], &clock).unwrap();
        assert_eq!((value.hour(), value.minute()), (3, 45));
    }

    #[test]
    fn test_parse_raw_falls_back_in_order() {
        let clock = clock();
        let primary = TimeFormat::new("h:iA").unwrap();
        let alternates = formats(&["gA", "hiA"]);

        let value = parse_raw("345", Meridiem::Pm, &primary, &alternates, &clock).unwrap();
        assert_eq!((value.hour(), value.minute()), (15, 45));

        let value = parse_raw("7", Meridiem::Pm, &primary, &alternates, &clock).unwrap();
        assert_eq!((value.hour(), value.minute()), (19, 0));

        assert!(parse_raw("345", Meridiem::Pm, &primary, &[], &clock).is_none());
    }

    #[test]
    fn test_parse_raw_blank_is_none() {
        let clock = clock();
        let primary = TimeFormat::new("h:iA").unwrap();
        assert!(parse_raw("", Meridiem::Am, &primary, &[], &clock).is_none());
        assert!(parse_raw("   ", Meridiem::Pm, &primary, &[], &clock).is_none());
    }

    #[test]
    fn test_parse_raw_garbage_is_none() {
        let clock = clock();
        let primary = TimeFormat::new("h:iA").unwrap();
        let alternates = formats(&["g:iA", "hiA"]);
        assert!(parse_raw("noon", Meridiem::Pm, &primary, &alternates, &clock).is_none());
        assert!(parse_raw("3:75", Meridiem::Pm, &primary, &alternates, &clock).is_none());
    }

    #[test]
    fn test_parse_input_variants() {
        let clock = clock();
        let primary = TimeFormat::new("h:iA").unwrap();

        assert_eq!(parse_input(" ", Meridiem::Pm, &primary, &[], &clock), FieldValue::Empty);
        assert_eq!(
            parse_input(" 9:7x ", Meridiem::Pm, &primary, &[], &clock),
            FieldValue::Text("9:7xPM".to_string())
        );
        let value = parse_input("9:07", Meridiem::Pm, &primary, &[], &clock);
        assert_eq!(value.as_time().map(|t| (t.hour(), t.minute())), Some((21, 7)));
    }

    #[test]
    fn test_parsed_value_is_on_today() {
        let clock = clock();
        let primary = TimeFormat::new("h:iA").unwrap();
        let value = parse_text("11:59PM", &primary, &[], &clock).unwrap();
        assert_eq!(value.date(), NaiveDate::from_ymd_opt(2025, 4, 22).unwrap());
    }
}
