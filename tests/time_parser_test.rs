use chrono::{NaiveDate, Timelike};
use meridiem_field::formatter::format_time;
use meridiem_field::parser::{parse_raw, parse_text, TimeFormat};
use meridiem_field::{FixedClock, Meridiem};
use test_case::test_case;

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2025, 4, 22).unwrap().and_hms_opt(10, 0, 0).unwrap())
}

fn alternates() -> Vec<TimeFormat> {
    ["g:iA", "g:i A", "giA", "hiA", "gA", "hA"]
        .iter()
        .map(|p| TimeFormat::new(p).unwrap())
        .collect()
}

#[test_case("3:45", Meridiem::Pm => Some((15, 45)) ; "primary format")]
#[test_case("03:45", Meridiem::Am => Some((3, 45)) ; "padded hour")]
#[test_case("345", Meridiem::Pm => Some((15, 45)) ; "no separator fallback")]
#[test_case("1215", Meridiem::Am => Some((0, 15)) ; "midnight hour")]
#[test_case("12", Meridiem::Pm => Some((12, 0)) ; "noon hour only")]
#[test_case("7", Meridiem::Pm => Some((19, 0)) ; "single digit hour")]
#[test_case("", Meridiem::Am => None ; "blank")]
#[test_case("13:00", Meridiem::Pm => None ; "hour out of range")]
#[test_case("3:60", Meridiem::Am => None ; "minute out of range")]
#[test_case("quarter past", Meridiem::Am => None ; "words")]
fn parse_raw_cases(raw: &str, meridiem: Meridiem) -> Option<(u32, u32)> {
    let primary = TimeFormat::new("h:iA").unwrap();
    parse_raw(raw, meridiem, &primary, &alternates(), &clock()).map(|v| (v.hour(), v.minute()))
}

#[test_case("h:iA", "03:45PM")]
#[test_case("g:i A", "3:45 PM")]
#[test_case("h:i:sA", "11:05:09AM")]
#[test_case("g:ia", "12:00am")]
#[test_case("hiA", "0930PM")]
fn format_of_parse_is_canonical(pattern: &str, canonical: &str) {
    let clock = clock();
    let format = TimeFormat::new(pattern).unwrap();
    let value = parse_text(canonical, &format, &[], &clock).unwrap();
    pretty_assertions::assert_eq!(format_time(&value, &format), canonical);
}

#[test]
fn parsed_values_carry_todays_date() {
    let clock = clock();
    let primary = TimeFormat::new("h:iA").unwrap();
    for raw in ["1:00", "11:59", "12:30", "345"] {
        for meridiem in [Meridiem::Am, Meridiem::Pm] {
            let value = parse_raw(raw, meridiem, &primary, &alternates(), &clock).unwrap();
            pretty_assertions::assert_eq!(value.date(), NaiveDate::from_ymd_opt(2025, 4, 22).unwrap());
            pretty_assertions::assert_eq!(value.as_datetime().second(), 0);
        }
    }
}

#[test]
fn first_matching_format_wins() {
    let clock = clock();
    // Both formats match "1:05PM"; the 24-hour one ignores the marker.
    let twelve = TimeFormat::new("h:iA").unwrap();
    let twenty_four = TimeFormat::new("G:iA").unwrap();

    let value = parse_raw("1:05", Meridiem::Pm, &twelve, &[twenty_four.clone()], &clock).unwrap();
    pretty_assertions::assert_eq!((value.hour(), value.minute()), (13, 5));

    let value = parse_raw("1:05", Meridiem::Pm, &twenty_four, &[twelve], &clock).unwrap();
    pretty_assertions::assert_eq!((value.hour(), value.minute()), (1, 5));
}
