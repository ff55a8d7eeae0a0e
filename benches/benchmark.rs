use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use meridiem_field::config::{FieldConfig, FieldSettings};
use meridiem_field::parser::{parse_raw, TimeFormat};
use meridiem_field::validation::Validator;
use meridiem_field::{FieldValue, FixedClock, Meridiem};

fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2025, 4, 22).unwrap().and_hms_opt(12, 0, 0).unwrap())
}

fn bench_parse(c: &mut Criterion) {
    let clock = clock();
    let config = FieldConfig::from_settings(&FieldSettings::default(), &clock).unwrap();

    c.bench_function("parse primary format", |b| {
        b.iter(|| {
            parse_raw(
                black_box("3:45"),
                Meridiem::Pm,
                &config.format,
                &config.alt_formats,
                &clock,
            )
        })
    });

    c.bench_function("parse last fallback", |b| {
        b.iter(|| {
            parse_raw(black_box("7"), Meridiem::Pm, &config.format, &config.alt_formats, &clock)
        })
    });

    c.bench_function("compile format", |b| b.iter(|| TimeFormat::new(black_box("g:i:s A"))));
}

fn bench_validate(c: &mut Criterion) {
    let clock = clock();
    let settings = FieldSettings {
        min_value: Some("9:00AM".to_string()),
        max_value: Some("5:00PM".to_string()),
        ..Default::default()
    };
    let config = FieldConfig::from_settings(&settings, &clock).unwrap();
    let value = parse_raw("4:30", Meridiem::Pm, &config.format, &config.alt_formats, &clock)
        .map(FieldValue::Time)
        .unwrap();

    c.bench_function("validate bounded value", |b| {
        let validator = Validator::new(&config, &clock);
        b.iter(|| validator.validate(black_box(&value)))
    });
}

criterion_group!(benches, bench_parse, bench_validate);
criterion_main!(benches);
