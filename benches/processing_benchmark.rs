use aq_dashboard::analyzers::correlation_matrix;
use aq_dashboard::models::{Measurement, Measurements, RawObservation};
use aq_dashboard::processors::{Cleaner, DailyAggregator, StationJoiner};
use chrono::{Datelike, Duration, NaiveDate, Timelike};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Hourly rows with a gap pattern similar to the PRSA files
fn create_hourly_rows(station: &str, days: usize, offset_days: i64) -> Vec<RawObservation> {
    let start = NaiveDate::from_ymd_opt(2013, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(offset_days);

    (0..days * 24)
        .filter_map(|i| {
            let ts = start + Duration::hours(i as i64);
            let base = 50.0 + (i % 97) as f64;
            let missing = i % 13 == 0;

            let measurements = Measurements {
                pm25: if missing { None } else { Some(base) },
                pm10: if i % 17 == 0 { None } else { Some(base * 1.6) },
                so2: Some(5.0 + (i % 7) as f64),
                no2: if i % 5 == 0 { None } else { Some(30.0 + (i % 11) as f64) },
                co: Some(600.0 + (i % 23) as f64 * 10.0),
                temp: Some(-5.0 + (i % 40) as f64 * 0.5),
                pres: Some(1015.0 + (i % 9) as f64),
                dewp: Some(-15.0 + (i % 19) as f64),
                rain: Some(0.0),
                ..Default::default()
            };

            RawObservation::new(
                station.to_string(),
                ts.year(),
                ts.month(),
                ts.day(),
                ts.hour(),
                measurements,
            )
        })
        .collect()
}

fn benchmark_cleaning(c: &mut Criterion) {
    let mut group = c.benchmark_group("cleaning");

    for days in [30, 365].iter() {
        let rows = create_hourly_rows("A", *days, 0);
        group.bench_with_input(BenchmarkId::new("forward_fill_and_drop", days), &rows, |b, rows| {
            b.iter(|| {
                let cleaner = Cleaner::new();
                black_box(cleaner.clean(rows.clone()))
            })
        });
    }

    group.finish();
}

fn benchmark_aggregate_and_join(c: &mut Criterion) {
    let cleaner = Cleaner::new();
    let (first, _) = cleaner.clean(create_hourly_rows("A", 365, 0));
    let (second, _) = cleaner.clean(create_hourly_rows("B", 365, 30));

    c.bench_function("daily_aggregate", |b| {
        b.iter(|| {
            let aggregator = DailyAggregator::new();
            black_box(aggregator.aggregate("A", &first))
        })
    });

    let aggregator = DailyAggregator::new();
    let first_daily = aggregator.aggregate("A", &first);
    let second_daily = aggregator.aggregate("B", &second);

    c.bench_function("outer_join", |b| {
        b.iter(|| {
            let joiner = StationJoiner::new();
            black_box(
                joiner
                    .join(["A".to_string(), "B".to_string()], &first_daily, &second_daily)
                    .unwrap(),
            )
        })
    });

    c.bench_function("correlation_matrix", |b| {
        b.iter(|| black_box(correlation_matrix("A", &first, &Measurement::ALL)))
    });
}

criterion_group!(benches, benchmark_cleaning, benchmark_aggregate_and_join);
criterion_main!(benches);
