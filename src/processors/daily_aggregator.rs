use crate::models::{CleanedObservation, DailyAverage};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Accumulator {
    pm25_sum: f64,
    pm25_count: usize,
    pm10_sum: f64,
    pm10_count: usize,
    rows: usize,
}

impl Accumulator {
    fn add(&mut self, obs: &CleanedObservation) {
        self.rows += 1;
        if !obs.pm25.is_nan() {
            self.pm25_sum += obs.pm25;
            self.pm25_count += 1;
        }
        if !obs.pm10.is_nan() {
            self.pm10_sum += obs.pm10;
            self.pm10_count += 1;
        }
    }

    fn mean(sum: f64, count: usize) -> f64 {
        if count == 0 {
            f64::NAN
        } else {
            sum / count as f64
        }
    }
}

pub struct DailyAggregator;

impl DailyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Average PM2.5 and PM10 per calendar date, sorted by date
    pub fn aggregate(&self, station: &str, rows: &[CleanedObservation]) -> Vec<DailyAverage> {
        let mut by_date: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();

        for obs in rows {
            by_date.entry(obs.date()).or_default().add(obs);
        }

        by_date
            .into_iter()
            .map(|(date, acc)| {
                DailyAverage::new(
                    station.to_string(),
                    date,
                    Accumulator::mean(acc.pm25_sum, acc.pm25_count),
                    Accumulator::mean(acc.pm10_sum, acc.pm10_count),
                    acc.rows,
                )
            })
            .collect()
    }
}

impl Default for DailyAggregator {
    fn default() -> Self {
        Self::new()
    }
}
