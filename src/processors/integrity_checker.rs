use crate::models::{CleanedObservation, CombinedTable, Measurement};
use crate::processors::pipeline::StationData;
use crate::utils::constants::PM_RATIO_TOLERANCE;
use chrono::NaiveDateTime;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct IntegrityReport {
    pub station_statistics: Vec<StationStatistics>,
    pub combined_days: usize,
    pub days_with_both: usize,
    pub days_only_first: usize,
    pub days_only_second: usize,
    pub violations: Vec<Violation>,
}

#[derive(Debug, Clone)]
pub struct Violation {
    pub station: String,
    pub timestamp: NaiveDateTime,
    pub violation_type: ViolationType,
    pub details: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationType {
    NegativeConcentration,
    Pm25ExceedsPm10,
}

#[derive(Debug, Clone, Default)]
pub struct StationStatistics {
    pub station: String,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub cleaned_rows: usize,
    pub daily_rows: usize,
    pub filled_values: HashMap<Measurement, usize>,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
}

pub struct IntegrityChecker {
    pm_ratio_tolerance: f64,
}

impl IntegrityChecker {
    pub fn new() -> Self {
        Self {
            pm_ratio_tolerance: PM_RATIO_TOLERANCE,
        }
    }

    pub fn with_pm_ratio_tolerance(pm_ratio_tolerance: f64) -> Self {
        Self { pm_ratio_tolerance }
    }

    /// Summarize cleaning and join results. Violations are reported, never fatal.
    pub fn check_integrity(&self, stations: &[StationData], combined: &CombinedTable) -> IntegrityReport {
        let mut report = IntegrityReport {
            station_statistics: Vec::with_capacity(stations.len()),
            combined_days: combined.len(),
            days_with_both: 0,
            days_only_first: 0,
            days_only_second: 0,
            violations: Vec::new(),
        };

        for station in stations {
            report.station_statistics.push(StationStatistics {
                station: station.source.name.clone(),
                rows_read: station.stats.rows_read,
                rows_dropped: station.stats.rows_dropped,
                cleaned_rows: station.cleaned.len(),
                daily_rows: station.daily.len(),
                filled_values: station.stats.filled_values.clone(),
                first_timestamp: station.cleaned.first().map(|o| o.timestamp),
                last_timestamp: station.cleaned.last().map(|o| o.timestamp),
            });

            for obs in &station.cleaned {
                self.check_observation(obs, &mut report);
            }
        }

        for row in &combined.rows {
            match (row.has_first(), row.has_second()) {
                (true, true) => report.days_with_both += 1,
                (true, false) => report.days_only_first += 1,
                (false, true) => report.days_only_second += 1,
                (false, false) => {}
            }
        }

        report
    }

    fn check_observation(&self, obs: &CleanedObservation, report: &mut IntegrityReport) {
        for (value, name) in [(obs.pm25, "PM2.5"), (obs.pm10, "PM10")] {
            if value < 0.0 {
                report.violations.push(Violation {
                    station: obs.station.clone(),
                    timestamp: obs.timestamp,
                    violation_type: ViolationType::NegativeConcentration,
                    details: format!("{} concentration {} is negative", name, value),
                });
            }
        }

        if obs.pm25 > obs.pm10 + self.pm_ratio_tolerance {
            report.violations.push(Violation {
                station: obs.station.clone(),
                timestamp: obs.timestamp,
                violation_type: ViolationType::Pm25ExceedsPm10,
                details: format!(
                    "PM2.5 {} exceeds PM10 {} (tolerance={})",
                    obs.pm25, obs.pm10, self.pm_ratio_tolerance
                ),
            });
        }
    }

    /// Generate a summary report
    pub fn generate_summary(&self, report: &IntegrityReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== Integrity Check Report ===\n");

        for stats in &report.station_statistics {
            summary.push_str(&format!("\nStation: {}\n", stats.station));
            summary.push_str(&format!("  Rows Read: {}\n", stats.rows_read));
            summary.push_str(&format!(
                "  Rows Dropped (missing PM2.5/PM10): {} ({:.1}%)\n",
                stats.rows_dropped,
                percentage(stats.rows_dropped, stats.rows_read)
            ));
            summary.push_str(&format!("  Cleaned Rows: {}\n", stats.cleaned_rows));
            summary.push_str(&format!("  Daily Averages: {}\n", stats.daily_rows));

            if let (Some(first), Some(last)) = (stats.first_timestamp, stats.last_timestamp) {
                summary.push_str(&format!("  Time Span: {} to {}\n", first, last));
            }

            let filled: Vec<String> = Measurement::ALL
                .iter()
                .filter_map(|m| {
                    stats
                        .filled_values
                        .get(m)
                        .map(|count| format!("{}={}", m.column_name(), count))
                })
                .collect();
            if !filled.is_empty() {
                summary.push_str(&format!("  Forward-filled: {}\n", filled.join(", ")));
            }
        }

        summary.push_str(&format!("\nCombined Days: {}\n", report.combined_days));
        summary.push_str(&format!("  Both Stations: {}\n", report.days_with_both));
        summary.push_str(&format!("  First Only: {}\n", report.days_only_first));
        summary.push_str(&format!("  Second Only: {}\n", report.days_only_second));

        summary.push_str(&format!(
            "\nPlausibility Violations: {}\n",
            report.violations.len()
        ));

        if !report.violations.is_empty() {
            summary.push_str("\nTop 10 Violations:\n");
            for (i, violation) in report.violations.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. {} at {}: {}\n",
                    i + 1,
                    violation.station,
                    violation.timestamp,
                    violation.details
                ));
            }
        }

        summary
    }
}

impl Default for IntegrityChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CombinedRow, Measurements, StationSource};
    use crate::processors::cleaner::CleaningStats;
    use chrono::NaiveDate;

    fn obs(hour: u32, pm25: f64, pm10: f64) -> CleanedObservation {
        CleanedObservation {
            station: "A".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2013, 3, 1)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            pm25,
            pm10,
            measurements: Measurements::default(),
        }
    }

    fn station_data(cleaned: Vec<CleanedObservation>) -> StationData {
        StationData {
            source: StationSource::new("A", "a.csv"),
            stats: CleaningStats {
                rows_read: cleaned.len() + 1,
                rows_dropped: 1,
                filled_values: HashMap::from([(Measurement::No2, 3)]),
            },
            daily: Vec::new(),
            cleaned,
        }
    }

    #[test]
    fn test_violations_reported() {
        let data = station_data(vec![obs(0, 10.0, 20.0), obs(1, -1.0, 5.0), obs(2, 30.0, 20.0)]);
        let combined = CombinedTable::new(["A".into(), "B".into()], vec![]).unwrap();

        let report = IntegrityChecker::new().check_integrity(&[data], &combined);

        assert_eq!(report.violations.len(), 2);
        assert_eq!(
            report.violations[0].violation_type,
            ViolationType::NegativeConcentration
        );
        assert_eq!(report.violations[1].violation_type, ViolationType::Pm25ExceedsPm10);
        assert_eq!(report.station_statistics[0].cleaned_rows, 3);
        assert_eq!(report.station_statistics[0].rows_dropped, 1);
    }

    #[test]
    fn test_tolerance_allows_small_excess() {
        let data = station_data(vec![obs(0, 20.5, 20.0)]);
        let combined = CombinedTable::new(["A".into(), "B".into()], vec![]).unwrap();

        let report = IntegrityChecker::new().check_integrity(&[data], &combined);
        assert!(report.violations.is_empty());

        let data = station_data(vec![obs(0, 20.5, 20.0)]);
        let report = IntegrityChecker::with_pm_ratio_tolerance(0.0).check_integrity(&[data], &combined);
        assert_eq!(report.violations.len(), 1);
    }

    #[test]
    fn test_coverage_counts_and_summary() {
        let d = |day| NaiveDate::from_ymd_opt(2013, 3, day).unwrap();
        let rows = vec![
            CombinedRow {
                station1_pm25: Some(1.0),
                station1_pm10: Some(1.0),
                ..CombinedRow::empty(d(1))
            },
            CombinedRow {
                station1_pm25: Some(1.0),
                station1_pm10: Some(1.0),
                station2_pm25: Some(1.0),
                station2_pm10: Some(1.0),
                ..CombinedRow::empty(d(2))
            },
            CombinedRow {
                station2_pm25: Some(1.0),
                station2_pm10: Some(1.0),
                ..CombinedRow::empty(d(3))
            },
        ];
        let combined = CombinedTable::new(["A".into(), "B".into()], rows).unwrap();

        let checker = IntegrityChecker::new();
        let report = checker.check_integrity(&[station_data(vec![obs(0, 1.0, 2.0)])], &combined);

        assert_eq!(report.combined_days, 3);
        assert_eq!(report.days_with_both, 1);
        assert_eq!(report.days_only_first, 1);
        assert_eq!(report.days_only_second, 1);

        let summary = checker.generate_summary(&report);
        assert!(summary.contains("Station: A"));
        assert!(summary.contains("Forward-filled: NO2=3"));
        assert!(summary.contains("Combined Days: 3"));
    }
}
