use crate::error::Result;
use crate::models::{
    ensure_distinct_stations, CleanedObservation, CombinedTable, DailyAverage, StationSource,
};
use crate::processors::cleaner::{Cleaner, CleaningStats};
use crate::processors::{DailyAggregator, IntegrityChecker, IntegrityReport, StationJoiner};
use crate::readers::ObservationReader;
use crate::utils::progress::ProgressReporter;
use tracing::{info, warn};

/// Cleaned rows and daily averages of one station
#[derive(Debug, Clone)]
pub struct StationData {
    pub source: StationSource,
    pub cleaned: Vec<CleanedObservation>,
    pub daily: Vec<DailyAverage>,
    pub stats: CleaningStats,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub stations: [StationData; 2],
    pub combined: CombinedTable,
    pub report: IntegrityReport,
}

impl PipelineOutput {
    pub fn station_names(&self) -> [String; 2] {
        self.combined.stations.clone()
    }
}

/// Load, clean, aggregate and join two stations. The first failure aborts the run.
pub struct Pipeline {
    reader: ObservationReader,
    cleaner: Cleaner,
    aggregator: DailyAggregator,
    joiner: StationJoiner,
    checker: IntegrityChecker,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            reader: ObservationReader::new(),
            cleaner: Cleaner::new(),
            aggregator: DailyAggregator::new(),
            joiner: StationJoiner::new(),
            checker: IntegrityChecker::new(),
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.reader = ObservationReader::with_mmap(use_mmap);
        self
    }

    pub fn run(
        &self,
        first: &StationSource,
        second: &StationSource,
        progress: Option<&ProgressReporter>,
    ) -> Result<PipelineOutput> {
        ensure_distinct_stations(&first.name, &second.name)?;

        let first_data = self.process_station(first, progress)?;
        let second_data = self.process_station(second, progress)?;

        if let Some(p) = progress {
            p.set_message("Joining daily averages...");
        }

        let combined = self.joiner.join(
            [first.name.clone(), second.name.clone()],
            &first_data.daily,
            &second_data.daily,
        )?;
        info!(days = combined.len(), "joined daily averages");

        let stations = [first_data, second_data];
        let report = self.checker.check_integrity(&stations, &combined);
        if !report.violations.is_empty() {
            warn!(
                violations = report.violations.len(),
                "plausibility violations found"
            );
        }

        Ok(PipelineOutput {
            stations,
            combined,
            report,
        })
    }

    fn process_station(
        &self,
        source: &StationSource,
        progress: Option<&ProgressReporter>,
    ) -> Result<StationData> {
        if let Some(p) = progress {
            p.set_message(&format!("Reading {}...", source.name));
        }

        let raw = self.reader.read_station(source)?;
        info!(station = %source.name, rows = raw.len(), "loaded station data");

        if let Some(p) = progress {
            p.set_message(&format!("Cleaning {}...", source.name));
        }

        let (cleaned, stats) = self.cleaner.clean(raw);
        info!(
            station = %source.name,
            kept = stats.rows_kept(),
            dropped = stats.rows_dropped,
            filled = stats.total_filled(),
            "cleaned station data"
        );

        let daily = self.aggregator.aggregate(&source.name, &cleaned);

        Ok(StationData {
            source: source.clone(),
            cleaned,
            daily,
            stats,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "year,month,day,hour,PM2.5,PM10,SO2,NO2,CO,TEMP,PRES,DEWP,RAIN";

    fn csv_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    #[test]
    fn test_end_to_end_example() {
        let a = csv_file(&[
            "2013,3,1,0,10,30,1,1,1,1,1,1,0",
            "2013,3,1,1,20,50,1,1,1,1,1,1,0",
        ]);
        let b = csv_file(&["2013,3,2,0,NA,40,1,1,1,1,1,1,0", "2013,3,2,1,8,NA,1,1,1,1,1,1,0"]);

        let first = StationSource::new("A", a.path().to_string_lossy());
        let second = StationSource::new("B", b.path().to_string_lossy());

        let output = Pipeline::new().run(&first, &second, None).unwrap();

        assert_eq!(output.combined.len(), 2);
        let day1 = &output.combined.rows[0];
        assert_eq!(day1.station1_pm25, Some(15.0));
        assert_eq!(day1.station1_pm10, Some(40.0));
        assert_eq!(day1.station2_pm25, None);
        assert_eq!(day1.station2_pm10, None);

        // Station B's leading row has no PM2.5 to carry forward
        let day2 = &output.combined.rows[1];
        assert_eq!(day2.station2_pm25, Some(8.0));
        assert_eq!(day2.station2_pm10, Some(40.0));
        assert_eq!(output.stations[1].stats.rows_dropped, 1);
        assert_eq!(output.station_names(), ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_duplicate_station_names_rejected() {
        let a = csv_file(&["2013,3,1,0,10,30,1,1,1,1,1,1,0"]);
        let first = StationSource::new("X", a.path().to_string_lossy());
        let second = StationSource::new("X", a.path().to_string_lossy());

        let err = Pipeline::new().run(&first, &second, None).unwrap_err();
        assert!(matches!(err, ProcessingError::Config(_)));
        assert!(!err.is_source_load());
    }

    #[test]
    fn test_second_load_failure_aborts() {
        let a = csv_file(&["2013,3,1,0,10,30,1,1,1,1,1,1,0"]);
        let first = StationSource::new("A", a.path().to_string_lossy());
        let second = StationSource::new("B", "/nonexistent/b.csv");

        let err = Pipeline::new().run(&first, &second, None).unwrap_err();
        assert!(err.is_source_load());
        assert!(err.to_string().contains("station B"));
    }
}
