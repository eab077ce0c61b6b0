use crate::error::{ProcessingError, Result};
use crate::models::{Measurement, Measurements, RawObservation, StationSource};
use crate::utils::constants::{
    COLUMN_O3, COLUMN_WIND_DIRECTION, COLUMN_WIND_SPEED, DEFAULT_BUFFER_SIZE, MISSING_MARKERS,
    REQUIRED_COLUMNS,
};
use csv::StringRecord;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

pub struct ObservationReader {
    use_mmap: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Load a station's observations. Every failure is reported as a source load error.
    pub fn read_station(&self, source: &StationSource) -> Result<Vec<RawObservation>> {
        let path = source.path();
        self.read_observations(&path, &source.name)
            .map_err(|e| ProcessingError::source_load(&source.name, &path, e))
    }

    /// Read hourly observations from a PRSA CSV file
    pub fn read_observations(&self, path: &Path, station: &str) -> Result<Vec<RawObservation>> {
        let content = if self.use_mmap {
            let file = File::open(path)?;
            let mmap = unsafe { Mmap::map(&file)? };
            decode(&mmap)?
        } else {
            let file = File::open(path)?;
            let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes)?;
            decode(&bytes)?
        };

        let observations = self.parse_observations(&content, station)?;
        debug!(
            station,
            path = %path.display(),
            rows = observations.len(),
            "read observations"
        );
        Ok(observations)
    }

    /// Parse CSV text. Row order is preserved.
    pub fn parse_observations(&self, content: &str, station: &str) -> Result<Vec<RawObservation>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let columns = ColumnIndex::from_headers(reader.headers()?)?;
        let mut observations = Vec::new();

        for (row, record_result) in reader.records().enumerate() {
            let record = record_result?;
            // Header is line 1
            let line = row + 2;
            observations.push(columns.parse_record(&record, station, line)?);
        }

        Ok(observations)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode(bytes: &[u8]) -> Result<String> {
    let (content, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(ProcessingError::InvalidFormat(
            "File is not valid UTF-8".to_string(),
        ));
    }
    Ok(content.into_owned())
}

/// Positions of the known columns in a header row
struct ColumnIndex {
    year: usize,
    month: usize,
    day: usize,
    hour: usize,
    measurements: Vec<(Measurement, usize)>,
    o3: Option<usize>,
    wind_direction: Option<usize>,
    wind_speed: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| find(c).is_none()) {
            return Err(ProcessingError::MissingColumn(missing.to_string()));
        }

        let required = |name: &str| find(name).ok_or_else(|| ProcessingError::MissingColumn(name.to_string()));

        let measurements = Measurement::ALL
            .iter()
            .map(|m| Ok((*m, required(m.column_name())?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            year: required("year")?,
            month: required("month")?,
            day: required("day")?,
            hour: required("hour")?,
            measurements,
            o3: find(COLUMN_O3),
            wind_direction: find(COLUMN_WIND_DIRECTION),
            wind_speed: find(COLUMN_WIND_SPEED),
        })
    }

    fn parse_record(&self, record: &StringRecord, station: &str, line: usize) -> Result<RawObservation> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let year = parse_int::<i32>(field(self.year), "year", line)?;
        let month = parse_int::<u32>(field(self.month), "month", line)?;
        let day = parse_int::<u32>(field(self.day), "day", line)?;
        let hour = parse_int::<u32>(field(self.hour), "hour", line)?;

        let mut measurements = Measurements::default();
        for (measurement, idx) in &self.measurements {
            let value = parse_value(field(*idx), measurement.column_name(), line)?;
            measurements.set(*measurement, value);
        }

        if let Some(idx) = self.o3 {
            measurements.o3 = parse_value(field(idx), COLUMN_O3, line)?;
        }
        if let Some(idx) = self.wind_speed {
            measurements.wspm = parse_value(field(idx), COLUMN_WIND_SPEED, line)?;
        }
        if let Some(idx) = self.wind_direction {
            let wd = field(idx);
            measurements.wd = if is_missing(wd) {
                None
            } else {
                Some(wd.to_string())
            };
        }

        RawObservation::new(station.to_string(), year, month, day, hour, measurements).ok_or_else(
            || {
                ProcessingError::InvalidFormat(format!(
                    "Line {}: invalid timestamp {}-{}-{} hour {}",
                    line, year, month, day, hour
                ))
            },
        )
    }
}

fn is_missing(raw: &str) -> bool {
    let lowered = raw.trim().to_ascii_lowercase();
    MISSING_MARKERS.contains(&lowered.as_str())
}

fn parse_int<T: std::str::FromStr>(raw: &str, column: &str, line: usize) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        ProcessingError::InvalidFormat(format!("Line {}: invalid {}: '{}'", line, column, raw))
    })
}

fn parse_value(raw: &str, column: &str, line: usize) -> Result<Option<f64>> {
    if is_missing(raw) {
        return Ok(None);
    }

    let value = raw.trim().parse::<f64>().map_err(|_| {
        ProcessingError::InvalidFormat(format!("Line {}: invalid {}: '{}'", line, column, raw))
    })?;

    Ok(if value.is_nan() { None } else { Some(value) })
}
