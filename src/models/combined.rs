use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};

/// Inclusive date bounds. `start > end` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedRow {
    pub date: NaiveDate,
    pub station1_pm25: Option<f64>,
    pub station1_pm10: Option<f64>,
    pub station2_pm25: Option<f64>,
    pub station2_pm10: Option<f64>,
}

impl CombinedRow {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            station1_pm25: None,
            station1_pm10: None,
            station2_pm25: None,
            station2_pm10: None,
        }
    }

    pub fn has_first(&self) -> bool {
        self.station1_pm25.is_some() || self.station1_pm10.is_some()
    }

    pub fn has_second(&self) -> bool {
        self.station2_pm25.is_some() || self.station2_pm10.is_some()
    }

    /// Values in column order: first PM2.5, first PM10, second PM2.5, second PM10.
    pub fn values(&self) -> [Option<f64>; 4] {
        [
            self.station1_pm25,
            self.station1_pm10,
            self.station2_pm25,
            self.station2_pm10,
        ]
    }
}

/// Daily PM averages of two stations, indexed by the union of their dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedTable {
    pub stations: [String; 2],
    pub rows: Vec<CombinedRow>,
}

impl CombinedTable {
    pub fn new(stations: [String; 2], rows: Vec<CombinedRow>) -> Result<Self> {
        ensure_distinct_stations(&stations[0], &stations[1])?;
        if rows.windows(2).any(|w| w[0].date >= w[1].date) {
            return Err(ProcessingError::InvalidFormat(
                "Combined rows must be sorted by unique date".to_string(),
            ));
        }
        Ok(Self { stations, rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.rows.first()?.date, self.rows.last()?.date))
    }

    /// Date selector default: the full extent of the table.
    pub fn full_range(&self) -> Option<DateRange> {
        self.date_bounds()
            .map(|(start, end)| DateRange::new(start, end))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|r| r.date)
    }

    pub fn column_names(&self) -> [String; 4] {
        let [first, second] = &self.stations;
        [
            format!("{}_PM2.5", first),
            format!("{}_PM10", first),
            format!("{}_PM2.5", second),
            format!("{}_PM10", second),
        ]
    }
}

/// Column names are derived from station names, so the two must differ.
pub fn ensure_distinct_stations(first: &str, second: &str) -> Result<()> {
    if first == second {
        return Err(ProcessingError::Config(format!(
            "Stations must have distinct names, both are '{}'",
            first
        )));
    }
    Ok(())
}
