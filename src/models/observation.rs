use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The nine numeric fields compared in correlation heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measurement {
    Pm25,
    Pm10,
    So2,
    No2,
    Co,
    Temp,
    Pres,
    Dewp,
    Rain,
}

impl Measurement {
    pub const ALL: [Measurement; 9] = [
        Measurement::Pm25,
        Measurement::Pm10,
        Measurement::So2,
        Measurement::No2,
        Measurement::Co,
        Measurement::Temp,
        Measurement::Pres,
        Measurement::Dewp,
        Measurement::Rain,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            Measurement::Pm25 => "PM2.5",
            Measurement::Pm10 => "PM10",
            Measurement::So2 => "SO2",
            Measurement::No2 => "NO2",
            Measurement::Co => "CO",
            Measurement::Temp => "TEMP",
            Measurement::Pres => "PRES",
            Measurement::Dewp => "DEWP",
            Measurement::Rain => "RAIN",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.column_name() == name)
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// Nullable readings of one station-hour.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub so2: Option<f64>,
    pub no2: Option<f64>,
    pub co: Option<f64>,
    pub o3: Option<f64>,
    pub temp: Option<f64>,
    pub pres: Option<f64>,
    pub dewp: Option<f64>,
    pub rain: Option<f64>,
    pub wspm: Option<f64>,
    pub wd: Option<String>,
}

impl Measurements {
    pub fn get(&self, measurement: Measurement) -> Option<f64> {
        match measurement {
            Measurement::Pm25 => self.pm25,
            Measurement::Pm10 => self.pm10,
            Measurement::So2 => self.so2,
            Measurement::No2 => self.no2,
            Measurement::Co => self.co,
            Measurement::Temp => self.temp,
            Measurement::Pres => self.pres,
            Measurement::Dewp => self.dewp,
            Measurement::Rain => self.rain,
        }
    }

    pub fn set(&mut self, measurement: Measurement, value: Option<f64>) {
        let slot = match measurement {
            Measurement::Pm25 => &mut self.pm25,
            Measurement::Pm10 => &mut self.pm10,
            Measurement::So2 => &mut self.so2,
            Measurement::No2 => &mut self.no2,
            Measurement::Co => &mut self.co,
            Measurement::Temp => &mut self.temp,
            Measurement::Pres => &mut self.pres,
            Measurement::Dewp => &mut self.dewp,
            Measurement::Rain => &mut self.rain,
        };
        *slot = value;
    }

    pub fn has_core_values(&self) -> bool {
        self.pm25.is_some() && self.pm10.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub station: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub timestamp: NaiveDateTime,
    pub measurements: Measurements,
}

impl RawObservation {
    /// Returns `None` when the date parts do not form a valid timestamp.
    pub fn new(
        station: String,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        measurements: Measurements,
    ) -> Option<Self> {
        let timestamp = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)?;
        Some(Self {
            station,
            year,
            month,
            day,
            hour,
            timestamp,
            measurements,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// An observation whose PM2.5 and PM10 readings are both present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedObservation {
    pub station: String,
    pub timestamp: NaiveDateTime,
    pub pm25: f64,
    pub pm10: f64,
    pub measurements: Measurements,
}

impl CleanedObservation {
    pub fn from_raw(raw: RawObservation) -> Option<Self> {
        let pm25 = raw.measurements.pm25?;
        let pm10 = raw.measurements.pm10?;
        Some(Self {
            station: raw.station,
            timestamp: raw.timestamp,
            pm25,
            pm10,
            measurements: raw.measurements,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn get(&self, measurement: Measurement) -> Option<f64> {
        self.measurements.get(measurement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measurements(pm25: Option<f64>, pm10: Option<f64>) -> Measurements {
        Measurements {
            pm25,
            pm10,
            ..Default::default()
        }
    }

    #[test]
    fn test_timestamp_from_parts() {
        let obs =
            RawObservation::new("Wanliu".to_string(), 2013, 3, 1, 23, Measurements::default())
                .unwrap();
        assert_eq!(obs.timestamp.to_string(), "2013-03-01 23:00:00");
        assert_eq!(obs.date(), NaiveDate::from_ymd_opt(2013, 3, 1).unwrap());
    }

    #[test]
    fn test_invalid_date_parts() {
        assert!(RawObservation::new("A".into(), 2013, 13, 1, 0, Measurements::default()).is_none());
        assert!(RawObservation::new("A".into(), 2013, 2, 30, 0, Measurements::default()).is_none());
        assert!(RawObservation::new("A".into(), 2013, 3, 1, 24, Measurements::default()).is_none());
    }

    #[test]
    fn test_cleaned_requires_both_pm_values() {
        let raw = RawObservation::new("A".into(), 2013, 3, 1, 0, measurements(None, Some(30.0)))
            .unwrap();
        assert!(CleanedObservation::from_raw(raw).is_none());

        let raw = RawObservation::new("A".into(), 2013, 3, 1, 0, measurements(Some(12.0), Some(30.0)))
            .unwrap();
        let cleaned = CleanedObservation::from_raw(raw).unwrap();
        assert_eq!(cleaned.pm25, 12.0);
        assert_eq!(cleaned.pm10, 30.0);
    }

    #[test]
    fn test_measurement_accessors() {
        let mut m = Measurements::default();
        for (i, field) in Measurement::ALL.iter().enumerate() {
            m.set(*field, Some(i as f64));
        }
        for (i, field) in Measurement::ALL.iter().enumerate() {
            assert_eq!(m.get(*field), Some(i as f64));
        }
        assert_eq!(Measurement::from_column_name("PM2.5"), Some(Measurement::Pm25));
        assert_eq!(Measurement::from_column_name("O3"), None);
    }
}
