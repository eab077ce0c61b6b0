use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Mean PM2.5 and PM10 of one station over one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    pub station: String,
    pub date: NaiveDate,
    pub pm25: f64,
    pub pm10: f64,
    pub observations: usize,
}

impl DailyAverage {
    pub fn new(station: String, date: NaiveDate, pm25: f64, pm10: f64, observations: usize) -> Self {
        Self {
            station,
            date,
            pm25,
            pm10,
            observations,
        }
    }
}
