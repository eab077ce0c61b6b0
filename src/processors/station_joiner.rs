use crate::error::Result;
use crate::models::{CombinedRow, CombinedTable, DailyAverage};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct StationJoiner;

impl StationJoiner {
    pub fn new() -> Self {
        Self
    }

    /// Outer join two stations' daily averages on date.
    /// A date missing from one station leaves that station's cells empty.
    pub fn join(
        &self,
        stations: [String; 2],
        first: &[DailyAverage],
        second: &[DailyAverage],
    ) -> Result<CombinedTable> {
        let mut by_date: BTreeMap<NaiveDate, CombinedRow> = BTreeMap::new();

        for daily in first {
            let row = by_date
                .entry(daily.date)
                .or_insert_with(|| CombinedRow::empty(daily.date));
            row.station1_pm25 = Some(daily.pm25);
            row.station1_pm10 = Some(daily.pm10);
        }

        for daily in second {
            let row = by_date
                .entry(daily.date)
                .or_insert_with(|| CombinedRow::empty(daily.date));
            row.station2_pm25 = Some(daily.pm25);
            row.station2_pm10 = Some(daily.pm10);
        }

        CombinedTable::new(stations, by_date.into_values().collect())
    }
}

impl Default for StationJoiner {
    fn default() -> Self {
        Self::new()
    }
}
