use crate::models::{CleanedObservation, Measurement, Measurements, RawObservation};
use std::collections::HashMap;

/// Counters collected while cleaning one station's rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningStats {
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub filled_values: HashMap<Measurement, usize>,
}

impl CleaningStats {
    pub fn rows_kept(&self) -> usize {
        self.rows_read - self.rows_dropped
    }

    pub fn total_filled(&self) -> usize {
        self.filled_values.values().sum()
    }
}

/// Last value seen for each field, carried through the fold
#[derive(Debug, Default)]
struct FillState {
    last: Measurements,
    filled: HashMap<Measurement, usize>,
}

impl FillState {
    fn fill(&mut self, mut current: Measurements) -> Measurements {
        for measurement in Measurement::ALL {
            if current.get(measurement).is_none() {
                if let Some(value) = self.last.get(measurement) {
                    current.set(measurement, Some(value));
                    *self.filled.entry(measurement).or_default() += 1;
                }
            }
        }

        fill_slot(&mut current.o3, &self.last.o3);
        fill_slot(&mut current.wspm, &self.last.wspm);
        fill_slot(&mut current.wd, &self.last.wd);

        // Every field of the filled row is now the latest known value
        self.last = current.clone();
        current
    }
}

fn fill_slot<T: Clone>(slot: &mut Option<T>, last: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(last);
    }
}

pub struct Cleaner;

impl Cleaner {
    pub fn new() -> Self {
        Self
    }

    /// Replace missing values with the most recent earlier value of the same field.
    /// Rows must belong to a single station and be in time order.
    pub fn forward_fill(&self, rows: Vec<RawObservation>) -> Vec<RawObservation> {
        self.forward_fill_counted(rows).0
    }

    fn forward_fill_counted(
        &self,
        rows: Vec<RawObservation>,
    ) -> (Vec<RawObservation>, HashMap<Measurement, usize>) {
        let (filled, state) = rows.into_iter().fold(
            (Vec::new(), FillState::default()),
            |(mut acc, mut state), mut row| {
                row.measurements = state.fill(row.measurements);
                acc.push(row);
                (acc, state)
            },
        );
        (filled, state.filled)
    }

    /// Keep only rows with both PM2.5 and PM10 present.
    pub fn drop_incomplete(&self, rows: Vec<RawObservation>) -> Vec<CleanedObservation> {
        rows.into_iter()
            .filter_map(CleanedObservation::from_raw)
            .collect()
    }

    pub fn clean(&self, rows: Vec<RawObservation>) -> (Vec<CleanedObservation>, CleaningStats) {
        let rows_read = rows.len();
        let (filled, filled_values) = self.forward_fill_counted(rows);
        let cleaned = self.drop_incomplete(filled);

        let stats = CleaningStats {
            rows_read,
            rows_dropped: rows_read - cleaned.len(),
            filled_values,
        };

        (cleaned, stats)
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}
