use crate::error::{ProcessingError, Result};
use crate::models::CombinedTable;
use chrono::NaiveDate;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub min: Option<(f64, NaiveDate)>,
    pub max: Option<(f64, NaiveDate)>,
}

#[derive(Debug)]
pub struct CombinedStatistics {
    pub stations: [String; 2],
    pub total_days: usize,
    pub date_range: (NaiveDate, NaiveDate),
    pub days_with_both: usize,
    pub columns: Vec<ColumnStats>,
}

pub struct CombinedAnalyzer;

impl CombinedAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_parquet_with_limit(&self, path: &Path, limit: usize) -> Result<CombinedStatistics> {
        let writer = crate::writers::ParquetWriter::new();
        let table = writer.read_combined_table(path, limit)?;
        self.analyze(&table)
    }

    pub fn analyze(&self, table: &CombinedTable) -> Result<CombinedStatistics> {
        let date_range = table.date_bounds().ok_or_else(|| {
            ProcessingError::MissingData("No rows to analyze".to_string())
        })?;

        let columns = table
            .column_names()
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let mut stats = ColumnStats {
                    name,
                    count: 0,
                    mean: f64::NAN,
                    min: None,
                    max: None,
                };
                let mut sum = 0.0;

                for row in &table.rows {
                    let Some(value) = row.values()[idx] else {
                        continue;
                    };
                    stats.count += 1;
                    sum += value;
                    if stats.min.map_or(true, |(min, _)| value < min) {
                        stats.min = Some((value, row.date));
                    }
                    if stats.max.map_or(true, |(max, _)| value > max) {
                        stats.max = Some((value, row.date));
                    }
                }

                if stats.count > 0 {
                    stats.mean = sum / stats.count as f64;
                }
                stats
            })
            .collect();

        Ok(CombinedStatistics {
            stations: table.stations.clone(),
            total_days: table.len(),
            date_range,
            days_with_both: table
                .rows
                .iter()
                .filter(|r| r.has_first() && r.has_second())
                .count(),
            columns,
        })
    }
}

impl Default for CombinedAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CombinedStatistics {
    pub fn summary(&self) -> String {
        format!(
            "Stations: {} and {}\n\
            Date Range: {} to {} ({} days)\n\
            Days With Both Stations: {} ({:.1}%)",
            self.stations[0],
            self.stations[1],
            self.date_range.0,
            self.date_range.1,
            self.total_days,
            self.days_with_both,
            100.0 * self.days_with_both as f64 / self.total_days as f64
        )
    }

    pub fn detailed_summary(&self) -> String {
        let mut out = self.summary();
        out.push_str("\n\nDaily Averages (µg/m³):");

        for column in &self.columns {
            if column.count == 0 {
                out.push_str(&format!("\n- {}: No valid measurements", column.name));
                continue;
            }

            let extreme = |v: Option<(f64, NaiveDate)>| {
                v.map(|(value, date)| format!("{:.1} on {}", value, date))
                    .unwrap_or_default()
            };
            out.push_str(&format!(
                "\n- {}: {} days, mean {:.1}, min {}, max {}",
                column.name,
                column.count,
                column.mean,
                extreme(column.min),
                extreme(column.max)
            ));
        }

        out
    }
}
