use crate::analyzers::{correlation_matrix, scatter_series, CorrelationMatrix, ScatterSeries};
use crate::error::Result;
use crate::models::{CombinedRow, DateRange, Measurement};
use crate::processors::{filter_by_date, PipelineOutput};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Everything a front end needs to draw the dashboard charts
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub stations: [String; 2],
    pub columns: [String; 4],
    pub date_range: Option<DateRange>,
    pub daily: Vec<CombinedRow>,
    pub correlations: Vec<CorrelationMatrix>,
    pub scatter: Vec<ScatterSeries>,
}

impl DashboardReport {
    /// Build the report for `range`, or for the whole table when `range` is `None`.
    /// Correlations and scatter points use every cleaned row, not just the range.
    pub fn build(output: &PipelineOutput, range: Option<DateRange>) -> Self {
        let range = range.or_else(|| output.combined.full_range());
        let daily = match range {
            Some(range) => filter_by_date(&output.combined, range).rows,
            None => Vec::new(),
        };

        let correlations = output
            .stations
            .iter()
            .map(|s| correlation_matrix(&s.source.name, &s.cleaned, &Measurement::ALL))
            .collect();

        let scatter = output
            .stations
            .iter()
            .map(|s| scatter_series(&s.source.name, &s.cleaned, Measurement::Temp, Measurement::No2))
            .collect();

        Self {
            stations: output.combined.stations.clone(),
            columns: output.combined.column_names(),
            date_range: range,
            daily,
            correlations,
            scatter,
        }
    }
}

pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write_report(&self, report: &DashboardReport, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, report)?;
        debug!(path = %path.display(), rows = report.daily.len(), "wrote dashboard report");
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}
