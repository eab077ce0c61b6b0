//! Pearson correlation matrices and scatter series over cleaned observations.

use crate::models::{CleanedObservation, Measurement};
use crate::utils::constants::SCATTER_ALPHA;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub station: String,
    pub fields: Vec<Measurement>,
    /// Row-major coefficients. `None` where the coefficient is undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Measurement, b: Measurement) -> Option<f64> {
        let i = self.fields.iter().position(|f| *f == a)?;
        let j = self.fields.iter().position(|f| *f == b)?;
        self.values[i][j]
    }

    /// Render as an annotated text grid
    pub fn to_table_string(&self) -> String {
        let mut out = format!("Correlation Matrix - {}\n", self.station);
        out.push_str(&format!("{:>8}", ""));
        for field in &self.fields {
            out.push_str(&format!("{:>8}", field.column_name()));
        }
        out.push('\n');

        for (field, row) in self.fields.iter().zip(&self.values) {
            out.push_str(&format!("{:>8}", field.column_name()));
            for value in row {
                match value {
                    Some(v) => out.push_str(&format!("{:>8.2}", v)),
                    None => out.push_str(&format!("{:>8}", "n/a")),
                }
            }
            out.push('\n');
        }

        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub station: String,
    pub x: Measurement,
    pub y: Measurement,
    pub alpha: f64,
    pub points: Vec<[f64; 2]>,
}

/// Pearson correlation over `fields`, using for each pair only the rows where both are present
pub fn correlation_matrix(
    station: &str,
    rows: &[CleanedObservation],
    fields: &[Measurement],
) -> CorrelationMatrix {
    let values = fields
        .iter()
        .map(|a| {
            fields
                .iter()
                .map(|b| pearson(rows.iter().filter_map(|r| Some((r.get(*a)?, r.get(*b)?)))))
                .collect()
        })
        .collect();

    CorrelationMatrix {
        station: station.to_string(),
        fields: fields.to_vec(),
        values,
    }
}

pub fn scatter_series(
    station: &str,
    rows: &[CleanedObservation],
    x: Measurement,
    y: Measurement,
) -> ScatterSeries {
    let points = rows
        .iter()
        .filter_map(|r| Some([r.get(x)?, r.get(y)?]))
        .collect();

    ScatterSeries {
        station: station.to_string(),
        x,
        y,
        alpha: SCATTER_ALPHA,
        points,
    }
}

fn pearson(pairs: impl Iterator<Item = (f64, f64)>) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = pairs.collect();
    let n = pairs.len();
    if n < 2 {
        return None;
    }

    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n as f64;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurements;
    use chrono::NaiveDate;

    fn obs(hour: u32, temp: Option<f64>, no2: Option<f64>, so2: Option<f64>) -> CleanedObservation {
        CleanedObservation {
            station: "A".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2013, 3, 1)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            pm25: hour as f64,
            pm10: 2.0 * hour as f64,
            measurements: Measurements {
                pm25: Some(hour as f64),
                pm10: Some(2.0 * hour as f64),
                temp,
                no2,
                so2,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_perfect_correlations() {
        let rows: Vec<_> = (0..5)
            .map(|h| obs(h, Some(h as f64), Some(10.0 - h as f64), None))
            .collect();
        let matrix = correlation_matrix("A", &rows, &Measurement::ALL);

        let close = |v: Option<f64>, expected: f64| (v.unwrap() - expected).abs() < 1e-12;
        assert!(close(matrix.get(Measurement::Pm25, Measurement::Pm10), 1.0));
        assert!(close(matrix.get(Measurement::Temp, Measurement::No2), -1.0));
        assert!(close(matrix.get(Measurement::Pm25, Measurement::Pm25), 1.0));
        assert_eq!(matrix.get(Measurement::So2, Measurement::Pm25), None);
        assert_eq!(matrix.values.len(), 9);
    }

    #[test]
    fn test_pairwise_complete_rows() {
        let rows = vec![
            obs(0, Some(1.0), Some(2.0), None),
            obs(1, Some(2.0), None, None),
            obs(2, Some(3.0), Some(6.0), None),
            obs(3, None, Some(100.0), None),
        ];
        let matrix = correlation_matrix("A", &rows, &[Measurement::Temp, Measurement::No2]);

        // Only hours 0 and 2 have both values
        let r = matrix.get(Measurement::Temp, Measurement::No2).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_field_is_undefined() {
        let rows: Vec<_> = (0..4).map(|h| obs(h, Some(5.0), Some(h as f64), None)).collect();
        let matrix = correlation_matrix("A", &rows, &[Measurement::Temp, Measurement::No2]);

        assert_eq!(matrix.get(Measurement::Temp, Measurement::No2), None);
        assert_eq!(matrix.get(Measurement::Temp, Measurement::Temp), None);
        assert!(matrix.to_table_string().contains("n/a"));
    }

    #[test]
    fn test_scatter_skips_incomplete_points() {
        let rows = vec![
            obs(0, Some(-1.0), Some(40.0), None),
            obs(1, None, Some(42.0), None),
            obs(2, Some(3.5), Some(38.0), None),
        ];
        let series = scatter_series("A", &rows, Measurement::Temp, Measurement::No2);

        assert_eq!(series.points, vec![[-1.0, 40.0], [3.5, 38.0]]);
        assert_eq!(series.alpha, 0.5);
    }
}
