use crate::models::{CombinedTable, DateRange};
use chrono::NaiveDate;

/// Fill unset bounds from the table's first and last dates, as a date selector would.
/// `None` only when a bound is unset and the table is empty.
pub fn resolve_range(
    table: &CombinedTable,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Option<DateRange> {
    let bounds = table.date_bounds();
    let start = start.or(bounds.map(|(min, _)| min))?;
    let end = end.or(bounds.map(|(_, max)| max))?;
    Some(DateRange::new(start, end))
}

/// Rows of `table` whose date lies in `range`, inclusive. An inverted range yields an empty table.
pub fn filter_by_date(table: &CombinedTable, range: DateRange) -> CombinedTable {
    let rows = if range.is_inverted() {
        Vec::new()
    } else {
        table
            .rows
            .iter()
            .filter(|row| range.contains(row.date))
            .cloned()
            .collect()
    };

    CombinedTable {
        stations: table.stations.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CombinedRow;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2013, 3, d).unwrap()
    }

    fn table(days: &[u32]) -> CombinedTable {
        let rows = days
            .iter()
            .map(|d| CombinedRow {
                date: date(*d),
                station1_pm25: Some(*d as f64),
                station1_pm10: None,
                station2_pm25: None,
                station2_pm10: Some(1.0),
            })
            .collect();
        CombinedTable::new(["A".into(), "B".into()], rows).unwrap()
    }

    #[test]
    fn test_inclusive_bounds() {
        let filtered = filter_by_date(&table(&[1, 2, 3, 4, 5]), DateRange::new(date(2), date(4)));
        let days: Vec<_> = filtered.dates().collect();
        assert_eq!(days, vec![date(2), date(3), date(4)]);
        assert_eq!(filtered.stations, ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let filtered = filter_by_date(&table(&[1, 2, 3]), DateRange::new(date(3), date(1)));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_full_range_is_identity() {
        let original = table(&[1, 5, 9]);
        let range = original.full_range().unwrap();
        assert_eq!(filter_by_date(&original, range), original);
    }

    #[test]
    fn test_range_outside_data() {
        let filtered = filter_by_date(&table(&[1, 2]), DateRange::new(date(10), date(20)));
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_resolve_range_defaults_to_bounds() {
        let t = table(&[2, 4, 8]);
        assert_eq!(
            resolve_range(&t, None, None),
            Some(DateRange::new(date(2), date(8)))
        );
        assert_eq!(
            resolve_range(&t, Some(date(3)), None),
            Some(DateRange::new(date(3), date(8)))
        );

        let empty = table(&[]);
        assert_eq!(resolve_range(&empty, None, None), None);
        assert_eq!(
            resolve_range(&empty, Some(date(1)), Some(date(2))),
            Some(DateRange::new(date(1), date(2)))
        );
    }

    #[test]
    fn test_single_day_range() {
        let filtered = filter_by_date(&table(&[1, 2, 3]), DateRange::new(date(2), date(2)));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows[0].station1_pm25, Some(2.0));
    }
}
