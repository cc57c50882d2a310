//! Report data types and the loader seam.

use anyhow::Result;
use chrono::NaiveDate;

/// Date format used by the store file and the rendered report.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One (date, value) observation from the input dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    /// Observation date.
    pub date: NaiveDate,

    /// Observed value.
    pub value: f64,
}

/// Source of the records the report is built from.
///
/// Implementations return the full sequence in whatever order the backing
/// storage yields it; callers must sort before relying on the order.
pub trait DataSource {
    fn fetch_records(&self) -> Result<Vec<Record>>;
}

/// Sort records by date, ascending.
pub fn sort_by_date(records: &mut [Record]) {
    records.sort_by_key(|record| record.date);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, value: f64) -> Record {
        Record {
            date: NaiveDate::parse_from_str(date, DATE_FORMAT).expect("invalid test date"),
            value,
        }
    }

    #[test]
    fn sort_orders_by_date() {
        let mut records = vec![
            record("2023-06-03", 3.0),
            record("2023-06-01", 1.0),
            record("2023-06-02", 2.0),
        ];
        sort_by_date(&mut records);

        let values: Vec<f64> = records.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }
}
