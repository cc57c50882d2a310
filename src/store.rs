use crate::record::{DATE_FORMAT, DataSource, Record};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::{fs, path::PathBuf};

/// File name of the throwaway table inside the report directory.
pub const TABLE_FILE: &str = "tabla.csv";

/// Fixed sample dataset used to seed the store on every render.
pub const SAMPLE_ROWS: [(&str, f64); 10] = [
    ("2023-06-01", 23.0),
    ("2023-06-02", 25.0),
    ("2023-06-03", 28.0),
    ("2023-06-04", 27.0),
    ("2023-06-05", 30.0),
    ("2023-06-06", 24.0),
    ("2023-06-07", 29.0),
    ("2023-06-08", 26.0),
    ("2023-06-09", 31.0),
    ("2023-06-10", 22.0),
];

/// Throwaway tabular store holding a single `(fecha, valor)` table.
///
/// The table lives in one CSV file that is deleted and rewritten on every
/// render, so nothing persists between runs.
pub struct TableStore {
    file: PathBuf,
}

impl TableStore {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }

    /// Delete any previous table file and write a fresh one with `rows`.
    pub fn recreate(&self, rows: &[(&str, f64)]) -> Result<()> {
        self.delete().context("failed to delete previous table")?;

        let mut writer = csv::Writer::from_path(&self.file)
            .with_context(|| format!("failed to create {:?}", self.file))?;

        writer
            .write_record(["fecha", "valor"])
            .context("failed to write table header")?;
        for &(fecha, valor) in rows {
            writer
                .write_record([fecha.to_string(), valor.to_string()])
                .with_context(|| format!("failed to write row for {fecha}"))?;
        }

        writer.flush().context("failed to flush table writer")?;

        Ok(())
    }

    /// Remove the table file if it exists.
    pub fn delete(&self) -> Result<()> {
        if self.file.exists() {
            fs::remove_file(&self.file)
                .with_context(|| format!("failed to remove {:?}", self.file))?;
        }
        Ok(())
    }
}

impl DataSource for TableStore {
    fn fetch_records(&self) -> Result<Vec<Record>> {
        let mut reader = csv::Reader::from_path(&self.file)
            .with_context(|| format!("failed to open {:?}", self.file))?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row.with_context(|| format!("failed to read row {idx}"))?;

            let fecha = row.get(0).with_context(|| format!("missing date in row {idx}"))?;
            let date = NaiveDate::parse_from_str(fecha, DATE_FORMAT)
                .with_context(|| format!("invalid date {fecha:?} in row {idx}"))?;

            let valor = row.get(1).with_context(|| format!("missing value in row {idx}"))?;
            let value: f64 = valor
                .parse()
                .with_context(|| format!("invalid value {valor:?} in row {idx}"))?;

            records.push(Record { date, value });
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn test_store(name: &str) -> TableStore {
        let dir = env::temp_dir().join(format!("campana-store-{name}"));
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).expect("failed to create test directory");
        TableStore::new(dir.join(TABLE_FILE))
    }

    #[test]
    fn recreate_and_fetch_roundtrip() {
        let store = test_store("roundtrip");

        store.recreate(&SAMPLE_ROWS).expect("failed to recreate store");
        let records = store.fetch_records().expect("failed to fetch records");

        assert_eq!(records.len(), SAMPLE_ROWS.len());
        assert_eq!(records[0].date.format(DATE_FORMAT).to_string(), "2023-06-01");
        assert_eq!(records[0].value, 23.0);
        assert_eq!(records[9].value, 22.0);
    }

    #[test]
    fn recreate_replaces_previous_table() {
        let store = test_store("replace");

        store
            .recreate(&[("2020-01-01", 1.0), ("2020-01-02", 2.0)])
            .expect("failed to recreate store");
        store
            .recreate(&[("2021-05-05", 9.0)])
            .expect("failed to recreate store");

        let records = store.fetch_records().expect("failed to fetch records");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].value, 9.0);
    }

    #[test]
    fn fetch_fails_without_table() {
        let store = test_store("missing");
        assert!(store.fetch_records().is_err());
    }

    #[test]
    fn fetch_fails_on_corrupt_value() {
        let store = test_store("corrupt");
        store.recreate(&[("2020-01-01", 1.0)]).expect("failed to recreate store");

        // Damage the value column.
        let file = env::temp_dir().join("campana-store-corrupt").join(TABLE_FILE);
        fs::write(&file, "fecha,valor\n2020-01-01,not-a-number\n").expect("failed to overwrite");

        assert!(store.fetch_records().is_err());
    }

    #[test]
    fn delete_is_idempotent() {
        let store = test_store("delete");

        store.recreate(&SAMPLE_ROWS).expect("failed to recreate store");
        store.delete().expect("failed to delete store");
        store.delete().expect("second delete must succeed");

        assert!(store.fetch_records().is_err());
    }
}
