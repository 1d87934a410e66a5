use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Reads a CSV table into `T`, one row per record, paired with its 0-based row
/// index for error attribution upstream. Header row is required; column order is
/// irrelevant (`csv`'s header-matching deserialization handles that).
pub fn read_csv_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<(usize, T)>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows = Vec::new();
    for (row, record) in reader.deserialize::<T>().enumerate() {
        let value = record
            .with_context(|| format!("{} row {}: malformed record", path.display(), row))?;
        rows.push((row, value));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::io::Write;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
        score: i64,
    }

    #[test]
    fn reads_rows_in_order_regardless_of_column_order() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "score,id").unwrap();
        writeln!(file, "5,a").unwrap();
        writeln!(file, "-3,b").unwrap();
        file.flush().unwrap();

        let rows = read_csv_rows::<Row>(file.path()).unwrap();
        assert_eq!(
            rows,
            vec![
                (0, Row { id: "a".into(), score: 5 }),
                (1, Row { id: "b".into(), score: -3 }),
            ]
        );
    }

    #[test]
    fn malformed_row_is_an_error_not_a_panic() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id,score").unwrap();
        writeln!(file, "a,not-a-number").unwrap();
        file.flush().unwrap();

        assert!(read_csv_rows::<Row>(file.path()).is_err());
    }
}
