//! Spreadsheet export for the finance tracker
//!
//! Writes expenses without their ids, in repository order, as a CSV table
//! any spreadsheet application can open.

use std::io::Write;

use crate::error::{FinVaultError, FinVaultResult};
use crate::models::{format_plain, ExportRow};

/// Write rows as CSV with a `name,amount` header
pub fn export_expenses_csv<W: Write>(rows: &[ExportRow], writer: W) -> FinVaultResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(["name", "amount"])
        .map_err(|e| FinVaultError::Export(e.to_string()))?;

    for row in rows {
        csv_writer
            .write_record([row.name.as_str(), format_plain(row.amount).as_str()])
            .map_err(|e| FinVaultError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FinVaultError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, amount: f64) -> ExportRow {
        ExportRow {
            name: name.to_string(),
            amount,
        }
    }

    #[test]
    fn test_export_rows() {
        let rows = vec![row("Groceries", 50.0), row("Internet", 30.0)];

        let mut output = Vec::new();
        export_expenses_csv(&rows, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "name,amount\nGroceries,50\nInternet,30\n");
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let rows = vec![row("Rent, March", 1200.5), row("Say \"hi\"", 1.0)];

        let mut output = Vec::new();
        export_expenses_csv(&rows, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("\"Rent, March\",1200.5"));
        assert!(text.contains("\"Say \"\"hi\"\"\",1"));
    }

    #[test]
    fn test_empty_export_has_header() {
        let mut output = Vec::new();
        export_expenses_csv(&[], &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "name,amount\n");
    }

    #[test]
    fn test_output_reads_back() {
        let rows = vec![row("Groceries", 50.25)];
        let mut output = Vec::new();
        export_expenses_csv(&rows, &mut output).unwrap();

        let mut reader = csv::Reader::from_reader(output.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[0], "Groceries");
        assert_eq!(record[1].parse::<f64>().unwrap(), 50.25);
    }
}
