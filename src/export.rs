//! Spreadsheet export of the ledger (one sheet, one row per call).

use anyhow::Context;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Format, Workbook};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::error::LedgerError;
use crate::types::CallRecord;

pub const EXPORT_FILE_NAME: &str = "covered_calls.xlsx";
pub const EXPORT_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "covered_calls";

/// Header row. The first eight are the display columns; ids trail so roll links survive.
pub const COLUMNS: [&str; 10] = [
    "ticker",
    "strike",
    "premium",
    "expiration_date",
    "status",
    "close_price",
    "net_profit",
    "spot_price",
    "id",
    "rolled_from_id",
];

/// Serialize `records` into an xlsx workbook held in memory.
pub fn export_to_spreadsheet(records: &[CallRecord]) -> Result<Vec<u8>, LedgerError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let date = Format::new().set_num_format("yyyy-mm-dd");

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;
    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (i, c) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, c.ticker.as_str())?;
        sheet.write_number(row, 1, num(c.strike))?;
        sheet.write_number(row, 2, num(c.premium))?;
        sheet.write_datetime_with_format(row, 3, &c.expiration_date, &date)?;
        sheet.write_string(row, 4, c.status.as_str())?;
        if let Some(close) = c.close_price {
            sheet.write_number(row, 5, num(close))?;
        }
        sheet.write_number(row, 6, num(c.net_profit))?;
        if let Some(spot) = c.spot_price {
            sheet.write_number(row, 7, num(spot))?;
        }
        sheet.write_string(row, 8, c.id.as_str())?;
        if let Some(from) = &c.rolled_from_id {
            sheet.write_string(row, 9, from.as_str())?;
        }
    }
    sheet.set_column_width(8, 38)?;

    Ok(workbook.save_to_buffer()?)
}

/// Write the export into `dir/covered_calls.xlsx`, creating `dir` if needed.
pub fn write_export(records: &[CallRecord], dir: &Path) -> anyhow::Result<PathBuf> {
    let bytes = export_to_spreadsheet(records)?;
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, &bytes).with_context(|| format!("write {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = records.len(),
        bytes = bytes.len(),
        mime = EXPORT_MIME,
        "export written"
    );
    Ok(path)
}

/// Configured dir, else the user's download dir, else the working directory.
pub fn export_dir(configured: Option<&str>) -> PathBuf {
    if let Some(d) = configured.filter(|d| !d.trim().is_empty()) {
        return PathBuf::from(d);
    }
    directories::UserDirs::new()
        .and_then(|u| u.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn num(d: Decimal) -> f64 {
    // Decimal always fits an f64, possibly rounded
    d.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::types::{CallStatus, NewCall};
    use calamine::{open_workbook_from_rs, Data, DataType, Reader, Xlsx};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn sample_ledger() -> Ledger {
        let mut l = Ledger::new();
        let first = l
            .add_record(NewCall {
                ticker: "AAPL".into(),
                strike: dec!(150),
                premium: dec!(4.00),
                expiration_date: NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
                status: CallStatus::Closed,
                close_price: Some(dec!(1.00)),
                rolled_from_id: None,
                spot_price: Some(dec!(148.35)),
            })
            .id
            .clone();
        l.add_record(NewCall {
            ticker: "AAPL".into(),
            strike: dec!(155.5),
            premium: dec!(6.00),
            expiration_date: NaiveDate::from_ymd_opt(2026, 12, 18).unwrap(),
            status: CallStatus::Open,
            close_price: None,
            rolled_from_id: Some(first),
            spot_price: None,
        });
        l
    }

    fn read_rows(bytes: Vec<u8>) -> Vec<Vec<Data>> {
        let mut wb: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
        let range = wb.worksheet_range(SHEET_NAME).unwrap();
        range.rows().map(|r| r.to_vec()).collect()
    }

    fn f(d: Decimal) -> Option<f64> {
        d.to_f64()
    }

    #[test]
    fn header_row_matches_columns() {
        let rows = read_rows(export_to_spreadsheet(&[]).unwrap());
        assert_eq!(rows.len(), 1);
        let names: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
        assert_eq!(names, COLUMNS);
    }

    #[test]
    fn round_trip_reproduces_fields_in_order() {
        let ledger = sample_ledger();
        let rows = read_rows(export_to_spreadsheet(ledger.list_records()).unwrap());
        assert_eq!(rows.len(), 1 + ledger.len());

        for (row, rec) in rows[1..].iter().zip(ledger.list_records()) {
            assert_eq!(row[0].to_string(), rec.ticker);
            assert_eq!(row[1].as_f64(), f(rec.strike));
            assert_eq!(row[2].as_f64(), f(rec.premium));
            assert_eq!(row[3].as_date(), Some(rec.expiration_date));
            assert_eq!(row[4].to_string(), rec.status.as_str());
            match rec.close_price {
                Some(c) => assert_eq!(row[5].as_f64(), f(c)),
                None => assert!(row[5].is_empty()),
            }
            assert_eq!(row[6].as_f64(), f(rec.net_profit));
            match rec.spot_price {
                Some(s) => assert_eq!(row[7].as_f64(), f(s)),
                None => assert!(row[7].is_empty()),
            }
            assert_eq!(row[8].to_string(), rec.id);
            match &rec.rolled_from_id {
                Some(from) => assert_eq!(&row[9].to_string(), from),
                None => assert!(row[9].is_empty()),
            }
        }
        // the roll leg carried the first leg's 3.00
        assert_eq!(rows[2][6].as_f64(), Some(9.0));
    }

    #[test]
    fn write_export_creates_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested");
        let path = write_export(sample_ledger().list_records(), &target).unwrap();
        assert_eq!(path, target.join(EXPORT_FILE_NAME));
        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn configured_export_dir_wins() {
        assert_eq!(export_dir(Some("/tmp/calls")), PathBuf::from("/tmp/calls"));
        assert_ne!(export_dir(Some("  ")), PathBuf::from("  "));
    }
}
