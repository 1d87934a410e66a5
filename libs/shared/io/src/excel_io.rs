use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, RangeDeserializerBuilder, Reader};
use serde::de::DeserializeOwned;

/// Reads one tab of a workbook (`Doctors, Locations, Rooms, Sessions,
/// Preferences, TravelTimes, DoctorWorkdays, DoctorWeekRules`) into `T`, with
/// the same row-index pairing as [`crate::read_csv_rows`] so callers can treat
/// both input shapes identically.
pub fn read_xlsx_sheet<T: DeserializeOwned>(path: &Path, sheet: &str) -> Result<Vec<(usize, T)>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range(sheet)
        .with_context(|| format!("sheet '{sheet}' not found in {}", path.display()))?;

    let iter = RangeDeserializerBuilder::new()
        .from_range::<_, T>(&range)
        .with_context(|| format!("sheet '{sheet}' has no usable header row"))?;

    let mut rows = Vec::new();
    for (row, record) in iter.enumerate() {
        let value = record.with_context(|| format!("sheet '{sheet}' row {row}: malformed record"))?;
        rows.push((row, value));
    }
    Ok(rows)
}

/// Like [`read_xlsx_sheet`], but a workbook with no tab named `sheet` yields
/// `Ok(None)` instead of an error — for optional ancillary tabs whose absence
/// is not a failure.
pub fn read_xlsx_sheet_optional<T: DeserializeOwned>(
    path: &Path,
    sheet: &str,
) -> Result<Option<Vec<(usize, T)>>> {
    let workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Ok(None);
    }
    read_xlsx_sheet(path, sheet).map(Some)
}
