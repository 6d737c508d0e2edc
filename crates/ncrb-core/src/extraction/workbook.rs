use std::io::Cursor;

use calamine::{Reader, Xlsx};
use rust_decimal::Decimal;

use crate::error::NcrbError;
use crate::model::{WideRecord, WideTable};
use crate::normalize::{coerce_number, title_case};

/// Columns a wide sheet must carry, in order.
pub const WIDE_COLUMNS: [&str; 6] = [
    "Sl. No.",
    "State/UT",
    "Number of Suicides",
    "Percentage Share in Total",
    "Projected Mid Year Population",
    "Rate of Suicides",
];

/// Read one wide sheet from xlsx bytes.
///
/// The first row is a header and is skipped. Columns are mapped by position
/// onto [`WIDE_COLUMNS`], so upstream renames do not matter but order does.
/// Cells that are not numbers become `None`; fully blank rows and rows
/// without an entity name are dropped.
pub fn read_wide_sheet(
    bytes: &[u8],
    sheet_name: &str,
    source: &str,
    year: Option<i32>,
) -> Result<WideTable, NcrbError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| NcrbError::Workbook(format!("failed to open xlsx: {e}")))?;

    let sheet = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| NcrbError::Workbook(format!("sheet '{sheet_name}' not found: {e}")))?;

    if !sheet.is_empty() && sheet.width() < WIDE_COLUMNS.len() {
        return Err(NcrbError::Workbook(format!(
            "sheet '{sheet_name}' has {} column(s), expected {}",
            sheet.width(),
            WIDE_COLUMNS.len()
        )));
    }

    if let Some(header) = sheet.rows().next() {
        for (expected, cell) in WIDE_COLUMNS.iter().zip(header) {
            let found = cell_as_string(cell).unwrap_or_default();
            if !found.eq_ignore_ascii_case(expected) {
                tracing::debug!(
                    source,
                    sheet_name,
                    expected,
                    found = %found,
                    "header differs, mapping by position"
                );
            }
        }
    }

    let mut rows = Vec::new();
    for (idx, cells) in sheet.rows().enumerate().skip(1) {
        if cells.iter().all(|c| matches!(c, calamine::Data::Empty)) {
            continue;
        }

        let entity = match cells.get(1).and_then(cell_as_string) {
            Some(name) => title_case(&name),
            None => {
                tracing::debug!(source, sheet_name, row = idx + 1, "row without entity name dropped");
                continue;
            }
        };

        rows.push(WideRecord {
            year,
            entity,
            sl_no: cells.first().and_then(cell_as_u32),
            num_suicides: cells.get(2).and_then(cell_as_decimal),
            pct_share: cells.get(3).and_then(cell_as_decimal),
            population: cells.get(4).and_then(cell_as_decimal),
            rate: cells.get(5).and_then(cell_as_decimal),
        });
    }

    Ok(WideTable::new(source, sheet_name, year, rows))
}

fn cell_as_string(cell: &calamine::Data) -> Option<String> {
    match cell {
        calamine::Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        calamine::Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

fn cell_as_decimal(cell: &calamine::Data) -> Option<Decimal> {
    match cell {
        calamine::Data::Float(f) => f64_to_decimal(*f),
        calamine::Data::Int(i) => Some(Decimal::from(*i)),
        calamine::Data::String(s) => coerce_number(s),
        _ => None,
    }
}

fn cell_as_u32(cell: &calamine::Data) -> Option<u32> {
    match cell {
        calamine::Data::Int(i) => u32::try_from(*i).ok(),
        calamine::Data::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= u32::MAX as f64 => {
            Some(*f as u32)
        }
        calamine::Data::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Convert f64 to Decimal, preserving reasonable precision.
///
/// Uses string round-trip to avoid floating-point artifacts
/// (e.g., 0.0035_f64 becoming 0.00349999...). NaN and infinities have no
/// decimal form and yield `None`.
fn f64_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    format!("{f}")
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn f64_to_decimal_preserves_precision() {
        assert_eq!(f64_to_decimal(5.67), Some(dec!(5.67)));
        assert_eq!(f64_to_decimal(1234.0), Some(dec!(1234)));
        assert_eq!(f64_to_decimal(890.12), Some(dec!(890.12)));
    }

    #[test]
    fn f64_to_decimal_rejects_nan() {
        assert_eq!(f64_to_decimal(f64::NAN), None);
        assert_eq!(f64_to_decimal(f64::INFINITY), None);
    }

    #[test]
    fn numeric_cells_coerce_or_null() {
        assert_eq!(cell_as_decimal(&calamine::Data::Int(7)), Some(dec!(7)));
        assert_eq!(
            cell_as_decimal(&calamine::Data::String(" 3.45 ".into())),
            Some(dec!(3.45))
        );
        assert_eq!(cell_as_decimal(&calamine::Data::String("N.A.".into())), None);
        assert_eq!(cell_as_decimal(&calamine::Data::Empty), None);
        assert_eq!(cell_as_decimal(&calamine::Data::Bool(true)), None);
    }

    #[test]
    fn serial_cells() {
        assert_eq!(cell_as_u32(&calamine::Data::Float(12.0)), Some(12));
        assert_eq!(cell_as_u32(&calamine::Data::Float(1.5)), None);
        assert_eq!(cell_as_u32(&calamine::Data::String("4".into())), Some(4));
    }

    const ADSI_2021: &[u8] = include_bytes!("../../tests/fixtures/adsi_2021.xlsx");

    #[test]
    fn reads_states_sheet_by_position() {
        let table = read_wide_sheet(ADSI_2021, "States", "adsi_2021.xlsx", Some(2021)).unwrap();
        assert_eq!(table.section, "States");
        assert_eq!(table.year, Some(2021));

        let entities: Vec<&str> = table.rows.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(entities, vec!["Andhra Pradesh", "Bihar", "Goa"]);

        let andhra = &table.rows[0];
        assert_eq!(andhra.sl_no, Some(1));
        assert_eq!(andhra.num_suicides, Some(dec!(1234)));
        assert_eq!(andhra.pct_share, Some(dec!(5.67)));
        assert_eq!(andhra.population, Some(dec!(890.12)));
        assert_eq!(andhra.rate, Some(dec!(3.45)));
        assert!(table.rows.iter().all(|r| r.year == Some(2021)));
    }

    #[test]
    fn not_applicable_cell_becomes_none() {
        let table = read_wide_sheet(ADSI_2021, "States", "adsi_2021.xlsx", None).unwrap();
        let bihar = &table.rows[1];
        assert_eq!(bihar.num_suicides, Some(dec!(940)));
        assert_eq!(bihar.pct_share, None);
        assert_eq!(bihar.population, Some(dec!(1237.36)));
    }

    #[test]
    fn missing_sheet_is_workbook_error() {
        let err = read_wide_sheet(ADSI_2021, "Districts", "adsi_2021.xlsx", None).unwrap_err();
        assert!(matches!(err, NcrbError::Workbook(_)));
    }

    #[test]
    fn invalid_bytes_are_workbook_error() {
        let err = read_wide_sheet(b"not a zip", "States", "x.xlsx", None).unwrap_err();
        assert!(matches!(err, NcrbError::Workbook(_)));
    }
}
