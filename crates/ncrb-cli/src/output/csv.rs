use ncrb_core::error::NcrbError;
use ncrb_core::model::{DocumentTables, LongRecord};
use rust_decimal::Decimal;

/// The consolidated dataset, one line per record.
pub fn long_records(records: &[LongRecord]) -> Result<String, NcrbError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["year", "entity", "category", "value", "unit", "note"])
        .map_err(std::io::Error::from)?;
    for r in records {
        wtr.write_record([
            r.year.map(|y| y.to_string()).unwrap_or_default(),
            r.entity.clone(),
            r.category.to_string(),
            decimal_cell(r.value),
            r.unit.clone(),
            r.note.clone().unwrap_or_default(),
        ])
        .map_err(std::io::Error::from)?;
    }
    finish(wtr)
}

/// Extracted rows in the wide shape of the report tables.
pub fn wide_rows(documents: &[DocumentTables]) -> Result<String, NcrbError> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "source",
        "section",
        "Sl. No.",
        "State/UT",
        "Number of Suicides",
        "Percentage Share",
        "Estimated Mid-Year Population (Lakh)",
        "Rate of Suicides",
    ])
    .map_err(std::io::Error::from)?;
    for doc in documents {
        for section in &doc.sections {
            for row in &section.rows {
                wtr.write_record([
                    doc.source.clone(),
                    section.sheet.clone(),
                    row.serial.to_string(),
                    row.entity.clone(),
                    row.num_suicides.to_string(),
                    row.pct_share.to_string(),
                    row.population.to_string(),
                    row.rate.to_string(),
                ])
                .map_err(std::io::Error::from)?;
            }
        }
    }
    finish(wtr)
}

/// Column-split lines; rows may differ in length.
pub fn raw_rows(rows: &[Vec<&str>]) -> Result<String, NcrbError> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());
    for row in rows {
        wtr.write_record(row).map_err(std::io::Error::from)?;
    }
    finish(wtr)
}

fn decimal_cell(value: Option<Decimal>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, NcrbError> {
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}
