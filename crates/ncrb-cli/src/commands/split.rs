use ncrb_core::error::NcrbError;
use ncrb_core::extraction::columns::split_columns;
use std::path::PathBuf;

use crate::commands::{emit, pdf_extractor, read_text};
use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), NcrbError> {
    let text = read_text(&input_file, &pdf_extractor(false))?;
    let rows: Vec<Vec<&str>> = split_columns(&text).collect();

    let output_str = match output_format {
        "json" => output::json::to_string(&rows)?,
        "csv" => output::csv::raw_rows(&rows)?,
        _ => output::table::format_raw_rows(&rows),
    };
    emit(&output_str, None)
}
