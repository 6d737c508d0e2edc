use ncrb_core::error::NcrbError;
use ncrb_core::model::{DocumentTables, WideTable};
use std::path::PathBuf;

use crate::commands::{
    emit, pdf_extractor, read_text, resolve_layout, source_name, warn_if_pdftotext_missing,
};
use crate::output;

pub fn run(
    input_files: Vec<PathBuf>,
    layout_file: Option<PathBuf>,
    preset: Option<String>,
    output_format: &str,
    output_file: Option<PathBuf>,
    raw: bool,
) -> Result<(), NcrbError> {
    let layout = resolve_layout(layout_file, preset)?;
    warn_if_pdftotext_missing(&input_files);
    let extractor = pdf_extractor(raw);

    let mut documents: Vec<DocumentTables> = Vec::new();
    let mut failed = 0;
    for path in &input_files {
        let source = source_name(path);
        match read_text(path, &extractor) {
            Ok(text) => documents.push(ncrb_core::extract_text(&source, &text, &layout)),
            Err(e) => {
                tracing::warn!(source = %source, error = %e, "skipping document");
                eprintln!("  skipped {}: {e}", path.display());
                failed += 1;
            }
        }
    }

    if documents.is_empty() {
        return Err(NcrbError::NoData {
            documents: input_files.len(),
        });
    }

    match output_file {
        Some(path) => {
            // Always write wide tables when saving to file
            let tables: Vec<WideTable> = documents.iter().flat_map(|d| d.wide_tables()).collect();
            let json = output::json::to_string(&tables)?;
            emit(&json, Some(path.as_path()))?;
            let rows: usize = tables.iter().map(|t| t.rows.len()).sum();
            eprintln!(
                "Extracted {} document(s), {} row(s) written to {}",
                documents.len(),
                rows,
                path.display()
            );
            for doc in &documents {
                for section in doc.sections.iter().filter(|s| !s.found) {
                    eprintln!("  {}: section '{}' not found", doc.source, section.label);
                }
            }
        }
        None => emit(&render(&documents, output_format)?, None)?,
    }

    if failed > 0 {
        eprintln!("  {failed} document(s) could not be read");
    }

    Ok(())
}

fn render(documents: &[DocumentTables], output_format: &str) -> Result<String, NcrbError> {
    Ok(match output_format {
        "json" => output::json::to_string(documents)?,
        "csv" => output::csv::wide_rows(documents)?,
        _ => output::table::format_documents(documents),
    })
}
