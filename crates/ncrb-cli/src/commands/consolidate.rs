use ncrb_core::error::NcrbError;
use ncrb_core::normalize::DuplicatePolicy;
use ncrb_core::summary::DocumentOutcome;
use ncrb_core::Document;
use std::path::PathBuf;

use crate::commands::{
    emit, pdf_extractor, read_document, resolve_layout, source_name, warn_if_pdftotext_missing,
};
use crate::output;

pub struct ConsolidateArgs {
    pub input_files: Vec<PathBuf>,
    pub layout_file: Option<PathBuf>,
    pub preset: Option<String>,
    pub duplicates: Option<String>,
    pub output_format: String,
    pub out: Option<PathBuf>,
    pub summary: Option<PathBuf>,
}

pub fn run(args: ConsolidateArgs) -> Result<(), NcrbError> {
    let layout = resolve_layout(args.layout_file, args.preset)?;
    let policy = match args.duplicates.as_deref() {
        Some(s) => s.parse::<DuplicatePolicy>()?,
        None => layout.duplicates,
    };

    warn_if_pdftotext_missing(&args.input_files);
    let mut documents: Vec<Document> = Vec::new();
    let mut unreadable: Vec<DocumentOutcome> = Vec::new();
    for path in &args.input_files {
        match read_document(path) {
            Ok(doc) => documents.push(doc),
            Err(e) => {
                let source = source_name(path);
                tracing::warn!(source = %source, error = %e, "skipping document");
                unreadable.push(DocumentOutcome::failed(
                    &source,
                    ncrb_core::normalize::extract_year(&source),
                    e.to_string(),
                ));
            }
        }
    }

    let extractor = pdf_extractor(false);
    let mut result = ncrb_core::process_batch(&documents, &extractor, &layout, policy).map_err(
        |e| match e {
            NcrbError::NoData { .. } => NcrbError::NoData {
                documents: args.input_files.len(),
            },
            other => other,
        },
    )?;
    result.summary.documents.extend(unreadable);

    let output_str = match args.output_format.as_str() {
        "json" => output::json::to_string(&result.records)?,
        "csv" => output::csv::long_records(&result.records)?,
        _ if args.out.is_some() => output::csv::long_records(&result.records)?,
        _ => output::table::format_records(&result.records),
    };
    emit(&output_str, args.out.as_deref())?;

    if let Some(path) = &args.summary {
        emit(&output::json::to_string(&result.summary)?, Some(path.as_path()))?;
    }

    output::table::print_summary(&result.summary);
    if let Some(path) = &args.out {
        eprintln!("Dataset written to {}", path.display());
    }

    Ok(())
}
