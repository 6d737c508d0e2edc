pub mod consolidate;
pub mod extract;
pub mod layouts;
pub mod split;

use ncrb_core::error::NcrbError;
use ncrb_core::extraction::pdftotext::PdftotextExtractor;
use ncrb_core::extraction::{join_pages, PdfExtractor};
use ncrb_core::layout::builtin;
use ncrb_core::layout::schema::LayoutDef;
use ncrb_core::model::WideTable;
use ncrb_core::{Document, DocumentBody};
use std::path::{Path, PathBuf};

/// Pick the layout from a custom file, a named preset, or the default preset.
pub fn resolve_layout(
    layout_file: Option<PathBuf>,
    preset: Option<String>,
) -> Result<LayoutDef, NcrbError> {
    match (layout_file, preset) {
        (Some(path), _) => ncrb_core::layout::load_layout(&path),
        (None, Some(name)) => builtin::load_preset(&name),
        (None, None) => builtin::load_preset(builtin::DEFAULT_PRESET),
    }
}

/// File name used as document identity (and for year detection).
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Load a file as a batch document, choosing the body by extension.
pub fn read_document(path: &Path) -> Result<Document, NcrbError> {
    let body = match extension(path).as_str() {
        "pdf" => DocumentBody::Pdf(std::fs::read(path)?),
        "txt" => DocumentBody::Text(std::fs::read_to_string(path)?),
        "xlsx" => DocumentBody::Workbook(std::fs::read(path)?),
        "json" => {
            let tables: Vec<WideTable> = serde_json::from_slice(&std::fs::read(path)?)?;
            DocumentBody::Wide(tables)
        }
        other => {
            return Err(NcrbError::UnsupportedInput(format!(
                "{}: unknown extension '{}' (expected pdf, txt, xlsx or json)",
                path.display(),
                other
            )))
        }
    };
    Ok(Document {
        source: source_name(path),
        body,
    })
}

/// Full text of a PDF or text file.
pub fn read_text(path: &Path, extractor: &dyn PdfExtractor) -> Result<String, NcrbError> {
    match extension(path).as_str() {
        "pdf" => {
            let bytes = std::fs::read(path)?;
            Ok(join_pages(&extractor.extract_pages(&bytes)?))
        }
        "txt" => Ok(std::fs::read_to_string(path)?),
        other => Err(NcrbError::UnsupportedInput(format!(
            "{}: unknown extension '{}' (expected pdf or txt)",
            path.display(),
            other
        ))),
    }
}

pub fn pdf_extractor(raw: bool) -> PdftotextExtractor {
    if raw {
        PdftotextExtractor::raw()
    } else {
        PdftotextExtractor::new()
    }
}

/// Warn once up front when PDFs are given but pdftotext cannot run.
pub fn warn_if_pdftotext_missing(paths: &[PathBuf]) {
    let has_pdf = paths.iter().any(|p| extension(p) == "pdf");
    if has_pdf && !PdftotextExtractor::is_available() {
        tracing::warn!("pdftotext not found, PDF inputs will be skipped");
        eprintln!("Warning: {}", NcrbError::PdftotextNotFound);
    }
}

/// Write `content` to `path`, or print it when no path is given.
pub fn emit(content: &str, path: Option<&Path>) -> Result<(), NcrbError> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}
