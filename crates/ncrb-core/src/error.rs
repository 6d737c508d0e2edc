use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum NcrbError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to read workbook: {0}")]
    Workbook(String),

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("invalid layout: {0}")]
    LayoutInvalid(String),

    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("no rows could be parsed from any of the {documents} input document(s)")]
    NoData { documents: usize },

    #[error("{count} duplicate (year, entity, category) record(s), first: {first}")]
    DuplicateRecords { count: usize, first: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
