pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod parsing;
pub mod summary;

use error::NcrbError;
use extraction::section::locate_section;
use extraction::PdfExtractor;
use layout::schema::LayoutDef;
use model::{DocumentTables, LongRecord, SectionTable, WideTable};
use normalize::{consolidate, extract_year, DuplicatePolicy};
use summary::{BatchSummary, DocumentOutcome, SectionOutcome};

/// Extract one table per layout section from a document's full text.
///
/// Sections that are absent come back with `found == false` and no rows.
/// The year is read from `source`, the document's identity.
pub fn extract_text(source: &str, text: &str, layout: &LayoutDef) -> DocumentTables {
    let terminator = layout.terminator();
    let year = extract_year(source);

    let sections = layout
        .sections
        .iter()
        .map(|def| {
            let (found, terminated, scan) = match locate_section(text, &def.label, &terminator) {
                Some(section) => {
                    tracing::debug!(
                        source,
                        label = %def.label,
                        offset = section.offset,
                        terminated = section.terminated,
                        "section located"
                    );
                    (true, section.terminated, parsing::scan_rows(section.text))
                }
                None => {
                    tracing::debug!(source, label = %def.label, "section absent");
                    (false, false, parsing::RowScan::default())
                }
            };
            SectionTable {
                label: def.label.clone(),
                sheet: def.sheet.clone(),
                consolidate: def.consolidate,
                found,
                terminated,
                rows: scan.rows,
                skipped: scan.skipped,
            }
        })
        .collect();

    let doc = DocumentTables {
        source: source.to_string(),
        year,
        sections,
    };
    tracing::info!(source, year, rows = doc.row_count(), "extracted document");
    doc
}

/// Extract section tables from a PDF via the given text extraction backend.
pub fn extract_pdf(
    source: &str,
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    layout: &LayoutDef,
) -> Result<DocumentTables, NcrbError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    tracing::debug!(
        source,
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted text"
    );
    let text = extraction::join_pages(&pages);
    Ok(extract_text(source, &text, layout))
}

/// Read the wide sheet of every consolidated section from xlsx bytes.
///
/// A missing sheet fails the whole workbook.
pub fn read_workbook(
    source: &str,
    xlsx_bytes: &[u8],
    layout: &LayoutDef,
) -> Result<Vec<WideTable>, NcrbError> {
    let year = extract_year(source);
    layout
        .consolidated_sections()
        .map(|def| extraction::workbook::read_wide_sheet(xlsx_bytes, &def.sheet, source, year))
        .collect()
}

/// Raw content of one input document.
#[derive(Debug, Clone)]
pub enum DocumentBody {
    /// Already-extracted document text.
    Text(String),
    Pdf(Vec<u8>),
    /// An xlsx workbook holding wide sheets.
    Workbook(Vec<u8>),
    /// Wide tables produced earlier, e.g. by a previous extraction run.
    Wide(Vec<WideTable>),
}

#[derive(Debug, Clone)]
pub struct Document {
    /// Identity used in logs and for year detection, usually the file name.
    pub source: String,
    pub body: DocumentBody,
}

#[derive(Debug, Clone)]
pub struct BatchResult {
    pub records: Vec<LongRecord>,
    pub summary: BatchSummary,
}

/// Extract, reshape and merge a batch of documents into sorted long records.
///
/// Each document is handled on its own: one that fails is logged, recorded
/// in the summary and skipped. Fails only when no document produced a row,
/// or when `policy` is [`DuplicatePolicy::Error`] and duplicates exist.
pub fn process_batch(
    documents: &[Document],
    extractor: &dyn PdfExtractor,
    layout: &LayoutDef,
    policy: DuplicatePolicy,
) -> Result<BatchResult, NcrbError> {
    let mut summary = BatchSummary::default();
    let mut tables: Vec<WideTable> = Vec::new();

    for doc in documents {
        match load_document(doc, extractor, layout) {
            Ok((doc_tables, outcome)) => {
                tables.extend(doc_tables);
                summary.documents.push(outcome);
            }
            Err(e) => {
                tracing::warn!(source = %doc.source, error = %e, "skipping document");
                summary.documents.push(DocumentOutcome::failed(
                    &doc.source,
                    extract_year(&doc.source),
                    e.to_string(),
                ));
            }
        }
    }

    let merged = consolidate(&tables, policy).map_err(|e| match e {
        NcrbError::NoData { .. } => NcrbError::NoData {
            documents: documents.len(),
        },
        other => other,
    })?;

    summary.records = merged.records.len();
    summary.duplicates = merged.duplicates;
    summary.dropped_duplicates = merged.dropped_duplicates;

    if summary.documents_without_rows() > 0 {
        tracing::info!(
            count = summary.documents_without_rows(),
            "documents contributed no rows"
        );
    }

    Ok(BatchResult {
        records: merged.records,
        summary,
    })
}

fn load_document(
    doc: &Document,
    extractor: &dyn PdfExtractor,
    layout: &LayoutDef,
) -> Result<(Vec<WideTable>, DocumentOutcome), NcrbError> {
    match &doc.body {
        DocumentBody::Text(text) => {
            let tables = extract_text(&doc.source, text, layout);
            Ok((tables.wide_tables(), DocumentOutcome::from(&tables)))
        }
        DocumentBody::Pdf(bytes) => {
            let tables = extract_pdf(&doc.source, bytes, extractor, layout)?;
            Ok((tables.wide_tables(), DocumentOutcome::from(&tables)))
        }
        DocumentBody::Workbook(bytes) => {
            let tables = read_workbook(&doc.source, bytes, layout)?;
            let outcome = wide_outcome(&doc.source, extract_year(&doc.source), &tables);
            Ok((tables, outcome))
        }
        DocumentBody::Wide(tables) => {
            let year = tables.first().and_then(|t| t.year);
            let outcome = wide_outcome(&doc.source, year, tables);
            Ok((tables.clone(), outcome))
        }
    }
}

fn wide_outcome(source: &str, year: Option<i32>, tables: &[WideTable]) -> DocumentOutcome {
    let sections = tables
        .iter()
        .map(|t| SectionOutcome {
            label: t.section.clone(),
            consolidate: true,
            found: true,
            terminated: true,
            rows: t.rows.len(),
            skipped: Vec::new(),
        })
        .collect();
    DocumentOutcome::from_sections(source, year, sections)
}
