use serde::{Deserialize, Serialize};

use crate::model::DocumentTables;
use crate::normalize::DuplicateKey;
use crate::parsing::SkippedFragment;

pub const SUMMARY_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum DocumentStatus {
    /// At least one row was read.
    Extracted,
    /// Read without error, but no section yielded a row.
    Empty,
    /// Skipped at the document boundary.
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionOutcome {
    pub label: String,
    /// Whether this section's rows feed consolidation.
    pub consolidate: bool,
    pub found: bool,
    pub terminated: bool,
    pub rows: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFragment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub source: String,
    pub year: Option<i32>,
    #[serde(flatten)]
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<SectionOutcome>,
}

impl DocumentOutcome {
    pub fn failed(source: &str, year: Option<i32>, reason: impl Into<String>) -> Self {
        DocumentOutcome {
            source: source.to_string(),
            year,
            status: DocumentStatus::Failed {
                reason: reason.into(),
            },
            sections: Vec::new(),
        }
    }

    /// A document is `Empty` when no consolidated section produced a row.
    pub fn from_sections(source: &str, year: Option<i32>, sections: Vec<SectionOutcome>) -> Self {
        let status = if sections.iter().any(|s| s.consolidate && s.rows > 0) {
            DocumentStatus::Extracted
        } else {
            DocumentStatus::Empty
        };
        DocumentOutcome {
            source: source.to_string(),
            year,
            status,
            sections,
        }
    }

    pub fn rows(&self) -> usize {
        self.sections.iter().map(|s| s.rows).sum()
    }
}

impl From<&DocumentTables> for DocumentOutcome {
    fn from(doc: &DocumentTables) -> Self {
        let sections = doc
            .sections
            .iter()
            .map(|s| SectionOutcome {
                label: s.label.clone(),
                consolidate: s.consolidate,
                found: s.found,
                terminated: s.terminated,
                rows: s.rows.len(),
                skipped: s.skipped.clone(),
            })
            .collect();
        DocumentOutcome::from_sections(&doc.source, doc.year, sections)
    }
}

/// What a batch run did with each document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub summary_schema_version: String,
    pub documents: Vec<DocumentOutcome>,
    pub records: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub duplicates: Vec<DuplicateKey>,
    pub dropped_duplicates: usize,
}

impl Default for BatchSummary {
    fn default() -> Self {
        Self {
            summary_schema_version: SUMMARY_SCHEMA_VERSION.to_string(),
            documents: Vec::new(),
            records: 0,
            duplicates: Vec::new(),
            dropped_duplicates: 0,
        }
    }
}

impl BatchSummary {
    pub fn rows_extracted(&self) -> usize {
        self.documents.iter().map(DocumentOutcome::rows).sum()
    }

    pub fn fragments_skipped(&self) -> usize {
        self.documents
            .iter()
            .flat_map(|d| &d.sections)
            .map(|s| s.skipped.len())
            .sum()
    }

    pub fn documents_empty(&self) -> usize {
        self.count_status(|s| matches!(s, DocumentStatus::Empty))
    }

    pub fn documents_failed(&self) -> usize {
        self.count_status(|s| matches!(s, DocumentStatus::Failed { .. }))
    }

    /// Documents that contributed nothing, whether empty or failed.
    pub fn documents_without_rows(&self) -> usize {
        self.count_status(|s| !matches!(s, DocumentStatus::Extracted))
    }

    fn count_status(&self, pred: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.documents.iter().filter(|d| pred(&d.status)).count()
    }
}
