use serde::{Deserialize, Serialize};

use crate::extraction::section::Terminator;
use crate::normalize::DuplicatePolicy;

/// Where the tables sit in a family of reports and how to merge them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Marker that closes every section, e.g. "TOTAL".
    #[serde(default = "default_terminator")]
    pub terminator: String,
    /// Sections in the order they appear in a report.
    pub sections: Vec<SectionDef>,
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

impl LayoutDef {
    pub fn terminator(&self) -> Terminator {
        Terminator::new(self.terminator.clone())
    }

    /// Sections whose rows feed the long-format dataset.
    pub fn consolidated_sections(&self) -> impl Iterator<Item = &SectionDef> {
        self.sections.iter().filter(|s| s.consolidate)
    }
}

/// One labeled table within a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionDef {
    /// Exact, case-sensitive header text that opens the section.
    pub label: String,
    /// Worksheet holding this section's wide table.
    pub sheet: String,
    #[serde(default = "default_consolidate")]
    pub consolidate: bool,
}

fn default_terminator() -> String {
    Terminator::TOTAL.to_string()
}

fn default_consolidate() -> bool {
    true
}
