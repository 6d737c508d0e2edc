pub mod builtin;
pub mod schema;

use crate::error::NcrbError;
use schema::LayoutDef;
use std::collections::HashSet;
use std::path::Path;

/// Load a layout from a JSON file.
pub fn load_layout(path: &Path) -> Result<LayoutDef, NcrbError> {
    let content = std::fs::read_to_string(path).map_err(|e| NcrbError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layout(&content, path)
}

/// Parse a layout from a JSON string.
pub fn parse_layout(json: &str, source: &Path) -> Result<LayoutDef, NcrbError> {
    let layout: LayoutDef = serde_json::from_str(json).map_err(|e| NcrbError::LayoutLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Parse a layout from a JSON string (no file path context).
pub fn parse_layout_str(json: &str) -> Result<LayoutDef, NcrbError> {
    let layout: LayoutDef = serde_json::from_str(json).map_err(NcrbError::Json)?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Validate that a layout is well-formed.
pub fn validate_layout(layout: &LayoutDef) -> Result<(), NcrbError> {
    if layout.terminator.trim().is_empty() {
        return Err(NcrbError::LayoutInvalid(
            "terminator must not be empty".into(),
        ));
    }

    if layout.sections.is_empty() {
        return Err(NcrbError::LayoutInvalid(
            "sections must not be empty".into(),
        ));
    }

    let mut labels = HashSet::new();
    for section in &layout.sections {
        if section.label.trim().is_empty() {
            return Err(NcrbError::LayoutInvalid(
                "section label must not be empty".into(),
            ));
        }

        if !labels.insert(section.label.as_str()) {
            return Err(NcrbError::LayoutInvalid(format!(
                "section label '{}' appears more than once",
                section.label
            )));
        }

        if section.sheet.trim().is_empty() {
            return Err(NcrbError::LayoutInvalid(format!(
                "section '{}' has no sheet name",
                section.label
            )));
        }
    }

    if layout.consolidated_sections().next().is_none() {
        return Err(NcrbError::LayoutInvalid(
            "at least one section must have consolidate = true".into(),
        ));
    }

    Ok(())
}
