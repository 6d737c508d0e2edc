use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Positions of the six fields in a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    Serial,
    Entity,
    Count,
    PctShare,
    Population,
    Rate,
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowField::Serial => write!(f, "serial number"),
            RowField::Entity => write!(f, "entity name"),
            RowField::Count => write!(f, "number of suicides"),
            RowField::PctShare => write!(f, "percentage share"),
            RowField::Population => write!(f, "population"),
            RowField::Rate => write!(f, "rate"),
        }
    }
}

/// Why a token could not fill a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMismatch {
    pub field: RowField,
    /// The offending token, or `None` when the text ran out.
    pub found: Option<String>,
}

impl FieldMismatch {
    pub fn new(field: RowField, found: Option<&str>) -> Self {
        FieldMismatch {
            field,
            found: found.map(str::to_string),
        }
    }
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.found {
            Some(token) => write!(f, "expected {}, found '{}'", self.field, token),
            None => write!(f, "expected {}, found end of section", self.field),
        }
    }
}

/// A positive integer made of ASCII digits only.
pub fn parse_serial(token: &str) -> Result<u32, FieldMismatch> {
    if !is_digits(token) {
        return Err(FieldMismatch::new(RowField::Serial, Some(token)));
    }
    match token.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(FieldMismatch::new(RowField::Serial, Some(token))),
    }
}

/// One word of an entity name: uppercase letters, `&`, parentheses,
/// apostrophes and hyphens.
pub fn is_entity_token(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_uppercase() || matches!(c, '&' | '(' | ')' | '\'' | '-'))
}

/// A plain non-negative integer count.
pub fn parse_count(token: &str) -> Result<u64, FieldMismatch> {
    if !is_digits(token) {
        return Err(FieldMismatch::new(RowField::Count, Some(token)));
    }
    token
        .parse()
        .map_err(|_| FieldMismatch::new(RowField::Count, Some(token)))
}

/// A decimal with digits on both sides of a single point, e.g. `890.12`.
pub fn parse_point_decimal(token: &str, field: RowField) -> Result<Decimal, FieldMismatch> {
    let well_formed = match token.split_once('.') {
        Some((whole, frac)) => is_digits(whole) && is_digits(frac),
        None => false,
    };
    if !well_formed {
        return Err(FieldMismatch::new(field, Some(token)));
    }
    Decimal::from_str(token).map_err(|_| FieldMismatch::new(field, Some(token)))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
