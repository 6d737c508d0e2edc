pub mod fields;

use crate::model::TableRow;
use fields::{is_entity_token, parse_count, parse_point_decimal, parse_serial, FieldMismatch, RowField};
use serde::{Deserialize, Serialize};

/// Run of tokens that could not start a row, kept for the skip report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFragment {
    pub text: String,
    /// Why the fragment's first token did not begin a valid row.
    pub mismatch: FieldMismatch,
}

/// Rows and skipped fragments from one section, in text order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowScan {
    pub rows: Vec<TableRow>,
    pub skipped: Vec<SkippedFragment>,
}

/// Parse well-formed rows out of a section, silently dropping the rest.
pub fn parse_rows(section_text: &str) -> impl Iterator<Item = TableRow> + '_ {
    RowScanner::new(section_text).filter_map(Result::ok)
}

/// Like [`parse_rows`] but keeps what was skipped and why.
pub fn scan_rows(section_text: &str) -> RowScan {
    let mut scan = RowScan::default();
    for outcome in RowScanner::new(section_text) {
        match outcome {
            Ok(row) => scan.rows.push(row),
            Err(fragment) => {
                tracing::debug!(fragment = %fragment.text, reason = %fragment.mismatch, "skipped fragment");
                scan.skipped.push(fragment);
            }
        }
    }
    scan
}

/// Lazily matches `serial NAME... count pct population rate` tuples over the
/// whitespace tokens of a section.
///
/// Line breaks carry no meaning: PDF text extraction often splits or merges
/// printed rows, so the scanner works on the token stream. When a row cannot
/// start at a token, the scanner moves on by one token, and every run of
/// tokens passed over this way is yielded as a [`SkippedFragment`].
pub struct RowScanner<'a> {
    tokens: Vec<&'a str>,
    pos: usize,
    pending: Option<TableRow>,
}

impl<'a> RowScanner<'a> {
    pub fn new(section_text: &'a str) -> Self {
        RowScanner {
            tokens: section_text.split_whitespace().collect(),
            pos: 0,
            pending: None,
        }
    }
}

impl Iterator for RowScanner<'_> {
    type Item = Result<TableRow, SkippedFragment>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(row) = self.pending.take() {
            return Some(Ok(row));
        }
        if self.pos >= self.tokens.len() {
            return None;
        }

        let start = self.pos;
        let first_mismatch = match match_row(&self.tokens[start..]) {
            Ok((row, consumed)) => {
                self.pos += consumed;
                return Some(Ok(row));
            }
            Err(mismatch) => mismatch,
        };

        self.pos += 1;
        while self.pos < self.tokens.len() {
            if let Ok((row, consumed)) = match_row(&self.tokens[self.pos..]) {
                let fragment = self.fragment(start, self.pos, first_mismatch);
                self.pos += consumed;
                self.pending = Some(row);
                return Some(Err(fragment));
            }
            self.pos += 1;
        }

        Some(Err(self.fragment(start, self.pos, first_mismatch)))
    }
}

impl RowScanner<'_> {
    fn fragment(&self, start: usize, end: usize, mismatch: FieldMismatch) -> SkippedFragment {
        SkippedFragment {
            text: self.tokens[start..end].join(" "),
            mismatch,
        }
    }
}

/// Try to read one row from the front of `tokens`, returning it with the
/// number of tokens it used.
fn match_row(tokens: &[&str]) -> Result<(TableRow, usize), FieldMismatch> {
    let serial = parse_serial(token_at(tokens, 0, RowField::Serial)?)?;

    let name_end = 1 + tokens[1..]
        .iter()
        .take_while(|t| is_entity_token(t))
        .count();
    if name_end == 1 {
        return Err(FieldMismatch::new(RowField::Entity, tokens.get(1).copied()));
    }
    let entity = tokens[1..name_end].join(" ");

    let num_suicides = parse_count(token_at(tokens, name_end, RowField::Count)?)?;
    let pct_share = parse_point_decimal(
        token_at(tokens, name_end + 1, RowField::PctShare)?,
        RowField::PctShare,
    )?;
    let population = parse_point_decimal(
        token_at(tokens, name_end + 2, RowField::Population)?,
        RowField::Population,
    )?;
    let rate = parse_point_decimal(token_at(tokens, name_end + 3, RowField::Rate)?, RowField::Rate)?;

    let row = TableRow {
        serial,
        entity,
        num_suicides,
        pct_share,
        population,
        rate,
    };
    Ok((row, name_end + 4))
}

fn token_at<'a>(tokens: &[&'a str], i: usize, field: RowField) -> Result<&'a str, FieldMismatch> {
    tokens
        .get(i)
        .copied()
        .ok_or_else(|| FieldMismatch::new(field, None))
}
