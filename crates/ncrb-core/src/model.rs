use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::parsing::SkippedFragment;

/// One entity's figures as printed in a report section.
///
/// Only produced when all six fields were present and well-typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub serial: u32,
    pub entity: String,
    pub num_suicides: u64,
    pub pct_share: Decimal,
    pub population: Decimal,
    pub rate: Decimal,
}

/// A wide row: one entity, one column per metric.
///
/// `entity` is title-cased. Numeric fields are `None` when the source
/// value could not be read as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WideRecord {
    pub year: Option<i32>,
    pub entity: String,
    pub sl_no: Option<u32>,
    pub num_suicides: Option<Decimal>,
    pub pct_share: Option<Decimal>,
    pub population: Option<Decimal>,
    pub rate: Option<Decimal>,
}

impl WideRecord {
    pub fn from_table_row(row: &TableRow, year: Option<i32>) -> WideRecord {
        WideRecord {
            year,
            entity: crate::normalize::title_case(&row.entity),
            sl_no: Some(row.serial),
            num_suicides: Some(Decimal::from(row.num_suicides)),
            pct_share: Some(row.pct_share),
            population: Some(row.population),
            rate: Some(row.rate),
        }
    }

    /// The value this row carries for `category`.
    pub fn metric(&self, category: Category) -> Option<Decimal> {
        match category {
            Category::NumSuicides => self.num_suicides,
            Category::PctShare => self.pct_share,
            Category::Population => self.population,
            Category::Rate => self.rate,
        }
    }
}

/// All wide rows from one section of one source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WideTable {
    /// Document identity, usually the file name.
    pub source: String,
    /// Section label or sheet name the rows came from.
    pub section: String,
    pub year: Option<i32>,
    pub rows: Vec<WideRecord>,
}

impl WideTable {
    /// Build a table, stamping `year` onto every row.
    pub fn new(
        source: impl Into<String>,
        section: impl Into<String>,
        year: Option<i32>,
        mut rows: Vec<WideRecord>,
    ) -> WideTable {
        for row in &mut rows {
            row.year = year;
        }
        WideTable {
            source: source.into(),
            section: section.into(),
            year,
            rows,
        }
    }
}

/// Rows read from one layout section of a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionTable {
    pub label: String,
    pub sheet: String,
    pub consolidate: bool,
    /// False when the label does not occur in the document.
    pub found: bool,
    pub terminated: bool,
    pub rows: Vec<TableRow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedFragment>,
}

/// Everything extracted from one document, one table per layout section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTables {
    pub source: String,
    pub year: Option<i32>,
    pub sections: Vec<SectionTable>,
}

impl DocumentTables {
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }

    /// Wide tables for the sections that feed consolidation.
    pub fn wide_tables(&self) -> Vec<WideTable> {
        self.sections
            .iter()
            .filter(|s| s.consolidate)
            .map(|s| {
                let rows = s
                    .rows
                    .iter()
                    .map(|r| WideRecord::from_table_row(r, self.year))
                    .collect();
                WideTable::new(&self.source, &s.sheet, self.year, rows)
            })
            .collect()
    }
}

/// The four statistics reported per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    NumSuicides,
    PctShare,
    Population,
    Rate,
}

impl Category {
    /// Declaration order, which is also the output order within an entity.
    pub const ALL: [Category; 4] = [
        Category::NumSuicides,
        Category::PctShare,
        Category::Population,
        Category::Rate,
    ];

    pub fn unit(self) -> &'static str {
        match self {
            Category::NumSuicides => "Value in Absolute number",
            Category::PctShare => "Value in Percentage",
            Category::Population => "Value in Lakh",
            Category::Rate => "Value in Ratio",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::NumSuicides => write!(f, "Number of Suicides"),
            Category::PctShare => write!(f, "Percentage Share in Total"),
            Category::Population => write!(f, "Projected Mid Year Population"),
            Category::Rate => write!(f, "Rate of Suicides"),
        }
    }
}

/// Canonical long-format output unit: one (entity, category) observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongRecord {
    pub year: Option<i32>,
    pub entity: String,
    pub category: Category,
    pub value: Option<Decimal>,
    pub unit: String,
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn units_match_categories() {
        assert_eq!(Category::NumSuicides.unit(), "Value in Absolute number");
        assert_eq!(Category::PctShare.unit(), "Value in Percentage");
        assert_eq!(Category::Population.unit(), "Value in Lakh");
        assert_eq!(Category::Rate.unit(), "Value in Ratio");
    }

    #[test]
    fn wide_from_table_row_title_cases_entity() {
        let row = TableRow {
            serial: 3,
            entity: "JAMMU & KASHMIR".into(),
            num_suicides: 310,
            pct_share: dec!(0.19),
            population: dec!(135.44),
            rate: dec!(2.29),
        };
        let wide = WideRecord::from_table_row(&row, Some(2021));
        assert_eq!(wide.entity, "Jammu & Kashmir");
        assert_eq!(wide.sl_no, Some(3));
        assert_eq!(wide.metric(Category::NumSuicides), Some(dec!(310)));
        assert_eq!(wide.metric(Category::Rate), Some(dec!(2.29)));
    }

    #[test]
    fn document_wide_tables_skip_unconsolidated_sections() {
        let row = TableRow {
            serial: 1,
            entity: "GOA".into(),
            num_suicides: 297,
            pct_share: dec!(0.18),
            population: dec!(15.80),
            rate: dec!(18.80),
        };
        let section = |label: &str, sheet: &str, consolidate: bool| SectionTable {
            label: label.into(),
            sheet: sheet.into(),
            consolidate,
            found: true,
            terminated: true,
            rows: vec![row.clone()],
            skipped: vec![],
        };
        let doc = DocumentTables {
            source: "adsi_2021.pdf".into(),
            year: Some(2021),
            sections: vec![
                section("STATES:", "States", true),
                section("UNION TERRITORIES:", "Union Territories", false),
            ],
        };
        assert_eq!(doc.row_count(), 2);
        let tables = doc.wide_tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].section, "States");
        assert_eq!(tables[0].rows[0].entity, "Goa");
        assert_eq!(tables[0].rows[0].year, Some(2021));
    }

    #[test]
    fn wide_table_stamps_year() {
        let row = WideRecord {
            year: Some(1999),
            entity: "Goa".into(),
            sl_no: Some(1),
            num_suicides: None,
            pct_share: None,
            population: None,
            rate: None,
        };
        let table = WideTable::new("adsi_2020.pdf", "STATES:", None, vec![row]);
        assert_eq!(table.rows[0].year, None);
    }
}
