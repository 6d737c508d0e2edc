use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NcrbError;
use crate::model::{Category, LongRecord, WideTable};
use crate::normalize::normalize_row;

/// What to do when several inputs report the same (year, entity, category).
///
/// Reports are revised between vintages, so a repeat can be a legitimate
/// correction or an accidental double load. The default keeps everything and
/// lists the repeats in [`Consolidated::duplicates`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    #[default]
    Keep,
    /// Keep the occurrence from the earliest input, drop the rest.
    KeepFirst,
    /// Fail consolidation.
    Error,
}

impl FromStr for DuplicatePolicy {
    type Err = NcrbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "keep" => Ok(DuplicatePolicy::Keep),
            "keep_first" => Ok(DuplicatePolicy::KeepFirst),
            "error" => Ok(DuplicatePolicy::Error),
            other => Err(NcrbError::LayoutInvalid(format!(
                "unknown duplicate policy '{other}' (expected keep, keep-first or error)"
            ))),
        }
    }
}

/// A (year, entity, category) key seen more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateKey {
    pub year: Option<i32>,
    pub entity: String,
    pub category: Category,
    pub occurrences: usize,
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(y) => write!(f, "{y}")?,
            None => write!(f, "unknown year")?,
        }
        write!(f, " / {} / {:?} ({}x)", self.entity, self.category, self.occurrences)
    }
}

/// Sorted long records merged from every input table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consolidated {
    pub records: Vec<LongRecord>,
    pub duplicates: Vec<DuplicateKey>,
    /// Records removed under [`DuplicatePolicy::KeepFirst`].
    pub dropped_duplicates: usize,
}

/// Reshape every row of every table and merge into one ordered sequence.
///
/// Records are ordered by year (unknown years last), then entity, then
/// category, then value. Equal values written with different scales
/// (`15.8`, `15.80`) are ordered by scale, so the result is independent of
/// input order down to its serialized form.
/// Fails with [`NcrbError::NoData`] only if no table has any row.
pub fn consolidate(
    tables: &[WideTable],
    policy: DuplicatePolicy,
) -> Result<Consolidated, NcrbError> {
    let mut sources: Vec<&str> = Vec::new();
    let mut productive: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();

    for table in tables {
        if !sources.contains(&table.source.as_str()) {
            sources.push(&table.source);
        }
        if !table.rows.is_empty() {
            productive.insert(&table.source);
        }
        for row in &table.rows {
            records.extend(normalize_row(row, table.year));
        }
    }

    if records.is_empty() {
        return Err(NcrbError::NoData {
            documents: sources.len(),
        });
    }

    let empty = sources.iter().filter(|s| !productive.contains(*s)).count();

    let duplicates = find_duplicates(&records);
    let mut dropped_duplicates = 0;

    match policy {
        DuplicatePolicy::Keep => {}
        DuplicatePolicy::KeepFirst => {
            let before = records.len();
            let mut seen = HashSet::new();
            records.retain(|r| seen.insert((r.year, r.entity.clone(), r.category)));
            dropped_duplicates = before - records.len();
        }
        DuplicatePolicy::Error => {
            if let Some(first) = duplicates.first() {
                return Err(NcrbError::DuplicateRecords {
                    count: duplicates.len(),
                    first: first.to_string(),
                });
            }
        }
    }

    records.sort_by(compare_records);

    tracing::info!(
        records = records.len(),
        documents = sources.len(),
        empty,
        duplicates = duplicates.len(),
        "consolidated"
    );

    Ok(Consolidated {
        records,
        duplicates,
        dropped_duplicates,
    })
}

fn find_duplicates(records: &[LongRecord]) -> Vec<DuplicateKey> {
    let mut counts: BTreeMap<(Option<i32>, &str, Category), usize> = BTreeMap::new();
    for r in records {
        *counts.entry((r.year, r.entity.as_str(), r.category)).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|((year, entity, category), occurrences)| DuplicateKey {
            year,
            entity: entity.to_string(),
            category,
            occurrences,
        })
        .collect()
}

fn compare_records(a: &LongRecord, b: &LongRecord) -> Ordering {
    compare_years(a.year, b.year)
        .then_with(|| a.entity.cmp(&b.entity))
        .then_with(|| a.category.cmp(&b.category))
        .then_with(|| a.value.cmp(&b.value))
        .then_with(|| a.value.map(|v| v.scale()).cmp(&b.value.map(|v| v.scale())))
}

/// Ascending, with unknown years after every known year.
fn compare_years(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WideRecord;
    use rust_decimal::Decimal;

    fn row(entity: &str, count: i64) -> WideRecord {
        WideRecord {
            year: None,
            entity: entity.into(),
            sl_no: Some(1),
            num_suicides: Some(Decimal::from(count)),
            pct_share: Some(Decimal::new(150, 2)),
            population: Some(Decimal::new(10000, 2)),
            rate: Some(Decimal::new(30, 1)),
        }
    }

    fn table(source: &str, year: Option<i32>, rows: Vec<WideRecord>) -> WideTable {
        WideTable::new(source, "States", year, rows)
    }

    #[test]
    fn test_two_documents_sorted_by_year() {
        let tables = vec![
            table("adsi_2022.pdf", Some(2022), vec![row("Goa", 1), row("Bihar", 2)]),
            table("adsi_2021.pdf", Some(2021), vec![row("Kerala", 3), row("Assam", 4)]),
        ];
        let out = consolidate(&tables, DuplicatePolicy::Keep).unwrap();
        assert_eq!(out.records.len(), 16);
        assert!(out.records[..8].iter().all(|r| r.year == Some(2021)));
        assert!(out.records[8..].iter().all(|r| r.year == Some(2022)));
        assert_eq!(out.records[0].entity, "Assam");
        assert_eq!(out.records[4].entity, "Kerala");
        assert_eq!(out.records[8].entity, "Bihar");
        assert_eq!(out.records[0].category, Category::NumSuicides);
        assert_eq!(out.records[3].category, Category::Rate);
    }

    #[test]
    fn test_unknown_year_sorts_last() {
        let tables = vec![
            table("undated.pdf", None, vec![row("Assam", 1)]),
            table("adsi_2019.pdf", Some(2019), vec![row("Tripura", 2)]),
        ];
        let out = consolidate(&tables, DuplicatePolicy::Keep).unwrap();
        assert_eq!(out.records[0].year, Some(2019));
        assert_eq!(out.records[7].year, None);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let a = table("a_2020.pdf", Some(2020), vec![row("Goa", 1), row("Bihar", 2)]);
        let b = table("b_2020.pdf", Some(2020), vec![row("Goa", 7)]);
        let first = consolidate(&[a.clone(), b.clone()], DuplicatePolicy::Keep).unwrap();
        let second = consolidate(&[b, a], DuplicatePolicy::Keep).unwrap();
        assert_eq!(first.records, second.records);
    }

    #[test]
    fn test_duplicates_kept_and_reported() {
        let tables = vec![
            table("a_2020.pdf", Some(2020), vec![row("Goa", 1)]),
            table("b_2020.xlsx", Some(2020), vec![row("GOA", 2)]),
        ];
        let out = consolidate(&tables, DuplicatePolicy::Keep).unwrap();
        assert_eq!(out.records.len(), 8);
        assert_eq!(out.duplicates.len(), 4);
        assert_eq!(out.duplicates[0].entity, "Goa");
        assert_eq!(out.duplicates[0].occurrences, 2);
        assert_eq!(out.dropped_duplicates, 0);
    }

    #[test]
    fn test_keep_first_drops_later_inputs() {
        let tables = vec![
            table("a_2020.pdf", Some(2020), vec![row("Goa", 1)]),
            table("b_2020.pdf", Some(2020), vec![row("Goa", 2)]),
        ];
        let out = consolidate(&tables, DuplicatePolicy::KeepFirst).unwrap();
        assert_eq!(out.records.len(), 4);
        assert_eq!(out.records[0].value, Some(Decimal::from(1)));
        assert_eq!(out.dropped_duplicates, 4);
    }

    #[test]
    fn test_error_policy_fails_on_duplicates() {
        let tables = vec![
            table("a_2020.pdf", Some(2020), vec![row("Goa", 1)]),
            table("b_2020.pdf", Some(2020), vec![row("Goa", 2)]),
        ];
        let err = consolidate(&tables, DuplicatePolicy::Error).unwrap_err();
        assert!(matches!(err, NcrbError::DuplicateRecords { count: 4, .. }));
    }

    #[test]
    fn test_empty_table_does_not_block_others() {
        let tables = vec![
            table("empty_2020.pdf", Some(2020), vec![]),
            table("full_2021.pdf", Some(2021), vec![row("Goa", 1)]),
        ];
        let out = consolidate(&tables, DuplicatePolicy::Keep).unwrap();
        assert_eq!(out.records.len(), 4);
        assert!(out.records.iter().all(|r| r.year == Some(2021)));
    }

    #[test]
    fn test_equal_values_with_different_scales_serialize_identically() {
        let mut printed = row("Goa", 297);
        printed.population = Some(Decimal::new(1580, 2));
        let mut typed = row("GOA", 297);
        typed.population = Some(Decimal::new(158, 1));

        let pdf = table("adsi_2021.pdf", Some(2021), vec![printed]);
        let xlsx = table("adsi_2021.xlsx", Some(2021), vec![typed]);

        let first = consolidate(&[pdf.clone(), xlsx.clone()], DuplicatePolicy::Keep).unwrap();
        let second = consolidate(&[xlsx, pdf], DuplicatePolicy::Keep).unwrap();

        let population: Vec<String> = first
            .records
            .iter()
            .filter(|r| r.category == Category::Population)
            .filter_map(|r| r.value.map(|v| v.to_string()))
            .collect();
        assert_eq!(population, vec!["15.8", "15.80"]);
        assert_eq!(
            serde_json::to_string(&first.records).unwrap(),
            serde_json::to_string(&second.records).unwrap()
        );
    }

    #[test]
    fn test_no_rows_anywhere_is_no_data() {
        let tables = vec![table("a.pdf", None, vec![]), table("b.pdf", None, vec![])];
        let err = consolidate(&tables, DuplicatePolicy::Keep).unwrap_err();
        assert!(matches!(err, NcrbError::NoData { documents: 2 }));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("keep".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Keep);
        assert_eq!(
            "keep-first".parse::<DuplicatePolicy>().unwrap(),
            DuplicatePolicy::KeepFirst
        );
        assert_eq!("ERROR".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Error);
        assert!("merge".parse::<DuplicatePolicy>().is_err());
    }
}
