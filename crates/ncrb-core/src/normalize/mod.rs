pub mod consolidate;

use crate::model::{Category, LongRecord, WideRecord};
use rust_decimal::Decimal;
use std::str::FromStr;

pub use consolidate::{consolidate, Consolidated, DuplicateKey, DuplicatePolicy};

/// Title-case an entity name.
///
/// A letter is uppercased when the character before it is not a letter and
/// lowercased otherwise, so `"JAMMU & KASHMIR"` and `"jammu & kashmir"` both
/// become `"Jammu & Kashmir"`. Applying it twice changes nothing.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_cased = false;
    for c in raw.trim().chars() {
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}

/// Read a number, or `None` if the text is not one.
///
/// Blank and non-numeric text are both `None`; a missing value is never
/// turned into zero.
pub fn coerce_number(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Find the report year in a document identity such as a file name.
///
/// Takes the first run of exactly four digits within 1900..=2099. Letters,
/// underscores and punctuation around the run are fine; longer digit runs
/// are not years.
pub fn extract_year(identity: &str) -> Option<i32> {
    let bytes = identity.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i - start == 4 {
            if let Ok(year) = identity[start..i].parse::<i32>() {
                if (1900..=2099).contains(&year) {
                    return Some(year);
                }
            }
        }
    }
    None
}

/// Reshape one wide row into its four long records, one per category.
pub fn normalize_row(row: &WideRecord, year: Option<i32>) -> [LongRecord; 4] {
    let entity = title_case(&row.entity);
    Category::ALL.map(|category| LongRecord {
        year,
        entity: entity.clone(),
        category,
        value: row.metric(category),
        unit: category.unit().to_string(),
        note: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn wide(entity: &str) -> WideRecord {
        WideRecord {
            year: None,
            entity: entity.into(),
            sl_no: Some(1),
            num_suicides: Some(dec!(1234)),
            pct_share: Some(dec!(5.67)),
            population: Some(dec!(890.12)),
            rate: Some(dec!(3.45)),
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ANDHRA PRADESH"), "Andhra Pradesh");
        assert_eq!(title_case("jammu & kashmir"), "Jammu & Kashmir");
        assert_eq!(title_case("A & N ISLANDS"), "A & N Islands");
        assert_eq!(title_case("D&N HAVELI"), "D&N Haveli");
        assert_eq!(title_case("  delhi (ut) "), "Delhi (Ut)");
    }

    #[test]
    fn test_title_case_idempotent() {
        let once = title_case("DADRA & NAGAR HAVELI AND DAMAN & DIU");
        assert_eq!(title_case(&once), once);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("1234"), Some(dec!(1234)));
        assert_eq!(coerce_number(" 5.67 "), Some(dec!(5.67)));
        assert_eq!(coerce_number("0"), Some(dec!(0)));
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("   "), None);
        assert_eq!(coerce_number("N.A."), None);
        assert_eq!(coerce_number("abc"), None);
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("ADSI 2022 Table 2.1.pdf"), Some(2022));
        assert_eq!(extract_year("Table_2.1_2019.xlsx"), Some(2019));
        assert_eq!(extract_year("adsi-1999"), Some(1999));
        assert_eq!(extract_year("table_2.1.pdf"), None);
        assert_eq!(extract_year("report_12022.pdf"), None);
        assert_eq!(extract_year("report_2150.pdf"), None);
        assert_eq!(extract_year("1850_then_2003"), Some(2003));
    }

    #[test]
    fn test_normalize_row_four_records() {
        let records = normalize_row(&wide("ANDHRA PRADESH"), Some(2022));
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0],
            LongRecord {
                year: Some(2022),
                entity: "Andhra Pradesh".into(),
                category: Category::NumSuicides,
                value: Some(dec!(1234)),
                unit: "Value in Absolute number".into(),
                note: None,
            }
        );
        assert_eq!(records[1].value, Some(dec!(5.67)));
        assert_eq!(records[1].unit, "Value in Percentage");
        assert_eq!(records[2].value, Some(dec!(890.12)));
        assert_eq!(records[2].unit, "Value in Lakh");
        assert_eq!(records[3].value, Some(dec!(3.45)));
        assert_eq!(records[3].unit, "Value in Ratio");
        assert!(records.iter().all(|r| r.entity == "Andhra Pradesh" && r.year == Some(2022)));
    }

    #[test]
    fn test_normalize_row_keeps_nulls() {
        let mut row = wide("GOA");
        row.pct_share = coerce_number("");
        row.rate = coerce_number("--");
        let records = normalize_row(&row, None);
        assert_eq!(records[1].value, None);
        assert_eq!(records[3].value, None);
        assert_eq!(records[0].value, Some(dec!(1234)));
        assert!(records.iter().all(|r| r.year.is_none()));
    }
}
