use ncrb_core::model::{DocumentTables, LongRecord};
use ncrb_core::summary::{BatchSummary, DocumentStatus};

pub fn format_documents(documents: &[DocumentTables]) -> String {
    let mut out = String::new();

    for (i, doc) in documents.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let year = doc
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "unknown year".into());
        out.push_str(&format!("=== {} ({}) ===\n", doc.source, year));

        for section in &doc.sections {
            if !section.found {
                out.push_str(&format!("\n  {}  not found\n", section.label));
                continue;
            }
            let marker = if section.consolidate { "" } else { " (not consolidated)" };
            out.push_str(&format!(
                "\n  {}  {} row(s){}\n",
                section.label,
                section.rows.len(),
                marker
            ));
            if !section.terminated {
                out.push_str("  no terminator found, read to end of document\n");
            }
            if section.rows.is_empty() {
                continue;
            }

            let max_name = section
                .rows
                .iter()
                .map(|r| r.entity.len())
                .max()
                .unwrap_or(10)
                .max(8);
            out.push_str(&format!(
                "  {:>4}  {:<width$}  {:>10}  {:>8}  {:>12}  {:>8}\n",
                "#",
                "State/UT",
                "Suicides",
                "Share %",
                "Population",
                "Rate",
                width = max_name
            ));
            for row in &section.rows {
                out.push_str(&format!(
                    "  {:>4}  {:<width$}  {:>10}  {:>8}  {:>12}  {:>8}\n",
                    row.serial,
                    row.entity,
                    row.num_suicides,
                    row.pct_share,
                    row.population,
                    row.rate,
                    width = max_name
                ));
            }
            if !section.skipped.is_empty() {
                out.push_str(&format!(
                    "  {} fragment(s) skipped\n",
                    section.skipped.len()
                ));
            }
        }
    }

    out
}

pub fn format_records(records: &[LongRecord]) -> String {
    let max_entity = records
        .iter()
        .map(|r| r.entity.len())
        .max()
        .unwrap_or(10)
        .max(6);

    let mut out = format!(
        "{:<4}  {:<width$}  {:<30}  {:>12}  {}\n",
        "Year",
        "Entity",
        "Category",
        "Value",
        "Unit",
        width = max_entity
    );
    for r in records {
        let year = r.year.map(|y| y.to_string()).unwrap_or_else(|| "-".into());
        let value = r.value.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "{:<4}  {:<width$}  {:<30}  {:>12}  {}\n",
            year,
            r.entity,
            r.category.to_string(),
            value,
            r.unit,
            width = max_entity
        ));
    }
    out
}

pub fn format_raw_rows(rows: &[Vec<&str>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|cell| cell.len())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }
    out
}

/// Batch report on stderr, so stdout stays clean for the dataset.
pub fn print_summary(summary: &BatchSummary) {
    eprintln!(
        "\n{} document(s), {} row(s) extracted, {} record(s) written",
        summary.documents.len(),
        summary.rows_extracted(),
        summary.records
    );

    let skipped = summary.fragments_skipped();
    if skipped > 0 {
        eprintln!("  {skipped} unparseable fragment(s) skipped");
    }

    if summary.documents_empty() > 0 {
        eprintln!("  {} document(s) without rows:", summary.documents_empty());
        for doc in &summary.documents {
            if doc.status == DocumentStatus::Empty {
                eprintln!("    {}", doc.source);
            }
        }
    }

    if summary.documents_failed() > 0 {
        eprintln!("  {} document(s) failed:", summary.documents_failed());
        for doc in &summary.documents {
            if let DocumentStatus::Failed { ref reason } = doc.status {
                eprintln!("    {}: {}", doc.source, reason);
            }
        }
    }

    if !summary.duplicates.is_empty() {
        eprintln!(
            "  {} duplicate key(s) across inputs:",
            summary.duplicates.len()
        );
        for key in summary.duplicates.iter().take(10) {
            eprintln!("    {key}");
        }
        if summary.duplicates.len() > 10 {
            eprintln!("    ... and {} more", summary.duplicates.len() - 10);
        }
    }
    if summary.dropped_duplicates > 0 {
        eprintln!(
            "  {} duplicate record(s) dropped",
            summary.dropped_duplicates
        );
    }
}
