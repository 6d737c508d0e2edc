use ncrb_core::error::NcrbError;
use ncrb_core::layout::builtin;
use ncrb_core::layout::schema::LayoutDef;
use ncrb_core::model::Category;
use ncrb_core::normalize::DuplicatePolicy;
use std::collections::HashSet;
use std::path::Path;

pub fn list() -> Result<(), NcrbError> {
    println!("Available predefined layouts:\n");
    for name in builtin::PRESETS {
        let layout = builtin::load_preset(name)?;
        let default_marker = if *name == builtin::DEFAULT_PRESET {
            " [default]"
        } else {
            ""
        };
        println!(
            "  {:<10} {} (v{}){}",
            name, layout.name, layout.version, default_marker
        );
        if let Some(ref desc) = layout.description {
            println!("             {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(preset: &str) -> Result<(), NcrbError> {
    let layout = builtin::load_preset(preset)?;
    print_layout(&layout);
    Ok(())
}

fn print_layout(layout: &LayoutDef) {
    println!("{} (version {})\n", layout.name, layout.version);

    if let Some(ref desc) = layout.description {
        println!("{}\n", desc);
    }

    println!(
        "Each document is searched for {} section(s). A section starts at its",
        layout.sections.len()
    );
    println!(
        "label and ends before the first '{}' that follows it:\n",
        layout.terminator
    );

    let max_label = layout
        .sections
        .iter()
        .map(|s| s.label.len())
        .max()
        .unwrap_or(10);

    println!(
        "  {:<width$}  {:<20}  Consolidated",
        "Label",
        "Sheet",
        width = max_label
    );
    println!("  {}", "-".repeat(max_label + 2 + 20 + 2 + 12));
    for section in &layout.sections {
        println!(
            "  {:<width$}  {:<20}  {}",
            section.label,
            section.sheet,
            if section.consolidate { "yes" } else { "no" },
            width = max_label
        );
    }
    println!();

    println!("Every consolidated row becomes one record per category:\n");
    for category in Category::ALL {
        println!("  {:<32} {}", category.to_string(), category.unit());
    }
    println!();

    let duplicates = match layout.duplicates {
        DuplicatePolicy::Keep => "kept, and listed in the summary",
        DuplicatePolicy::KeepFirst => "dropped after the first input that reports them",
        DuplicatePolicy::Error => "treated as an error",
    };
    println!("Repeated (year, entity, category) records are {duplicates}.\n");
}

pub fn validate(file: &Path) -> Result<(), NcrbError> {
    let layout = ncrb_core::layout::load_layout(file)?;

    println!("Layout '{}' (v{}) is valid.", layout.name, layout.version);
    println!(
        "  Sections: {}",
        layout
            .sections
            .iter()
            .map(|s| s.label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Terminator: {}", layout.terminator);

    // Check for potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    let mut sheets = HashSet::new();
    for section in &layout.sections {
        if !sheets.insert(section.sheet.as_str()) {
            warnings.push(format!(
                "sheet '{}' is used by more than one section",
                section.sheet
            ));
        }
        if section.label != section.label.trim() {
            warnings.push(format!(
                "label '{}' has leading or trailing whitespace and must match exactly",
                section.label
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
