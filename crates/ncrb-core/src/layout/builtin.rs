use crate::error::NcrbError;
use crate::layout::schema::LayoutDef;

const NCRB_ADSI_JSON: &str = include_str!("../../../../layouts/ncrb-adsi.json");

/// Available predefined layouts.
pub const PRESETS: &[&str] = &["ncrb-adsi"];

/// The layout used when none is given.
pub const DEFAULT_PRESET: &str = "ncrb-adsi";

/// Load a predefined layout by name.
pub fn load_preset(name: &str) -> Result<LayoutDef, NcrbError> {
    match name {
        "ncrb-adsi" => {
            let layout: LayoutDef = serde_json::from_str(NCRB_ADSI_JSON)?;
            Ok(layout)
        }
        _ => Err(NcrbError::LayoutInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::validate_layout;
    use crate::normalize::DuplicatePolicy;

    #[test]
    fn test_load_ncrb_preset() {
        let layout = load_preset("ncrb-adsi").unwrap();
        assert_eq!(layout.terminator, "TOTAL");
        assert_eq!(layout.sections.len(), 2);
        assert_eq!(layout.sections[0].label, "STATES:");
        assert_eq!(layout.sections[0].sheet, "States");
        assert!(layout.sections[0].consolidate);
        assert!(!layout.sections[1].consolidate);
        assert_eq!(layout.duplicates, DuplicatePolicy::Keep);
    }

    #[test]
    fn test_every_preset_validates() {
        for name in PRESETS {
            validate_layout(&load_preset(name).unwrap()).unwrap();
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(load_preset("xyz").is_err());
    }
}
