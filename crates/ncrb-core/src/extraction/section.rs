/// Marker that closes a section, e.g. the `TOTAL` row under a state table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminator(String);

impl Terminator {
    pub const TOTAL: &'static str = "TOTAL";

    pub fn new(marker: impl Into<String>) -> Self {
        Terminator(marker.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Terminator {
    fn default() -> Self {
        Terminator::new(Terminator::TOTAL)
    }
}

/// A labeled region of a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    /// Text from the start of the label up to (not including) the terminator.
    pub text: &'a str,
    /// Byte offset of the label within the full text.
    pub offset: usize,
    /// False when no terminator followed the label and the section runs to
    /// end-of-text.
    pub terminated: bool,
}

/// Locate the first occurrence of `label` and bound it by `terminator`.
///
/// Label matching is exact and case-sensitive. The terminator is searched
/// for after the label, so a label that itself contains the marker is not
/// cut short. Returns `None` when the label does not occur.
pub fn locate_section<'a>(
    full_text: &'a str,
    label: &str,
    terminator: &Terminator,
) -> Option<Section<'a>> {
    if label.is_empty() {
        return None;
    }
    let offset = full_text.find(label)?;
    let rest = &full_text[offset..];

    let end = if terminator.as_str().is_empty() {
        None
    } else {
        rest[label.len()..]
            .find(terminator.as_str())
            .map(|i| i + label.len())
    };

    Some(match end {
        Some(end) => Section {
            text: &rest[..end],
            offset,
            terminated: true,
        },
        None => Section {
            text: rest,
            offset,
            terminated: false,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "Table 2.1\nSTATES:\n1 GOA 10 0.01 15.80 0.63\nTOTAL (STATES) 10\nUNION TERRITORIES:\n1 DELHI 20 0.02 200.10 0.10\nTOTAL (UTs) 20\n";

    #[test]
    fn test_section_stops_at_terminator() {
        let s = locate_section(DOC, "STATES:", &Terminator::default()).unwrap();
        assert!(s.text.starts_with("STATES:"));
        assert!(!s.text.contains("TOTAL"));
        assert!(s.text.contains("GOA"));
        assert!(!s.text.contains("DELHI"));
        assert!(s.terminated);
    }

    #[test]
    fn test_second_section_uses_its_own_terminator() {
        let s = locate_section(DOC, "UNION TERRITORIES:", &Terminator::default()).unwrap();
        assert!(s.text.contains("DELHI"));
        assert!(!s.text.contains("GOA"));
        assert!(!s.text.contains("TOTAL"));
    }

    #[test]
    fn test_missing_label_is_absent() {
        assert!(locate_section("nothing here", "STATES:", &Terminator::default()).is_none());
    }

    #[test]
    fn test_label_is_case_sensitive() {
        assert!(locate_section("states: 1 GOA", "STATES:", &Terminator::default()).is_none());
    }

    #[test]
    fn test_unterminated_runs_to_end() {
        let text = "intro STATES: 1 GOA 10 0.01 15.80 0.63";
        let s = locate_section(text, "STATES:", &Terminator::default()).unwrap();
        assert_eq!(s.text, "STATES: 1 GOA 10 0.01 15.80 0.63");
        assert_eq!(s.offset, 6);
        assert!(!s.terminated);
    }

    #[test]
    fn test_terminator_before_label_is_ignored() {
        let text = "TOTAL page header\nSTATES:\n1 GOA 10 0.01 15.80 0.63\nTOTAL";
        let s = locate_section(text, "STATES:", &Terminator::default()).unwrap();
        assert!(s.text.contains("GOA"));
    }

    #[test]
    fn test_custom_terminator() {
        let text = "STATES:\n1 GOA 10 0.01 15.80 0.63\nALL INDIA 10";
        let s = locate_section(text, "STATES:", &Terminator::new("ALL INDIA")).unwrap();
        assert_eq!(s.text, "STATES:\n1 GOA 10 0.01 15.80 0.63\n");
    }
}
