/// One line of text split into fields. Arity varies line to line.
pub type RawRow<'a> = Vec<&'a str>;

/// Split a block of text into rows of fields without assuming a column count.
///
/// Each line is trimmed and split on runs of two or more whitespace
/// characters, or on any run containing a tab. Blank lines produce no row.
/// Callers must validate arity themselves.
pub fn split_columns(text: &str) -> impl Iterator<Item = RawRow<'_>> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(split_line)
}

/// Split one trimmed line on column gaps.
fn split_line(line: &str) -> RawRow<'_> {
    let mut fields = Vec::new();
    let mut field_start = 0;
    let mut gap: Option<(usize, usize, bool)> = None; // (start, length, has_tab)

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            let (start, len, tab) = gap.unwrap_or((i, 0, false));
            gap = Some((start, len + 1, tab || c == '\t'));
            continue;
        }

        if let Some((start, len, tab)) = gap.take() {
            if len >= 2 || tab {
                fields.push(&line[field_start..start]);
                field_start = i;
            }
        }
    }

    fields.push(&line[field_start..]);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_wide_gaps_only() {
        let rows: Vec<_> = split_columns("1   ANDHRA PRADESH    1234   5.67").collect();
        assert_eq!(rows, vec![vec!["1", "ANDHRA PRADESH", "1234", "5.67"]]);
    }

    #[test]
    fn test_single_tab_splits() {
        let rows: Vec<_> = split_columns("Sl. No.\tState/UT\tNumber").collect();
        assert_eq!(rows[0], vec!["Sl. No.", "State/UT", "Number"]);
    }

    #[test]
    fn test_blank_lines_dropped() {
        let rows: Vec<_> = split_columns("a  b\n\n   \nc\n").collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec!["c"]);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let rows: Vec<_> = split_columns("   Table 2.1   \r\n").collect();
        assert_eq!(rows, vec![vec!["Table 2.1"]]);
    }

    #[test]
    fn test_variable_arity() {
        let rows: Vec<_> = split_columns("A  B  C\nD  E").collect();
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_no_empty_fields() {
        let rows: Vec<_> = split_columns("x \t  y").collect();
        assert_eq!(rows[0], vec!["x", "y"]);
    }
}
