/// Drop every line that is empty or whitespace-only.
///
/// Surviving lines keep their order and are joined with `\n`; the result
/// has no trailing newline. All-blank input yields an empty string.
pub fn compact(text: &str) -> String {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Count lines that are empty or whitespace-only.
///
/// A trailing newline ends the last line; it does not start a new one.
pub fn count_blank_lines(text: &str) -> usize {
    text.lines()
        .filter(|line| line.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_drops_blank_and_whitespace_lines() {
        assert_eq!(compact("a\n\n  \t\nb\n\r\nc\n"), "a\nb\nc");
    }

    #[test]
    fn compact_of_all_blank_is_empty() {
        assert_eq!(compact("\n \n\t\n"), "");
        assert_eq!(compact(""), "");
    }

    #[test]
    fn compact_keeps_indentation_of_surviving_lines() {
        assert_eq!(compact("fn\n\n    body  \n"), "fn\n    body  ");
    }

    #[test]
    fn compact_is_idempotent() {
        let once = compact("x\n\n y \n\n\nz");
        assert_eq!(compact(&once), once);
    }

    #[test]
    fn counts_blank_lines() {
        assert_eq!(count_blank_lines("a\n\nb\n\n\n"), 3);
        assert_eq!(count_blank_lines("a\nb"), 0);
        assert_eq!(count_blank_lines(""), 0);
        assert_eq!(count_blank_lines("\n"), 1);
        assert_eq!(count_blank_lines("  \n\t"), 2);
    }
}
