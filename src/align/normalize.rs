//! Line normalization for refined transcript replies.
//!
//! LLM replies come back as free-form text: lines may carry the `[timestamp]`
//! tags we sent, stray blank lines, or irregular whitespace. Normalization
//! strips a line down to comparable plain text before alignment.

/// Collapse all whitespace runs to single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize one reply line to plain comparable text.
///
/// Collapses whitespace, then strips a leading `[...]` timestamp tag if
/// present and returns the remainder, trimmed.
pub fn normalize_line(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    match strip_timestamp_tag(&collapsed) {
        Some(rest) => rest.trim().to_string(),
        None => collapsed,
    }
}

/// Normalize a reply block into its non-empty lines.
///
/// Lines that are empty after normalization are dropped entirely; they do
/// not consume an alignment slot.
pub fn normalize_block(block: &str) -> Vec<String> {
    block
        .lines()
        .map(normalize_line)
        .filter(|line| !line.is_empty())
        .collect()
}

/// If `line` starts with a non-empty bracketed tag, return the text after it.
///
/// The tag must open at the first character and contain at least one
/// character before the closing bracket, mirroring the `[MM:SS]` labels the
/// prompt formatter emits.
fn strip_timestamp_tag(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?;
    let close = inner.find(']')?;
    if close == 0 {
        return None;
    }
    Some(&inner[close + 1..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_whitespace_folds_runs() {
        assert_eq!(collapse_whitespace("hello   world\t\n again"), "hello world again");
    }

    #[test]
    fn collapse_whitespace_trims_edges() {
        assert_eq!(collapse_whitespace("  padded  "), "padded");
    }

    #[test]
    fn normalize_plain_line_passes_through() {
        assert_eq!(normalize_line("hello world"), "hello world");
    }

    #[test]
    fn normalize_strips_timestamp_tag() {
        assert_eq!(normalize_line("[0:42] hello world"), "hello world");
    }

    #[test]
    fn normalize_strips_tag_without_space() {
        assert_eq!(normalize_line("[12:03]hello"), "hello");
    }

    #[test]
    fn normalize_keeps_empty_bracket_pair() {
        // "[]" is not a timestamp tag
        assert_eq!(normalize_line("[] hello"), "[] hello");
    }

    #[test]
    fn normalize_keeps_mid_line_brackets() {
        assert_eq!(normalize_line("hello [loud] world"), "hello [loud] world");
    }

    #[test]
    fn normalize_unclosed_bracket_passes_through() {
        assert_eq!(normalize_line("[0:42 hello"), "[0:42 hello");
    }

    #[test]
    fn normalize_tag_only_line_becomes_empty() {
        assert_eq!(normalize_line("[0:42]"), "");
    }

    #[test]
    fn normalize_block_drops_empty_lines() {
        let lines = normalize_block("hello\n\n   \n[0:10] world\n[0:20]\n");
        assert_eq!(lines, vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn normalize_block_empty_input() {
        assert!(normalize_block("").is_empty());
        assert!(normalize_block("\n\n").is_empty());
    }
}
