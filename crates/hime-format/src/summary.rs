//! Short one-line page summaries for listings.

const ELLIPSIS: &str = "..";

/// Collapse whitespace and cut `text` to at most `limit` characters.
///
/// Every whitespace run, line breaks included, becomes a single space.
/// Text that still exceeds `limit` is cut and ends in `..`, which counts
/// toward the limit.
///
/// # Panics
///
/// Panics if `limit` is negative.
///
/// # Examples
///
/// ```
/// use hime_format::trim_for_summary;
///
/// assert_eq!(trim_for_summary("This is a test.", 10), "This is ..");
/// assert_eq!(trim_for_summary("line one\n\nline two", 100), "line one line two");
/// assert_eq!(trim_for_summary("AB", 2), "AB");
/// ```
pub fn trim_for_summary(text: &str, limit: isize) -> String {
    assert!(limit >= 0, "summary limit must not be negative, got {limit}");
    let limit = limit.unsigned_abs();

    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }

    if collapsed.chars().count() <= limit {
        return collapsed;
    }
    match limit {
        0 => String::new(),
        1 => ".".to_owned(),
        _ => {
            let mut out: String = collapsed.chars().take(limit - ELLIPSIS.len()).collect();
            out.push_str(ELLIPSIS);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ENGLISH: &str = "This is a test.";
    const JAPANESE: &str = "これはテストです。";

    #[test]
    fn test_zero_limit() {
        assert_eq!(trim_for_summary(ENGLISH, 0), "");
        assert_eq!(trim_for_summary(JAPANESE, 0), "");
        assert_eq!(trim_for_summary("", 0), "");
    }

    #[test]
    fn test_limit_one() {
        assert_eq!(trim_for_summary(ENGLISH, 1), ".");
        assert_eq!(trim_for_summary(JAPANESE, 1), ".");
        assert_eq!(trim_for_summary("A", 1), "A");
        assert_eq!(trim_for_summary("あ", 1), "あ");
    }

    #[test]
    fn test_limit_two() {
        assert_eq!(trim_for_summary(ENGLISH, 2), "..");
        assert_eq!(trim_for_summary(JAPANESE, 2), "..");
        assert_eq!(trim_for_summary("AB", 2), "AB");
        assert_eq!(trim_for_summary("あい", 2), "あい");
    }

    #[test]
    fn test_truncated() {
        assert_eq!(trim_for_summary(ENGLISH, 3), "T..");
        assert_eq!(trim_for_summary(JAPANESE, 3), "こ..");
        assert_eq!(trim_for_summary(ENGLISH, 10), "This is ..");
        assert_eq!(trim_for_summary(JAPANESE, 5), "これは..");
        assert_eq!(trim_for_summary(ENGLISH, 14), "This is a te..");
        assert_eq!(trim_for_summary(JAPANESE, 8), "これはテスト..");
    }

    #[test]
    fn test_fits() {
        assert_eq!(trim_for_summary(ENGLISH, 15), ENGLISH);
        assert_eq!(trim_for_summary(JAPANESE, 9), JAPANESE);
        assert_eq!(trim_for_summary(ENGLISH, 20), ENGLISH);
        assert_eq!(trim_for_summary(JAPANESE, 15), JAPANESE);
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(trim_for_summary("a \r\n\t b\n\nc", 100), "a b c");
        assert_eq!(trim_for_summary("\nleading", 100), " leading");
    }

    #[test]
    fn test_collapse_happens_before_counting() {
        assert_eq!(trim_for_summary("A\n\n\n\nB", 3), "A B");
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn test_negative_limit_panics() {
        trim_for_summary(ENGLISH, -1);
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn test_large_negative_limit_panics() {
        trim_for_summary(ENGLISH, -10);
    }
}
