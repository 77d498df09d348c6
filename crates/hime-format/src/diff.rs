//! Unified diff generation and HTML highlighting of revisions.

use similar::TextDiff;

use crate::util::push_escaped;

/// Number of header lines (`--- old` and `+++ new`) the highlighter skips.
pub const DIFF_HEADER_LINES: usize = 2;

/// Lines of unchanged context around each hunk.
const CONTEXT_LINES: usize = 3;

/// Build a unified diff between two revisions of a page.
///
/// The output starts with exactly [`DIFF_HEADER_LINES`] header lines
/// followed by `@@` hunks. Equal inputs produce an empty string.
///
/// # Examples
///
/// ```
/// use hime_format::unified_diff;
///
/// let diff = unified_diff("a\nb\n", "a\nc\n");
/// assert!(diff.starts_with("--- old\n+++ new\n@@"));
/// assert!(diff.contains("-b\n+c\n"));
/// assert_eq!(unified_diff("same\n", "same\n"), "");
/// ```
pub fn unified_diff(old: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut unified = diff.unified_diff();
    unified.context_radius(CONTEXT_LINES);
    if unified.iter_hunks().next().is_none() {
        return String::new();
    }
    unified.header("old", "new").to_string()
}

/// Render a unified diff as HTML.
///
/// The first [`DIFF_HEADER_LINES`] lines are dropped. Every other line
/// yields exactly one `<br />`-terminated output line.
///
/// # Examples
///
/// ```
/// use hime_format::highlight;
///
/// let html = highlight("--- old\n+++ new\n+added\n");
/// assert_eq!(
///     html,
///     "<span class=\"plus\">+</span><span class=\"plus-line\">added</span><br />\n"
/// );
/// ```
pub fn highlight(diff: &str) -> String {
    let mut html = String::with_capacity(diff.len() * 2);
    for line in diff.lines().skip(DIFF_HEADER_LINES) {
        if let Some(rest) = line.strip_prefix('+') {
            html.push_str(r#"<span class="plus">+</span><span class="plus-line">"#);
            push_indented(&mut html, rest);
            html.push_str("</span>");
        } else if let Some(rest) = line.strip_prefix('-') {
            html.push_str(r#"<span class="minus">-</span><span class="minus-line">"#);
            push_indented(&mut html, rest);
            html.push_str("</span>");
        } else if line.starts_with('@') {
            html.push_str(r#"<span class="hunk">"#);
            push_escaped(&mut html, line);
            html.push_str("</span>");
        } else {
            push_indented(&mut html, line);
        }
        html.push_str("<br />\n");
    }
    html
}

/// Append `line` escaped, with each leading space as `&nbsp;`.
fn push_indented(html: &mut String, line: &str) {
    let body = line.trim_start_matches(' ');
    for _ in 0..line.len() - body.len() {
        html.push_str("&nbsp;");
    }
    push_escaped(html, body);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const HEADER: &str = "--- old\r\n+++ new\r\n";

    fn highlight_body(body: &str) -> String {
        highlight(&format!("{HEADER}{body}"))
    }

    #[test]
    fn test_header_only() {
        assert_eq!(highlight(HEADER), "");
        assert_eq!(highlight(""), "");
    }

    #[test]
    fn test_plus() {
        assert_eq!(
            highlight_body("+test\r\n"),
            "<span class=\"plus\">+</span><span class=\"plus-line\">test</span><br />\n"
        );
    }

    #[test]
    fn test_minus() {
        assert_eq!(
            highlight_body("-test\r\n"),
            "<span class=\"minus\">-</span><span class=\"minus-line\">test</span><br />\n"
        );
    }

    #[test]
    fn test_hunk() {
        assert_eq!(
            highlight_body("@@ -0,0 +0,0 @@\r\n"),
            "<span class=\"hunk\">@@ -0,0 +0,0 @@</span><br />\n"
        );
    }

    #[test]
    fn test_context() {
        assert_eq!(highlight_body(" test\r\n"), "&nbsp;test<br />\n");
        assert_eq!(highlight_body("   test\r\n"), "&nbsp;&nbsp;&nbsp;test<br />\n");
    }

    #[test]
    fn test_indented_changes() {
        assert_eq!(
            highlight_body("+  test\r\n"),
            "<span class=\"plus\">+</span><span class=\"plus-line\">&nbsp;&nbsp;test</span><br />\n"
        );
        assert_eq!(
            highlight_body("-  test\r\n"),
            "<span class=\"minus\">-</span><span class=\"minus-line\">&nbsp;&nbsp;test</span><br />\n"
        );
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(
            highlight_body("\n+x\n"),
            "<br />\n<span class=\"plus\">+</span><span class=\"plus-line\">x</span><br />\n"
        );
    }

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            highlight_body("+<b>&</b>\n"),
            "<span class=\"plus\">+</span><span class=\"plus-line\">&lt;b&gt;&amp;&lt;/b&gt;</span><br />\n"
        );
    }

    #[test]
    fn test_one_output_line_per_input_line() {
        let body = "@@ -1,3 +1,3 @@\n a\n-b\n+c\n\n d\n";
        assert_eq!(highlight_body(body).lines().count(), body.lines().count());
    }

    #[test]
    fn test_unified_diff_header_and_hunk() {
        let diff = unified_diff("one\ntwo\nthree\n", "one\n2\nthree\n");
        assert_eq!(diff, "--- old\n+++ new\n@@ -1,3 +1,3 @@\n one\n-two\n+2\n three\n");
    }

    #[test]
    fn test_unified_diff_equal_inputs() {
        assert_eq!(unified_diff("", ""), "");
        assert_eq!(unified_diff("a\n", "a\n"), "");
    }

    #[test]
    fn test_unified_diff_feeds_highlight() {
        let html = highlight(&unified_diff("a\n", "b\n"));
        assert_eq!(
            html,
            "<span class=\"hunk\">@@ -1 +1 @@</span><br />\n\
             <span class=\"minus\">-</span><span class=\"minus-line\">a</span><br />\n\
             <span class=\"plus\">+</span><span class=\"plus-line\">b</span><br />\n"
        );
    }
}
