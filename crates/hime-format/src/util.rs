//! Shared escaping helpers for wiki rendering.

use std::fmt::Write;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters kept as-is inside a single URL path segment.
///
/// Mirrors the reserved set RFC 3986 allows in a segment (`: @ & = + $`)
/// plus the unreserved marks. `/`, `;`, `,` and `?` are always encoded.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Escape HTML special characters.
///
/// # Examples
///
/// ```
/// use hime_format::escape_html;
///
/// assert_eq!(escape_html("<a href=\"x\">"), "&lt;a href=&quot;x&quot;&gt;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(&mut out, s);
    out
}

/// Append `s` to `out` with HTML special characters escaped.
pub(crate) fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Percent-encode a page name for use as a single URL path segment.
pub(crate) fn path_escape(name: &str) -> String {
    utf8_percent_encode(name, PATH_SEGMENT).to_string()
}

/// Append an anchor pointing at the wiki page `name`.
///
/// Names containing a dot get a `.wiki` suffix so they never collide
/// with static file routes.
pub(crate) fn push_page_link(out: &mut String, name: &str) {
    let suffix = if name.contains('.') { ".wiki" } else { "" };
    write!(
        out,
        r#"<a href="/{}{suffix}" class="link">"#,
        escape_html(&path_escape(name))
    )
    .unwrap();
    push_escaped(out, name);
    out.push_str("</a>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_all_special() {
        assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#39;");
    }

    #[test]
    fn test_escape_html_keeps_unicode() {
        assert_eq!(escape_html("日本語 & more"), "日本語 &amp; more");
    }

    #[test]
    fn test_path_escape_space_and_slash() {
        assert_eq!(path_escape("Front Page/Sub"), "Front%20Page%2FSub");
    }

    #[test]
    fn test_path_escape_keeps_segment_reserved() {
        assert_eq!(path_escape("a:b@c=d+e$f&g"), "a:b@c=d+e$f&g");
    }

    #[test]
    fn test_path_escape_utf8() {
        assert_eq!(path_escape("ページ"), "%E3%83%9A%E3%83%BC%E3%82%B8");
    }

    #[test]
    fn test_page_link_plain() {
        let mut out = String::new();
        push_page_link(&mut out, "WikiPage");
        assert_eq!(out, r#"<a href="/WikiPage" class="link">WikiPage</a>"#);
    }

    #[test]
    fn test_page_link_with_dot() {
        let mut out = String::new();
        push_page_link(&mut out, "Version.2");
        assert_eq!(out, r#"<a href="/Version.2.wiki" class="link">Version.2</a>"#);
    }

    #[test]
    fn test_page_link_escapes_ampersand() {
        let mut out = String::new();
        push_page_link(&mut out, "Q&A");
        assert_eq!(out, r#"<a href="/Q&amp;A" class="link">Q&amp;A</a>"#);
    }
}
