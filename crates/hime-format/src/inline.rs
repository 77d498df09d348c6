//! Inline tokenizer for paragraph lines.
//!
//! Rules are tried in a fixed order at every position; the first one that
//! matches consumes its input and nothing is revisited.

use std::fmt::Write;

use url::Url;

use crate::decoration::{Decoration, Toggle};
use crate::dialect::Dialect;
use crate::renderer::Scan;
use crate::util::{escape_html, push_escaped, push_page_link};

const MATH_INLINE: &str = "%%";
const URL_SCHEME: &str = "https:";

/// Length of the URL-like token at the start of `s`.
fn token_len(s: &str) -> usize {
    s.find(|c: char| c.is_whitespace() || c.is_control())
        .unwrap_or(s.len())
}

/// Length of the CamelCase word at the start of `s`, if there is one.
///
/// A word is an uppercase letter, a lowercase run, another uppercase letter,
/// then lowercase runs each ending in a single uppercase letter. A digit run
/// may end the word. Two adjacent uppercase letters, or a letter right after
/// the digits, reject the whole word.
pub(crate) fn camel_word_len(s: &str) -> Option<usize> {
    let b = s.as_bytes();
    if b.len() < 3 || !b[0].is_ascii_uppercase() || !b[1].is_ascii_lowercase() {
        return None;
    }

    let mut i = 2;
    while i < b.len() && b[i].is_ascii_lowercase() {
        i += 1;
    }
    if i == b.len() || !b[i].is_ascii_uppercase() {
        return None;
    }
    i += 1;

    let mut after_upper = true;
    while i < b.len() {
        let c = b[i];
        if c.is_ascii_digit() {
            while i < b.len() && b[i].is_ascii_digit() {
                i += 1;
            }
            if i < b.len() && b[i].is_ascii_alphabetic() {
                return None;
            }
            break;
        }
        if c.is_ascii_uppercase() {
            if after_upper {
                return None;
            }
            after_upper = true;
        } else if c.is_ascii_lowercase() {
            after_upper = false;
        } else {
            break;
        }
        i += 1;
    }
    Some(i)
}

impl<D: Dialect> Scan<'_, '_, D> {
    /// Tokenize the rest of the current line.
    pub(crate) fn inline_line(&mut self) {
        while self.cursor.index() < self.cursor.line_end() {
            let rest = self.cursor.rest_of_line();
            if rest.starts_with('\r') {
                self.cursor.bump(1);
                continue;
            }

            let matched = self.inline_math(rest)
                || self.decoration(rest, D::STRONG, Decoration::Strong)
                || self.decoration(rest, D::EMPHASIS, Decoration::Emphasis)
                || self.interwiki(rest)
                || self.camel_link(rest)
                || self.page_link(rest)
                || self.bare_url(rest)
                || self.html_char(rest);
            if !matched {
                self.literal(rest);
            }
        }
    }

    fn inline_math(&mut self, rest: &str) -> bool {
        let Some(body) = rest.strip_prefix(MATH_INLINE) else {
            return false;
        };
        let Some(end) = body.find(MATH_INLINE) else {
            return false;
        };
        let math = &body[..end];

        self.out.text.push_str(&rest[..end + 2 * MATH_INLINE.len()]);
        self.out.plain.push_str(math);
        self.out.html.push_str(r#"<wiki-math class="mathjax">\("#);
        push_escaped(&mut self.out.html, math);
        self.out.html.push_str(r"\)</wiki-math>");

        self.cursor.bump(end + 2 * MATH_INLINE.len());
        true
    }

    fn decoration(&mut self, rest: &str, markers: &[&str], kind: Decoration) -> bool {
        let Some(marker) = markers.iter().find(|m| rest.starts_with(**m)) else {
            return false;
        };

        match self.decorations.toggle(kind, &mut self.out.html) {
            Toggle::Opened | Toggle::Closed => self.out.text.push_str(marker),
            Toggle::Overflow => {
                self.out.push_text(marker);
                push_escaped(&mut self.out.html, marker);
            }
        }
        self.cursor.bump(marker.len());
        true
    }

    fn interwiki(&mut self, rest: &str) -> bool {
        let config = self.config;
        for link in &config.links {
            let Some(after) = rest
                .strip_prefix(link.key.as_str())
                .and_then(|r| r.strip_prefix(':'))
            else {
                continue;
            };
            let len = token_len(after);
            if len == 0 {
                continue;
            }
            let path = &after[..len];
            let token = &rest[..link.key.len() + 1 + len];

            self.out.push_text(token);
            self.out.html.push_str("<a href=\"");
            push_escaped(&mut self.out.html, &link.url);
            push_escaped(&mut self.out.html, path);
            self.out.html.push_str("\" class=\"link\">");
            push_escaped(&mut self.out.html, token);
            self.out.html.push_str("</a>");

            self.cursor.bump(token.len());
            return true;
        }
        false
    }

    fn camel_link(&mut self, rest: &str) -> bool {
        if self.cursor.prev_byte().is_some_and(|b| b.is_ascii_alphanumeric()) {
            return false;
        }
        let Some(len) = camel_word_len(rest) else {
            return false;
        };
        let name = &rest[..len];

        self.out.push_text(name);
        push_page_link(&mut self.out.html, name);

        self.cursor.bump(len);
        true
    }

    fn page_link(&mut self, rest: &str) -> bool {
        let Some(body) = rest.strip_prefix("[[") else {
            return false;
        };
        let Some(end) = body.find("]]") else {
            return false;
        };
        let name = &body[..end];
        if name.is_empty() {
            return false;
        }

        self.out.text.push_str(&rest[..end + 4]);
        self.out.plain.push_str(name);
        push_page_link(&mut self.out.html, name);

        self.cursor.bump(end + 4);
        true
    }

    fn bare_url(&mut self, rest: &str) -> bool {
        if !rest.starts_with(URL_SCHEME) {
            return false;
        }
        let raw = &rest[..token_len(rest)];
        let Ok(url) = Url::parse(raw) else {
            return false;
        };
        if url.scheme() != "https" {
            return false;
        }

        self.out.push_text(url.as_str());
        let escaped = escape_html(url.as_str());
        if self.config.image.allows(&url) {
            write!(self.out.html, r#"<img src="{escaped}" alt="{escaped}" />"#).unwrap();
        } else {
            write!(self.out.html, r#"<a href="{escaped}" class="link">{escaped}</a>"#).unwrap();
        }

        self.cursor.bump(raw.len());
        true
    }

    fn html_char(&mut self, rest: &str) -> bool {
        let (c, entity) = match rest.as_bytes()[0] {
            b'&' => ("&", "&amp;"),
            b'<' => ("<", "&lt;"),
            b'>' => (">", "&gt;"),
            b'"' => ("\"", "&quot;"),
            _ => return false,
        };
        self.out.push_text(c);
        self.out.html.push_str(entity);
        self.cursor.bump(1);
        true
    }

    fn literal(&mut self, rest: &str) {
        if let Some(c) = rest.chars().next() {
            self.out.push_char(c);
            self.cursor.bump(c.len_utf8());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_word_basic() {
        assert_eq!(camel_word_len("SeeAlso"), Some(7));
        assert_eq!(camel_word_len("SeeAlsoFoo bar"), Some(10));
        assert_eq!(camel_word_len("WikiPage."), Some(8));
    }

    #[test]
    fn test_camel_word_trailing_upper() {
        assert_eq!(camel_word_len("SeeA"), Some(4));
        assert_eq!(camel_word_len("SeeA b"), Some(4));
    }

    #[test]
    fn test_camel_word_digits() {
        assert_eq!(camel_word_len("PageTwo2"), Some(8));
        assert_eq!(camel_word_len("PageTwo22!"), Some(9));
        assert_eq!(camel_word_len("PageTwo2x"), None);
        assert_eq!(camel_word_len("PageTwo2X"), None);
    }

    #[test]
    fn test_camel_word_rejects_double_upper() {
        assert_eq!(camel_word_len("SeeALso"), None);
        assert_eq!(camel_word_len("SeeAlsoFOo"), None);
    }

    #[test]
    fn test_camel_word_needs_two_humps() {
        assert_eq!(camel_word_len("Word"), None);
        assert_eq!(camel_word_len("Wo"), None);
        assert_eq!(camel_word_len("WOrd"), None);
        assert_eq!(camel_word_len("word"), None);
        assert_eq!(camel_word_len("Wo-Rd"), None);
    }

    #[test]
    fn test_token_len_stops_at_whitespace() {
        assert_eq!(token_len("https://a.b/c d"), 13);
        assert_eq!(token_len("https://a.b/c\td"), 13);
        assert_eq!(token_len("abc"), 3);
    }
}
