//! Markup dialects and dialect detection.
//!
//! A dialect is a table of markers. The scanning rules are shared by every
//! dialect and live in the generic renderer.

use std::fmt;
use std::str::FromStr;

use crate::config::FormatConfig;

/// Deepest heading level any dialect accepts.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Marker table for one markup grammar.
///
/// Implemented by zero-sized types and used as a type parameter of
/// [`WikiRenderer`](crate::WikiRenderer), so dialect differences resolve at
/// compile time.
pub trait Dialect {
    /// Dialect name as written in configuration.
    const NAME: &'static str;

    /// Byte repeated to mark a heading level (`=` or `#`).
    const HEADING_MARK: u8;

    /// Whether the heading marker is repeated after the title.
    const HEADING_ENCLOSED: bool;

    /// Line that opens a verbatim code block.
    const CODE_OPEN: &'static str;

    /// Line that closes a verbatim code block.
    const CODE_CLOSE: &'static str;

    /// Byte a horizontal rule line is made of.
    const RULE_CHAR: u8 = b'-';

    /// Minimum number of rule bytes on a rule line.
    const RULE_MIN: usize;

    /// Markers toggling strong text, longest first.
    const STRONG: &'static [&'static str];

    /// Markers toggling emphasis, longest first.
    const EMPHASIS: &'static [&'static str];

    /// Parse a heading line into its level and title.
    ///
    /// The title must be non-empty and separated from the markers by a
    /// single space.
    fn parse_heading(line: &str) -> Option<(usize, &str)> {
        let level = line.bytes().take_while(|&b| b == Self::HEADING_MARK).count();
        if level == 0 || level > MAX_HEADING_LEVEL {
            return None;
        }

        let rest = line[level..].strip_prefix(' ')?;
        let title = if Self::HEADING_ENCLOSED {
            rest.strip_suffix(&line[..level])?.strip_suffix(' ')?
        } else {
            rest
        };
        (!title.is_empty()).then_some((level, title))
    }

    /// Check whether `line` is a horizontal rule.
    fn is_rule(line: &str) -> bool {
        line.len() >= Self::RULE_MIN && line.bytes().all(|b| b == Self::RULE_CHAR)
    }
}

/// Creole-style markup: `= Title =` headings, `{{{ }}}` code blocks,
/// `**strong**` and `//emphasis//`.
#[derive(Clone, Copy, Debug)]
pub struct Creole;

impl Dialect for Creole {
    const NAME: &'static str = "creole";
    const HEADING_MARK: u8 = b'=';
    const HEADING_ENCLOSED: bool = true;
    const CODE_OPEN: &'static str = "{{{";
    const CODE_CLOSE: &'static str = "}}}";
    const RULE_MIN: usize = 4;
    const STRONG: &'static [&'static str] = &["**"];
    const EMPHASIS: &'static [&'static str] = &["//"];
}

/// Markdown-style markup: `# Title` headings, fenced code blocks,
/// `**strong**`/`__strong__` and `*emphasis*`/`_emphasis_`.
#[derive(Clone, Copy, Debug)]
pub struct Markdown;

impl Dialect for Markdown {
    const NAME: &'static str = "markdown";
    const HEADING_MARK: u8 = b'#';
    const HEADING_ENCLOSED: bool = false;
    const CODE_OPEN: &'static str = "```";
    const CODE_CLOSE: &'static str = "```";
    const RULE_MIN: usize = 3;
    const STRONG: &'static [&'static str] = &["**", "__"];
    const EMPHASIS: &'static [&'static str] = &["*", "_"];
}

/// Runtime dialect selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DialectKind {
    Creole,
    Markdown,
    /// Legacy name, rendered as Creole. Its `!!! Title !!!` headings are
    /// not recognized and render as paragraph text.
    #[default]
    Nomark,
}

impl DialectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creole => Creole::NAME,
            Self::Markdown => Markdown::NAME,
            Self::Nomark => "nomark",
        }
    }

    /// Dialect announced by a leading marker character, if any.
    pub fn from_leading_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Self::Creole),
            '#' => Some(Self::Markdown),
            '!' => Some(Self::Nomark),
            _ => None,
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown dialect name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown markup dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for DialectKind {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "creole" => Ok(Self::Creole),
            "markdown" | "md" => Ok(Self::Markdown),
            "nomark" => Ok(Self::Nomark),
            _ => Err(UnknownDialect(s.to_owned())),
        }
    }
}

/// Pick the dialect for `text`.
///
/// The first non-blank character decides: `=` selects Creole, `#` Markdown
/// and `!` Nomark. Anything else falls back to the configured default.
///
/// # Examples
///
/// ```
/// use hime_format::{DialectKind, FormatConfig, detect};
///
/// let config = FormatConfig::default();
/// assert_eq!(detect(&config, "\n= Title =\n"), DialectKind::Creole);
/// assert_eq!(detect(&config, "# Title\n"), DialectKind::Markdown);
/// assert_eq!(detect(&config, "plain words"), DialectKind::Nomark);
/// ```
pub fn detect(config: &FormatConfig, text: &str) -> DialectKind {
    let kind = text
        .chars()
        .find(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
        .and_then(DialectKind::from_leading_char)
        .unwrap_or(config.default_dialect);
    tracing::trace!(dialect = %kind, "Detected markup dialect");
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creole_heading_levels() {
        assert_eq!(Creole::parse_heading("= Title ="), Some((1, "Title")));
        assert_eq!(Creole::parse_heading("=== Sub Title ==="), Some((3, "Sub Title")));
        assert_eq!(Creole::parse_heading("====== Six ======"), Some((6, "Six")));
    }

    #[test]
    fn test_creole_heading_needs_matching_close() {
        assert_eq!(Creole::parse_heading("== Title ="), None);
        assert_eq!(Creole::parse_heading("== Title ==="), None);
        assert_eq!(Creole::parse_heading("= Title"), None);
    }

    #[test]
    fn test_creole_heading_rejects_empty_title() {
        assert_eq!(Creole::parse_heading("= ="), None);
        assert_eq!(Creole::parse_heading("==  =="), None);
    }

    #[test]
    fn test_heading_rejects_level_seven() {
        assert_eq!(Creole::parse_heading("======= Deep ======="), None);
        assert_eq!(Markdown::parse_heading("####### Deep"), None);
    }

    #[test]
    fn test_markdown_heading() {
        assert_eq!(Markdown::parse_heading("# Title"), Some((1, "Title")));
        assert_eq!(Markdown::parse_heading("#### Four"), Some((4, "Four")));
        assert_eq!(Markdown::parse_heading("#NoSpace"), None);
        assert_eq!(Markdown::parse_heading("# "), None);
    }

    #[test]
    fn test_rule_minimum_length() {
        assert!(Creole::is_rule("----"));
        assert!(Creole::is_rule("--------"));
        assert!(!Creole::is_rule("---"));
        assert!(Markdown::is_rule("---"));
        assert!(!Markdown::is_rule("--"));
        assert!(!Markdown::is_rule("-- -"));
    }

    #[test]
    fn test_dialect_kind_from_str() {
        assert_eq!("creole".parse::<DialectKind>(), Ok(DialectKind::Creole));
        assert_eq!("Markdown".parse::<DialectKind>(), Ok(DialectKind::Markdown));
        assert_eq!(" nomark ".parse::<DialectKind>(), Ok(DialectKind::Nomark));
        assert_eq!(
            "textile".parse::<DialectKind>(),
            Err(UnknownDialect("textile".to_owned()))
        );
    }

    #[test]
    fn test_dialect_kind_display() {
        assert_eq!(DialectKind::Creole.to_string(), "creole");
        assert_eq!(DialectKind::Markdown.to_string(), "markdown");
        assert_eq!(DialectKind::Nomark.to_string(), "nomark");
    }

    #[test]
    fn test_detect_uses_first_non_blank_char() {
        let config = FormatConfig::default();
        assert_eq!(detect(&config, "  \n\t= Title =\n"), DialectKind::Creole);
        assert_eq!(detect(&config, "## Section\n"), DialectKind::Markdown);
        assert_eq!(detect(&config, "!!! Title !!!\n"), DialectKind::Nomark);
    }

    #[test]
    fn test_detect_falls_back_to_default() {
        let config = FormatConfig {
            default_dialect: DialectKind::Markdown,
            ..FormatConfig::default()
        };
        assert_eq!(detect(&config, "Just text"), DialectKind::Markdown);
        assert_eq!(detect(&config, ""), DialectKind::Markdown);
        assert_eq!(detect(&config, " \n "), DialectKind::Markdown);
    }
}
