//! Wiki markup renderer and diff highlighter.
//!
//! This crate turns a page's wiki source into three synchronized outputs:
//! the normalized source, plain text and an HTML fragment. It also detects
//! the page title from the first level-1 heading.
//!
//! # Architecture
//!
//! One generic [`WikiRenderer`] drives a line scanner, a block state machine
//! and an inline tokenizer. Dialect differences are a table of markers
//! supplied through the [`Dialect`] trait:
//! - [`Creole`]: `= Title =` headings, `{{{` code blocks, `**` and `//`
//! - [`Markdown`]: `# Title` headings, fenced code, `**`/`__` and `*`/`_`
//!
//! The legacy `nomark` dialect name renders as Creole.
//!
//! Diff support is independent of rendering: [`unified_diff`] builds the
//! diff text between two revisions and [`highlight`] turns it into HTML.
//!
//! All entry points are total: malformed markup degrades to literal text.
//!
//! # Example
//!
//! ```
//! use hime_format::{FormatConfig, apply};
//!
//! let config = FormatConfig::default();
//! let page = apply(&config, "Fallback", "= Hello =\nSee **also** [[Other]].\n");
//! assert_eq!(page.title, "Hello");
//! assert_eq!(
//!     page.html,
//!     "<p>\nSee <strong>also</strong> <a href=\"/Other\" class=\"link\">Other</a>.\n</p>\n"
//! );
//! ```

mod block;
mod buffers;
mod config;
mod decoration;
mod diff;
mod dialect;
mod inline;
mod renderer;
mod scanner;
mod summary;
mod util;

pub use config::{FormatConfig, ImageConfig, InterwikiLink};
pub use diff::{DIFF_HEADER_LINES, highlight, unified_diff};
pub use dialect::{
    Creole, Dialect, DialectKind, MAX_HEADING_LEVEL, Markdown, UnknownDialect, detect,
};
pub use renderer::{PageSource, Rendered, WikiRenderer, apply, apply_as, apply_batch};
pub use summary::trim_for_summary;
pub use util::escape_html;
