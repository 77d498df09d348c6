//! Generic wiki renderer parameterized by a markup dialect.

use std::marker::PhantomData;

use rayon::prelude::*;

use crate::block::BlockMode;
use crate::buffers::Buffers;
use crate::config::FormatConfig;
use crate::decoration::DecorationStack;
use crate::dialect::{Creole, Dialect, DialectKind, Markdown, detect};
use crate::scanner::{LineCursor, is_blank};

/// Result of rendering one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rendered {
    /// Title from the first level-1 heading, or the caller's fallback.
    pub title: String,
    /// Normalized wiki source.
    pub text: String,
    /// Text with all markup removed, for search and summaries.
    pub plain: String,
    /// HTML fragment.
    pub html: String,
}

/// One page handed to [`apply_batch`].
#[derive(Clone, Copy, Debug)]
pub struct PageSource<'a> {
    pub title: &'a str,
    pub text: &'a str,
}

/// Wiki renderer for the dialect `D`.
///
/// Holds only the shared configuration; every [`render`](Self::render)
/// call builds its own scan state, so one renderer may be used from many
/// threads.
pub struct WikiRenderer<'c, D: Dialect> {
    config: &'c FormatConfig,
    _dialect: PhantomData<D>,
}

impl<'c, D: Dialect> WikiRenderer<'c, D> {
    #[must_use]
    pub fn new(config: &'c FormatConfig) -> Self {
        Self {
            config,
            _dialect: PhantomData,
        }
    }

    /// Render `text`, falling back to `title` when it has no level-1 heading.
    ///
    /// # Examples
    ///
    /// ```
    /// use hime_format::{Creole, FormatConfig, WikiRenderer};
    ///
    /// let config = FormatConfig::default();
    /// let page = WikiRenderer::<Creole>::new(&config).render("Page", "= Hello =\nBody text\n");
    /// assert_eq!(page.title, "Hello");
    /// assert_eq!(page.html, "<p>\nBody text\n</p>\n");
    /// ```
    pub fn render(&self, title: &str, text: &str) -> Rendered {
        let rendered = Scan::<D>::new(self.config, text).run(title);
        tracing::trace!(
            dialect = D::NAME,
            input_len = text.len(),
            html_len = rendered.html.len(),
            "Rendered page"
        );
        rendered
    }
}

/// Render `text` in the dialect it announces (see [`detect`]).
pub fn apply(config: &FormatConfig, title: &str, text: &str) -> Rendered {
    apply_as(config, detect(config, text), title, text)
}

/// Render `text` in an explicitly chosen dialect.
pub fn apply_as(config: &FormatConfig, dialect: DialectKind, title: &str, text: &str) -> Rendered {
    tracing::debug!(%dialect, bytes = text.len(), "Rendering page");
    match dialect {
        DialectKind::Creole | DialectKind::Nomark => {
            WikiRenderer::<Creole>::new(config).render(title, text)
        }
        DialectKind::Markdown => WikiRenderer::<Markdown>::new(config).render(title, text),
    }
}

/// Render many pages in parallel.
///
/// Uses the global rayon thread pool. Results keep the input order.
pub fn apply_batch(config: &FormatConfig, pages: &[PageSource<'_>]) -> Vec<Rendered> {
    tracing::debug!(count = pages.len(), "Rendering page batch");
    pages
        .par_iter()
        .map(|page| apply(config, page.title, page.text))
        .collect()
}

/// Per-call scan state.
///
/// Block rules live in `block.rs`, inline rules in `inline.rs`.
pub(crate) struct Scan<'c, 's, D> {
    pub(crate) config: &'c FormatConfig,
    pub(crate) cursor: LineCursor<'s>,
    pub(crate) out: Buffers,
    pub(crate) block: BlockMode,
    pub(crate) decorations: DecorationStack,
    pub(crate) prev_line: &'s str,
    pub(crate) line: &'s str,
    pub(crate) title: Option<String>,
    _dialect: PhantomData<D>,
}

impl<'c, 's, D: Dialect> Scan<'c, 's, D> {
    fn new(config: &'c FormatConfig, input: &'s str) -> Self {
        Self {
            config,
            cursor: LineCursor::new(input),
            out: Buffers::with_capacity(input.len()),
            block: BlockMode::None,
            decorations: DecorationStack::default(),
            prev_line: "",
            line: "",
            title: None,
            _dialect: PhantomData,
        }
    }

    fn run(mut self, fallback_title: &str) -> Rendered {
        self.cursor.skip_blank_lines();
        self.advance();

        while !self.cursor.at_end() {
            self.prev_line = self.line;
            self.line = self.cursor.rest_of_line();

            if self.handle_block() {
                continue;
            }
            self.paragraph_line();
        }
        self.ensure_block(BlockMode::None);

        Rendered {
            title: self.title.unwrap_or_else(|| fallback_title.to_owned()),
            text: self.out.text,
            plain: self.out.plain,
            html: self.out.html,
        }
    }

    /// Move to the next line, keeping indentation inside raw blocks.
    pub(crate) fn advance(&mut self) {
        self.cursor.advance(self.block == BlockMode::Raw);
    }

    fn paragraph_line(&mut self) {
        self.ensure_block(BlockMode::Paragraph);

        let indent = self.line.bytes().take_while(|&b| b == b' ').count();
        for _ in 0..indent {
            self.out.push_text(" ");
            self.out.html.push_str("&nbsp;");
        }
        self.cursor.bump(indent);

        self.inline_line();
        self.out.push_text("\n");

        self.advance();
        self.cursor.skip_trailing_blanks();
        if !self.cursor.at_end() && is_blank(self.cursor.rest_of_line()) {
            self.out.push_text("\n");
        }
        self.out.html.push('\n');
    }
}
