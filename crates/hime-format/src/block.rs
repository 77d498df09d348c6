//! Block-level state machine.

use std::fmt::Write;

use crate::dialect::Dialect;
use crate::renderer::Scan;
use crate::scanner::is_blank;
use crate::util::push_escaped;

/// Line that opens and closes a display math block.
pub(crate) const MATH_BLOCK: &str = "%%%";

pub(crate) const MATH_BLOCK_OPEN: &str = "<div>\n<wiki-math class=\"mathjax\">\\[";
pub(crate) const MATH_BLOCK_CLOSE: &str = "\\]</wiki-math>\n</div>\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockMode {
    None,
    Paragraph,
    /// Horizontal rule; open only while its line is emitted.
    Rule,
    /// Indented preformatted lines.
    Raw,
    /// Fenced code.
    Code,
    Math,
}

impl BlockMode {
    /// Blocks whose lines are copied without inline markup.
    fn is_verbatim(self) -> bool {
        matches!(self, Self::Raw | Self::Code | Self::Math)
    }
}

impl<D: Dialect> Scan<'_, '_, D> {
    pub(crate) fn ensure_block(&mut self, next: BlockMode) {
        if self.block == next {
            return;
        }
        self.close_block(next);
        self.open_block(next);
    }

    fn close_block(&mut self, next: BlockMode) {
        match self.block {
            BlockMode::None => {}
            BlockMode::Paragraph => {
                self.decorations.close_all(&mut self.out.html);
                self.out.html.push_str("</p>\n");
                if !matches!(next, BlockMode::Raw | BlockMode::Code) {
                    self.cursor.skip_blank_lines();
                }
            }
            BlockMode::Rule => self.cursor.skip_blank_lines(),
            BlockMode::Raw | BlockMode::Code => {
                self.out.html.push_str("</code></pre>\n");
                self.cursor.skip_blank_lines();
            }
            BlockMode::Math => {
                self.out.text.push_str(MATH_BLOCK);
                self.out.text.push_str("\n\n");
                self.out.plain.push('\n');
                self.out.html.push_str(MATH_BLOCK_CLOSE);
                self.cursor.skip_blank_lines();
            }
        }
        self.block = BlockMode::None;
    }

    fn open_block(&mut self, next: BlockMode) {
        debug_assert_eq!(self.block, BlockMode::None, "block opened over another block");
        match next {
            BlockMode::None | BlockMode::Rule => {}
            BlockMode::Paragraph => self.out.html.push_str("<p>\n"),
            BlockMode::Raw | BlockMode::Code => self.out.html.push_str("<pre><code>"),
            BlockMode::Math => {
                self.out.text.push_str(MATH_BLOCK);
                self.out.text.push('\n');
                self.out.html.push_str(MATH_BLOCK_OPEN);
            }
        }
        self.block = next;
    }

    /// Apply the first block rule matching the current line.
    ///
    /// Returns `false` when the line is ordinary paragraph content.
    pub(crate) fn handle_block(&mut self) -> bool {
        let line = self.line;
        let verbatim = self.block.is_verbatim();

        if matches!(self.block, BlockMode::None | BlockMode::Paragraph) && D::is_rule(line) {
            self.ensure_block(BlockMode::Rule);
            self.out.push_text(line);
            self.out.push_text("\n");
            self.out.html.push_str("<hr />\n");
            self.ensure_block(BlockMode::None);
            self.advance();
            return true;
        }

        if !verbatim && self.prev_line.is_empty() && line.starts_with(' ') {
            self.ensure_block(BlockMode::Raw);
            self.out.push_verbatim_line(line);
            self.advance();
            return true;
        }

        if !verbatim && line == D::CODE_OPEN {
            self.out.text.push_str(D::CODE_OPEN);
            self.out.text.push('\n');
            self.out.plain.push('\n');
            self.ensure_block(BlockMode::Code);
            self.advance();
            return true;
        }

        if !verbatim && is_blank(line) {
            while !self.cursor.at_end() {
                self.ensure_block(BlockMode::None);
                self.advance();
                if self.cursor.at_end() || !is_blank(self.cursor.rest_of_line()) {
                    break;
                }
            }
            return true;
        }

        if self.block == BlockMode::Code && line == D::CODE_CLOSE {
            self.ensure_block(BlockMode::None);
            self.out.text.push_str(D::CODE_CLOSE);
            self.out.text.push('\n');
            self.out.plain.push('\n');
            self.advance();
            return true;
        }

        if line == MATH_BLOCK {
            if self.block == BlockMode::Math {
                self.ensure_block(BlockMode::None);
                self.advance();
                return true;
            }
            if !verbatim {
                self.ensure_block(BlockMode::Math);
                self.advance();
                return true;
            }
        }

        if !verbatim && self.prev_line.is_empty() {
            if let Some((level, title)) = D::parse_heading(line) {
                self.heading(level, title);
                return true;
            }
        }

        let continues = match self.block {
            BlockMode::Raw => line.starts_with(' ') || line == "\t",
            BlockMode::Code | BlockMode::Math => true,
            _ => false,
        };
        if continues {
            self.out.push_verbatim_line(line);
            self.advance();
            return true;
        }

        if line.is_empty() {
            self.ensure_block(BlockMode::None);
            self.out.push_text("\n");
            self.advance();
            return true;
        }

        false
    }

    /// Emit a heading line. The first level-1 heading becomes the page title.
    fn heading(&mut self, level: usize, title: &str) {
        self.out.text.push_str(self.line);
        self.out.text.push('\n');
        self.out.plain.push_str(title);
        self.out.plain.push('\n');
        if self.cursor.has_next_line() {
            self.out.push_text("\n");
        }

        self.ensure_block(BlockMode::None);
        if level == 1 && self.title.is_none() {
            self.title = Some(title.to_owned());
        } else {
            write!(self.out.html, "<h{level}>").unwrap();
            push_escaped(&mut self.out.html, title);
            writeln!(self.out.html, "</h{level}>").unwrap();
        }
        // The emitted text has a blank line after the heading.
        self.line = "";
        self.advance();
    }
}
