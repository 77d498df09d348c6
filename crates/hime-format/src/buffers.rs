//! The three output buffers written in lock-step by the renderer.

use crate::util::push_escaped;

#[derive(Debug, Default)]
pub(crate) struct Buffers {
    /// Normalized wiki source.
    pub(crate) text: String,
    /// Text with all markup removed.
    pub(crate) plain: String,
    pub(crate) html: String,
}

impl Buffers {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            plain: String::with_capacity(capacity),
            html: String::with_capacity(capacity + capacity / 2),
        }
    }

    /// Append `s` to the source and plain buffers.
    pub(crate) fn push_text(&mut self, s: &str) {
        self.text.push_str(s);
        self.plain.push_str(s);
    }

    /// Append a verbatim line: unchanged to source and plain, escaped to
    /// HTML, each followed by a newline.
    pub(crate) fn push_verbatim_line(&mut self, line: &str) {
        self.push_text(line);
        self.push_text("\n");
        push_escaped(&mut self.html, line);
        self.html.push('\n');
    }

    /// Append one character to all three buffers.
    pub(crate) fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.plain.push(c);
        self.html.push(c);
    }
}
