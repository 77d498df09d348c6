//! Line cursor over a source buffer.
//!
//! The cursor only moves forward. `index` is the read position, `line_end`
//! the end of the current line's content (trailing blanks stripped) and
//! `next_line` the start of the following line.

/// Check whether a line consists only of spaces, tabs and line breaks.
pub(crate) fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

#[derive(Debug)]
pub(crate) struct LineCursor<'s> {
    input: &'s str,
    index: usize,
    next_line: usize,
    line_end: usize,
}

impl<'s> LineCursor<'s> {
    pub(crate) fn new(input: &'s str) -> Self {
        Self {
            input,
            index: 0,
            next_line: 0,
            line_end: 0,
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn line_end(&self) -> usize {
        self.line_end
    }

    pub(crate) fn at_end(&self) -> bool {
        self.index >= self.input.len()
    }

    /// Whether another line starts after the current one.
    pub(crate) fn has_next_line(&self) -> bool {
        self.next_line < self.input.len()
    }

    /// Remaining content of the current line, from the read position.
    pub(crate) fn rest_of_line(&self) -> &'s str {
        self.input.get(self.index..self.line_end).unwrap_or("")
    }

    /// Byte immediately before the read position.
    pub(crate) fn prev_byte(&self) -> Option<u8> {
        self.index.checked_sub(1).map(|i| self.input.as_bytes()[i])
    }

    /// Move the read position forward by `n` bytes within the line.
    pub(crate) fn bump(&mut self, n: usize) {
        self.index += n;
        debug_assert!(
            self.input.is_char_boundary(self.index),
            "cursor moved inside a UTF-8 sequence"
        );
    }

    /// Move to the start of the next line and compute its content end.
    ///
    /// With `preserve_indent`, a whitespace-only line keeps its first
    /// space or tab so it still reads as indented.
    pub(crate) fn advance(&mut self, preserve_indent: bool) {
        if self.next_line < self.index {
            self.next_line = self.index;
            self.line_end = self.index;
        }
        self.index = self.next_line;
        if self.next_line >= self.input.len() {
            return;
        }

        let bytes = self.input.as_bytes();
        let start = self.next_line;
        let end = match bytes[start..].iter().position(|&b| b == b'\n') {
            Some(offset) => {
                self.next_line = start + offset + 1;
                start + offset
            }
            None => {
                self.next_line = bytes.len();
                bytes.len()
            }
        };

        let mut content_end = end;
        while content_end > start && matches!(bytes[content_end - 1], b' ' | b'\t' | b'\r') {
            content_end -= 1;
        }
        if preserve_indent
            && content_end == start
            && end > start
            && matches!(bytes[start], b' ' | b'\t')
        {
            content_end = start + 1;
        }
        self.line_end = content_end;
    }

    /// Skip whole lines that contain only whitespace.
    ///
    /// Stops at the start of the first line with visible content, or at the
    /// end of the buffer.
    pub(crate) fn skip_blank_lines(&mut self) {
        let bytes = self.input.as_bytes();
        while self.index < bytes.len() {
            let mut end = self.index;
            while end < bytes.len() {
                match bytes[end] {
                    b'\r' | b'\n' => {
                        end += 1;
                        while end < bytes.len() && matches!(bytes[end], b'\r' | b'\n') {
                            end += 1;
                        }
                        break;
                    }
                    b' ' | b'\t' => end += 1,
                    _ => return,
                }
            }
            self.index = end;
        }
    }

    /// Jump to the end of the buffer if only whitespace remains.
    pub(crate) fn skip_trailing_blanks(&mut self) {
        if is_blank(&self.input[self.index.min(self.input.len())..]) {
            self.index = self.input.len();
        }
    }
}
