//! Indent-aware text assembly for emitted source.
//!
//! All emitters build their artifact through [`CodeWriter`] so that
//! indentation and line endings are uniform — a prerequisite for the
//! byte-identical-output guarantee.

/// Line-oriented writer with four-space indentation.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    indent: usize,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current indentation. An empty string produces a
    /// blank line with no trailing whitespace.
    pub fn line(&mut self, text: &str) {
        if !text.is_empty() {
            for _ in 0..self.indent {
                self.buf.push_str("    ");
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    /// Write a blank line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write `text`, an opening brace, and increase the indentation.
    pub fn open(&mut self, text: &str) {
        self.line(text);
        self.line("{");
        self.indent += 1;
    }

    /// Write an opening brace and increase the indentation. Pairs with
    /// [`close`](Self::close) when the heading line was assembled manually.
    pub fn open_brace(&mut self) {
        self.line("{");
        self.indent += 1;
    }

    /// Decrease the indentation and write a closing brace.
    pub fn close(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.line("}");
    }

    /// Decrease the indentation and write a closing brace followed by
    /// `suffix` (array initializers close with `};`).
    pub fn close_with(&mut self, suffix: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.line(&format!("}}{suffix}"));
    }

    /// Current indentation depth, in levels.
    pub fn depth(&self) -> usize {
        self.indent
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

#[cfg(test)]
#[path = "writer/writer_tests.rs"]
mod writer_tests;
