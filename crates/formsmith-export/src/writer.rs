//! Indentation-aware line writer shared by the text generators.

/// Accumulates generated source one line at a time.
#[derive(Debug)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
    unit: String,
}

impl CodeWriter {
    /// Creates a writer that indents with `width` spaces per level.
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            unit: " ".repeat(width),
        }
    }

    /// Writes one line at the current depth.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(&self.unit);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes a line and indents what follows.
    pub fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    /// Dedents and writes a line.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Writes a block of fixed source authored with two-space indentation,
    /// re-indented to this writer's width and current depth.
    pub fn block(&mut self, source: &str) {
        for raw in source.trim_matches('\n').lines() {
            let trimmed = raw.trim_start_matches(' ');
            let levels = (raw.len() - trimmed.len()) / 2;
            self.depth += levels;
            self.line(trimmed);
            self.depth -= levels;
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
