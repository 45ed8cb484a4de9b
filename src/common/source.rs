//! Spans and span-to-location resolution.
//!
//! A translator invocation works on exactly one preprocessed C file, so
//! there is no file table: a [`Span`] is a bare byte range into that file,
//! and [`SourceFile`] owns the file's text together with the line-start
//! offsets needed to turn a span back into a line and column.

/// A byte-offset range in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A human-readable source location.
#[derive(Debug, Clone)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// The C source file being translated.
///
/// Line-start offsets are recorded once at construction; `resolve_span`
/// then maps any span back to a line and column by binary search over them.
#[derive(Debug)]
pub struct SourceFile {
    name: String,
    content: String,
    line_offsets: Vec<u32>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_offsets = compute_line_offsets(&content);
        Self {
            name: name.into(),
            content,
            line_offsets,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Resolve a span to a human-readable source location.
    pub fn resolve_span(&self, span: Span) -> SourceLocation {
        // line_offsets always holds at least the offset of line 1
        let line = match self.line_offsets.binary_search(&span.start) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let col = span.start.saturating_sub(self.line_offsets[line]);
        SourceLocation {
            file: self.name.clone(),
            line: line as u32 + 1,
            column: col + 1,
        }
    }
}

fn compute_line_offsets(content: &str) -> Vec<u32> {
    let mut offsets = vec![0u32];
    for (i, &b) in content.as_bytes().iter().enumerate() {
        if b == b'\n' {
            offsets.push((i + 1) as u32);
        }
    }
    offsets
}
