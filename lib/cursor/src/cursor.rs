use std::{fmt::Formatter, str::Chars};

mod source_range;
pub use source_range::*;

/// 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, derive_more::Display)]
pub struct Line(pub usize);

/// A position inside a source text.
///
/// Advancing the cursor past a `\n` bumps the line counter, so every position
/// knows which line it sits on without rescanning the source.
#[derive(Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    chars: Chars<'a>,
    line: Line,
}

impl<'a> std::fmt::Debug for Cursor<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // The full source is usually too verbose, so it is only shown with `{:#?}`
        if f.alternate() {
            f.debug_struct("Cursor")
                .field("line", &self.line)
                .field("offset", &self.offset())
                .field("source", &self.source)
                .finish()
        } else {
            f.debug_struct("Cursor")
                .field("line", &self.line)
                .field("offset", &self.offset())
                .finish()
        }
    }
}

impl<'a> Cursor<'a> {
    fn same_source(&self, other: &Cursor<'a>) -> bool {
        std::ptr::eq(self.source, other.source)
    }
}

/// Two cursors are equal if they point at the same position of the same source text.
impl<'a> PartialEq for Cursor<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.same_source(other) && self.offset() == other.offset()
    }
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, chars: source.chars(), line: Line(1) }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    /// Byte offset into the source.
    pub fn offset(&self) -> usize {
        self.source.len() - self.chars.as_str().len()
    }

    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Advances past the next character if it equals `expected`.
    pub fn advance_if(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Advances while `pred` holds for the upcoming character.
    pub fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.next();
        }
    }

    /// Advances up to and including the first character matching `stop`.
    /// Returns `false` if the end of the source was hit first.
    pub fn advance_past(&mut self, stop: impl Fn(char) -> bool) -> bool {
        loop {
            match self.next() {
                Some(c) if stop(c) => return true,
                Some(_) => (),
                None => return false,
            }
        }
    }

    pub fn slice_until(&self, end: &Cursor<'a>) -> &'a str {
        debug_assert!(self.same_source(end));
        &self.source[self.offset()..end.offset()]
    }
}

impl<'a> From<&'a str> for Cursor<'a> {
    fn from(source: &'a str) -> Self {
        Self::new(source)
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line.0 += 1;
        }
        c
    }
}
