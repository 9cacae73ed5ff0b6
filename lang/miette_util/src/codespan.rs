//! Byte-based source locations.
//!
//! Only the small subset of the classic `codespan` API that the elaborator needs:
//! byte indices, byte offsets and half-open spans.

use std::fmt;
use std::ops::{Range, Sub};

/// The raw, untyped offset.
pub type RawOffset = i64;

/// The raw, untyped index. We use a 32-bit integer here for space efficiency,
/// assuming we won't be working with sources larger than 4GB.
pub type RawIndex = u32;

/// A byte position in a source file.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteIndex(pub RawIndex);

impl ByteIndex {
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<RawIndex> for ByteIndex {
    fn from(i: RawIndex) -> Self {
        ByteIndex(i)
    }
}

impl fmt::Display for ByteIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A byte offset in a source file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteOffset(pub RawOffset);

impl ByteOffset {
    pub const fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl Sub for ByteIndex {
    type Output = ByteOffset;

    fn sub(self, rhs: ByteIndex) -> ByteOffset {
        ByteOffset(self.0 as RawOffset - rhs.0 as RawOffset)
    }
}

/// A half-open range `[start, end)` of bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: ByteIndex,
    pub end: ByteIndex,
}

impl Span {
    /// Create a new span from a starting and ending index.
    ///
    /// ```rust
    /// use tessera_lang_miette_util::codespan::{ByteIndex, Span};
    ///
    /// let span = Span::new(2, 5);
    /// assert_eq!(span.start, ByteIndex(2));
    /// ```
    pub fn new(start: impl Into<ByteIndex>, end: impl Into<ByteIndex>) -> Span {
        let start = start.into();
        let end = end.into();

        assert!(end >= start);

        Span { start, end }
    }

    /// Combine two spans by taking the start of the earlier span
    /// and the end of the later span.
    pub fn merge(self, other: Span) -> Span {
        Span { start: self.start.min(other.start), end: self.end.max(other.end) }
    }

    pub fn len(self) -> ByteOffset {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl From<Range<RawIndex>> for Span {
    fn from(range: Range<RawIndex>) -> Span {
        Span::new(range.start, range.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Range<usize> {
        span.start.to_usize()..span.end.to_usize()
    }
}
