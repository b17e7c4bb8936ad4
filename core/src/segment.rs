//! Lexical segments and the reader that produces them.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{SegmentError, SegmentErrorKind};
use crate::strategy::{DefaultStrategy, QuotedStrategy, SegmentStrategy};

/// A lexical token cut from the raw input, with its byte offset.
///
/// Quoted segments keep their surrounding quotes in `value`.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::Segment;
///
/// let segment = Segment::new("-foo", 4);
/// assert_eq!(segment.end_offset(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub value: String,
    pub begin_offset: usize,
}

impl Segment {
    pub fn new(value: impl Into<String>, begin_offset: usize) -> Self {
        Self {
            value: value.into(),
            begin_offset,
        }
    }

    /// Offset one past the last byte of the segment.
    pub fn end_offset(&self) -> usize {
        self.begin_offset + self.value.len()
    }

    pub fn is_quoted(&self) -> bool {
        self.value.starts_with('"')
    }
}

/// Splits raw input into whitespace-delimited [`Segment`]s.
///
/// Strategies are consulted in order; the first one that applies at the
/// current offset extracts the segment. The default reader tries
/// [`QuotedStrategy`] and then [`DefaultStrategy`].
///
/// # Examples
///
/// ```
/// use command_dispatch_core::SegmentReader;
///
/// let segments = SegmentReader::new().read_all(r#"-foo "bar baz""#).unwrap();
/// let values: Vec<_> = segments.iter().map(|s| s.value.as_str()).collect();
/// assert_eq!(values, vec!["-foo", "\"bar baz\""]);
///
/// assert!(SegmentReader::new().read_all("   ").unwrap().is_empty());
/// ```
pub struct SegmentReader {
    strategies: Vec<Box<dyn SegmentStrategy>>,
}

impl Default for SegmentReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentReader {
    pub fn new() -> Self {
        Self::with_strategies(vec![Box::new(QuotedStrategy), Box::new(DefaultStrategy)])
    }

    /// Creates a reader with custom strategies, highest priority first.
    ///
    /// When no strategy applies at some offset, [`DefaultStrategy`] is used.
    pub fn with_strategies(strategies: Vec<Box<dyn SegmentStrategy>>) -> Self {
        Self { strategies }
    }

    /// Lazily yields segments of `source`; stops after the first error.
    pub fn segments<'r, 's>(&'r self, source: &'s str) -> Segments<'r, 's> {
        Segments {
            reader: self,
            source,
            position: 0,
            failed: false,
        }
    }

    /// Reads every segment of `source` eagerly.
    ///
    /// # Errors
    ///
    /// Returns the first [`SegmentError`] met while scanning.
    pub fn read_all(&self, source: &str) -> Result<Vec<Segment>, SegmentError> {
        let segments = self.segments(source).collect::<Result<Vec<_>, _>>()?;
        trace!(count = segments.len(), "Read segments");
        Ok(segments)
    }

    fn extract(&self, begin_offset: usize, source: &str) -> Result<Segment, SegmentError> {
        match self
            .strategies
            .iter()
            .find(|strategy| strategy.applies_to(begin_offset, source))
        {
            Some(strategy) => strategy.extract_segment(begin_offset, source),
            None => DefaultStrategy.extract_segment(begin_offset, source),
        }
    }
}

/// Iterator returned by [`SegmentReader::segments`].
pub struct Segments<'r, 's> {
    reader: &'r SegmentReader,
    source: &'s str,
    position: usize,
    failed: bool,
}

impl Iterator for Segments<'_, '_> {
    type Item = Result<Segment, SegmentError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let rest = &self.source[self.position..];
        let skipped = rest.len() - rest.trim_start().len();
        self.position += skipped;
        if self.position >= self.source.len() {
            return None;
        }

        match self.reader.extract(self.position, self.source) {
            Ok(segment) if segment.value.is_empty() => {
                self.failed = true;
                Some(Err(SegmentError::new(
                    SegmentErrorKind::EmptySegment,
                    self.position,
                    self.source,
                )))
            }
            Ok(segment) => {
                self.position = segment.end_offset();
                Some(Ok(segment))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
