//! Pluggable scanning rules for single segments.
//!
//! The [`SegmentReader`](crate::SegmentReader) asks each strategy, in
//! priority order, whether it applies at the current offset, then lets the
//! first one that does extract the segment.

use crate::error::{SegmentError, SegmentErrorKind};
use crate::segment::Segment;

const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// Decides where a segment starts and ends.
pub trait SegmentStrategy {
    fn name(&self) -> &'static str;

    /// Returns `true` when this strategy should scan the segment starting at
    /// `begin_offset`.
    fn applies_to(&self, begin_offset: usize, source: &str) -> bool;

    /// Extracts one segment starting at `begin_offset`.
    ///
    /// `begin_offset` must lie on a character boundary of `source`.
    fn extract_segment(&self, begin_offset: usize, source: &str) -> Result<Segment, SegmentError>;
}

/// Unquoted segments: everything up to the next whitespace.
///
/// A bare `"` is rejected because quotes may only open a quoted segment;
/// an escaped `\"` is kept as-is.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStrategy;

impl SegmentStrategy for DefaultStrategy {
    fn name(&self) -> &'static str {
        "default"
    }

    fn applies_to(&self, _begin_offset: usize, _source: &str) -> bool {
        true
    }

    fn extract_segment(&self, begin_offset: usize, source: &str) -> Result<Segment, SegmentError> {
        let rest = source.get(begin_offset..).unwrap_or_default();
        let mut end = begin_offset + rest.len();
        let mut previous = None;

        for (idx, ch) in rest.char_indices() {
            if ch.is_whitespace() {
                end = begin_offset + idx;
                break;
            }
            if ch == QUOTE && previous != Some(ESCAPE) {
                return Err(SegmentError::new(
                    SegmentErrorKind::UnexpectedQuote,
                    begin_offset + idx,
                    source,
                ));
            }
            previous = Some(ch);
        }

        Ok(Segment::new(&source[begin_offset..end], begin_offset))
    }
}

/// Double-quoted segments, kept with both quote characters.
///
/// Scanning stops at the first `"` not preceded by `\`. Unescaping happens
/// later, when the argument reader extracts flag values.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuotedStrategy;

impl SegmentStrategy for QuotedStrategy {
    fn name(&self) -> &'static str {
        "quoted"
    }

    fn applies_to(&self, begin_offset: usize, source: &str) -> bool {
        source
            .get(begin_offset..)
            .is_some_and(|rest| rest.starts_with(QUOTE))
    }

    fn extract_segment(&self, begin_offset: usize, source: &str) -> Result<Segment, SegmentError> {
        if !self.applies_to(begin_offset, source) {
            return Err(SegmentError::new(
                SegmentErrorKind::NotQuoted,
                begin_offset,
                source,
            ));
        }

        let body_start = begin_offset + QUOTE.len_utf8();
        let mut previous = None;
        for (idx, ch) in source[body_start..].char_indices() {
            if ch == QUOTE && previous != Some(ESCAPE) {
                let end = body_start + idx + QUOTE.len_utf8();
                return Ok(Segment::new(&source[begin_offset..end], begin_offset));
            }
            previous = Some(ch);
        }

        Err(SegmentError::new(
            SegmentErrorKind::UnterminatedQuote,
            source.len(),
            source,
        ))
    }
}
