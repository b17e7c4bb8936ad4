//! Lexical and syntactic errors raised while reading a command line.
//!
//! [`SegmentError`] covers malformed quoting found by the segment
//! strategies; [`ParseError`] covers everything the path extractor and the
//! argument reader reject, and wraps segment errors so callers of
//! [`parse`](crate::parse) handle a single type.

use thiserror::Error;

/// What went wrong while extracting a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentErrorKind {
    /// A quoted segment reached the end of input without a closing quote.
    UnterminatedQuote,
    /// An unescaped `"` appeared inside an unquoted segment.
    UnexpectedQuote,
    /// The quoted strategy was asked to start at a non-quote character.
    NotQuoted,
    /// A strategy consumed no input at a non-whitespace offset.
    EmptySegment,
}

/// Malformed segment, carrying the offending byte offset and the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset} in {input:?}")]
pub struct SegmentError {
    pub kind: SegmentErrorKind,
    pub offset: usize,
    pub input: String,
}

impl SegmentError {
    pub(crate) fn new(kind: SegmentErrorKind, offset: usize, input: &str) -> Self {
        Self {
            kind,
            offset,
            input: input.to_string(),
        }
    }
}

impl std::fmt::Display for SegmentErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::UnterminatedQuote => "unterminated quoted segment",
            Self::UnexpectedQuote => "unexpected quote inside unquoted segment",
            Self::NotQuoted => "quoted segment must start with a quote",
            Self::EmptySegment => "strategy produced an empty segment",
        })
    }
}

/// Errors produced while turning raw input into a path and arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Lexical failure from the segment reader.
    #[error(transparent)]
    Segment(#[from] SegmentError),
    /// No command name precedes the arguments.
    #[error("missing command name at offset {offset}")]
    MissingCommand { offset: usize },
    /// The command name is a quoted string.
    #[error("command name cannot be quoted (offset {offset})")]
    QuotedCommandName { offset: usize },
    /// A flag must start with exactly one or two dashes.
    #[error("expected `-` or `--` before {segment:?} at offset {offset}")]
    InvalidDashCount { offset: usize, segment: String },
    /// Nothing follows the dashes.
    #[error("empty flag name at offset {offset}")]
    EmptyFlagName { offset: usize },
    /// A path segment is empty or contains whitespace or `/`.
    #[error("invalid path segment {0:?}")]
    InvalidPathSegment(String),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
