//! Whole-line parsing: path first, then arguments.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::argument::{Argument, ArgumentReader};
use crate::error::Result;
use crate::path::{Path, PathExtractor};
use crate::segment::{Segment, SegmentReader};

/// A command line split into its path and the still-unread argument
/// segments.
///
/// Splitting first lets a caller look up the command before choosing how
/// to read its arguments (see [`Bundling::UnlessDeclared`]).
///
/// [`Bundling::UnlessDeclared`]: crate::Bundling::UnlessDeclared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub path: Path,
    pub argument_segments: Vec<Segment>,
}

impl CommandLine {
    /// Splits `raw` with the default segment reader.
    ///
    /// Returns `Ok(None)` for empty or whitespace-only input.
    pub fn split(raw: &str) -> Result<Option<Self>> {
        Self::split_with(&SegmentReader::new(), raw)
    }

    pub fn split_with(reader: &SegmentReader, raw: &str) -> Result<Option<Self>> {
        let mut segments = reader.read_all(raw)?;
        if segments.is_empty() {
            return Ok(None);
        }

        let path = PathExtractor::extract(&segments)?;
        let argument_segments = segments.split_off(path.len());
        Ok(Some(Self {
            path,
            argument_segments,
        }))
    }

    pub fn read_arguments(&self, reader: &ArgumentReader) -> Result<Vec<Argument>> {
        reader.read_all(&self.argument_segments)
    }
}

/// Result of [`parse`]: a command path and its ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    pub path: Path,
    pub arguments: Vec<Argument>,
}

/// Parses a raw command line, expanding every single-dash bundle.
///
/// Returns `Ok(None)` for empty or whitespace-only input.
///
/// # Errors
///
/// Any lexical or syntactic [`ParseError`](crate::ParseError).
pub fn parse(raw: &str) -> Result<Option<ParsedCommand>> {
    parse_with(&ArgumentReader::new(), raw)
}

/// Like [`parse`], with a caller-chosen argument reader.
pub fn parse_with(reader: &ArgumentReader, raw: &str) -> Result<Option<ParsedCommand>> {
    let Some(line) = CommandLine::split(raw)? else {
        return Ok(None);
    };
    let arguments = line.read_arguments(reader)?;
    debug!(path = %line.path, arguments = arguments.len(), "Parsed command line");
    Ok(Some(ParsedCommand {
        path: line.path,
        arguments,
    }))
}
