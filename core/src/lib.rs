//! Command-line tokenizing for declarative command dispatch.
//!
//! This crate turns one line of text into a command [`Path`] and a list of
//! flag [`Argument`]s:
//!
//! - [`SegmentReader`]: splits input into whitespace-delimited
//!   [`Segment`]s, delegating quoted spans to [`QuotedStrategy`].
//! - [`PathExtractor`]: takes the leading run of alphabetic segments as the
//!   (possibly multi-segment) command path.
//! - [`ArgumentReader`]: classifies the rest as `-x` / `--name` flags with
//!   optional values, expanding `-abc` bundles per its [`Bundling`] policy.
//!
//! Errors are split into lexical ([`SegmentError`]) and syntactic
//! ([`ParseError`]) failures; both carry byte offsets into the input.
//!
//! # Example
//!
//! ```
//! use command_dispatch_core::*;
//!
//! let parsed = parse("remote add --name origin -fv").unwrap().unwrap();
//! assert_eq!(parsed.path.to_string(), "/remote/add");
//! assert_eq!(
//!     parsed.arguments,
//!     vec![
//!         Argument::long("name", "origin"),
//!         Argument::short("f", ""),
//!         Argument::short("v", ""),
//!     ]
//! );
//!
//! assert!(parse("   ").unwrap().is_none());
//! ```

mod argument;
mod error;
mod parser;
mod path;
mod segment;
mod strategy;

pub use argument::{Argument, ArgumentReader, Bundling, unescape_value};
pub use error::{ParseError, Result, SegmentError, SegmentErrorKind};
pub use parser::{CommandLine, ParsedCommand, parse, parse_with};
pub use path::{Path, PathExtractor};
pub use segment::{Segment, SegmentReader, Segments};
pub use strategy::{DefaultStrategy, QuotedStrategy, SegmentStrategy};
