//! Flag arguments and the reader that classifies segments into them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::segment::Segment;

/// One parsed flag occurrence.
///
/// `is_short_name` records single-letter provenance (`-v`, or one letter of
/// a bundle). Short names compare case-sensitively downstream; long names
/// compare case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: String,
    pub is_short_name: bool,
}

impl Argument {
    /// Long-style argument (`--name value`).
    pub fn long(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_short_name: false,
        }
    }

    /// Short-style argument (`-n value`).
    pub fn short(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_short_name: true,
        }
    }
}

/// How a single-dash flag with several letters (`-abc`) is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Bundling {
    /// Always expand into one short flag per letter.
    #[default]
    Always,
    /// Never expand; `-abc` is one long-style flag named `abc`.
    Never,
    /// Keep the word whole when it matches one of these long names
    /// (case-insensitively), otherwise expand it.
    UnlessDeclared(HashSet<String>),
}

impl Bundling {
    /// Builds [`Bundling::UnlessDeclared`] from declared long names.
    pub fn unless_declared<I, S>(long_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::UnlessDeclared(
            long_names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        )
    }

    fn expands(&self, name: &str) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::UnlessDeclared(declared) => !declared.contains(&name.to_lowercase()),
        }
    }
}

/// Turns the segments that follow a command path into [`Argument`]s.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::{Argument, ArgumentReader, SegmentReader};
///
/// let segments = SegmentReader::new().read_all("-abc val --name \"x y\"").unwrap();
/// let arguments = ArgumentReader::new().read_all(&segments).unwrap();
/// assert_eq!(
///     arguments,
///     vec![
///         Argument::short("a", ""),
///         Argument::short("b", ""),
///         Argument::short("c", "val"),
///         Argument::long("name", "x y"),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgumentReader {
    bundling: Bundling,
}

impl ArgumentReader {
    /// Reader that always expands bundles.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundling(bundling: Bundling) -> Self {
        Self { bundling }
    }

    pub fn bundling(&self) -> &Bundling {
        &self.bundling
    }

    /// Reads all arguments, left to right.
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidDashCount`] when a flag position holds a
    ///   segment with no dash or more than two.
    /// - [`ParseError::EmptyFlagName`] for a bare `-` or `--`.
    pub fn read_all(&self, segments: &[Segment]) -> Result<Vec<Argument>> {
        let mut arguments = Vec::with_capacity(segments.len());
        let mut index = 0;

        while let Some(segment) = segments.get(index) {
            let dashes = segment.value.chars().take_while(|c| *c == '-').count();
            if dashes == 0 || dashes > 2 {
                return Err(ParseError::InvalidDashCount {
                    offset: segment.begin_offset,
                    segment: segment.value.clone(),
                });
            }

            let name = &segment.value[dashes..];
            if name.is_empty() {
                return Err(ParseError::EmptyFlagName {
                    offset: segment.begin_offset + dashes,
                });
            }

            let value_segment = segments
                .get(index + 1)
                .filter(|next| !next.value.starts_with('-'));
            let value = value_segment
                .map(|next| unescape_value(&next.value))
                .unwrap_or_default();
            index += if value_segment.is_some() { 2 } else { 1 };

            let letters = name.chars().count();
            if dashes == 1 && letters > 1 && self.bundling.expands(name) {
                let mut chars: Vec<char> = name.chars().collect();
                let last = chars.pop().unwrap_or_default();
                for letter in chars {
                    arguments.push(Argument::short(letter.to_string(), ""));
                }
                arguments.push(Argument::short(last.to_string(), value));
            } else if dashes == 1 && letters == 1 {
                arguments.push(Argument::short(name, value));
            } else {
                arguments.push(Argument::long(name, value));
            }
        }

        Ok(arguments)
    }
}

/// Strips one layer of surrounding quotes and unescapes `\"`.
pub fn unescape_value(raw: &str) -> String {
    let inner = raw
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw);
    inner.replace("\\\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SegmentReader;

    fn read(source: &str, bundling: Bundling) -> Result<Vec<Argument>> {
        let segments = SegmentReader::new().read_all(source).unwrap();
        ArgumentReader::with_bundling(bundling).read_all(&segments)
    }

    #[test]
    fn test_single_flags_with_values() {
        assert_eq!(
            read("-f 1", Bundling::Always).unwrap(),
            vec![Argument::short("f", "1")]
        );
        assert_eq!(
            read("--foo 1", Bundling::Always).unwrap(),
            vec![Argument::long("foo", "1")]
        );
    }

    #[test]
    fn test_quoted_value_is_unescaped() {
        assert_eq!(
            read(r#"-foo "bar baz""#, Bundling::Never).unwrap(),
            vec![Argument::long("foo", "bar baz")]
        );
        assert_eq!(
            read(r#"--say "a \"b\"""#, Bundling::Always).unwrap(),
            vec![Argument::long("say", "a \"b\"")]
        );
    }

    #[test]
    fn test_flags_without_values() {
        assert_eq!(
            read("-foo -bar", Bundling::Never).unwrap(),
            vec![Argument::long("foo", ""), Argument::long("bar", "")]
        );
    }

    #[test]
    fn test_bundle_expands_per_letter() {
        assert_eq!(
            read("-abc", Bundling::Always).unwrap(),
            vec![
                Argument::short("a", ""),
                Argument::short("b", ""),
                Argument::short("c", ""),
            ]
        );
    }

    #[test]
    fn test_bundle_value_goes_to_last_letter() {
        assert_eq!(
            read("-abc val", Bundling::Always).unwrap(),
            vec![
                Argument::short("a", ""),
                Argument::short("b", ""),
                Argument::short("c", "val"),
            ]
        );
    }

    #[test]
    fn test_declared_long_name_is_not_bundled() {
        let bundling = Bundling::unless_declared(["Id"]);
        assert_eq!(
            read("-id 1 -xy", bundling).unwrap(),
            vec![
                Argument::long("id", "1"),
                Argument::short("x", ""),
                Argument::short("y", ""),
            ]
        );
    }

    #[test]
    fn test_quoted_value_may_start_with_dash() {
        assert_eq!(
            read(r#"--delta "-5""#, Bundling::Always).unwrap(),
            vec![Argument::long("delta", "-5")]
        );
    }

    #[test]
    fn test_dash_count_errors() {
        assert_eq!(
            read("---foo", Bundling::Always).unwrap_err(),
            ParseError::InvalidDashCount {
                offset: 0,
                segment: "---foo".into()
            }
        );
        assert!(matches!(
            read("-a 1 2", Bundling::Always).unwrap_err(),
            ParseError::InvalidDashCount { offset: 5, .. }
        ));
    }

    #[test]
    fn test_empty_flag_name() {
        assert_eq!(
            read("-x --", Bundling::Always).unwrap_err(),
            ParseError::EmptyFlagName { offset: 5 }
        );
    }

    #[test]
    fn test_unescape_value() {
        assert_eq!(unescape_value("plain"), "plain");
        assert_eq!(unescape_value("\"\""), "");
        assert_eq!(unescape_value(r#""\"x\"""#), "\"x\"");
    }
}
