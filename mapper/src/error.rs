//! Mapping and declaration errors.
//!
//! [`MappingError`] is raised per mapping call; nothing is cached between
//! calls, so a schema that is ambiguous fails every time it is used.

use command_dispatch_core::Argument;
use thiserror::Error;

/// Errors raised while binding arguments onto a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// An input name appears twice, or two inputs match the same field.
    #[error("argument `{name}` declared multiple times")]
    ArgumentDeclaredMultipleTimes { name: String },
    /// A declared field has no setter.
    #[error("argument field `{field}` has no write access")]
    UnavailableWriteAccess { field: String },
    /// Two declared fields share a long name or a short name.
    #[error("ambiguous argument definition: `{name}` is declared by fields {fields:?}")]
    AmbiguousArgumentDefinition { name: String, fields: Vec<String> },
    /// A required field received no argument.
    #[error("required argument `{name}` is missing")]
    RequiredArgumentMissing { name: String },
    /// Input arguments left over after every field was bound.
    #[error("{}", describe_unknown(.command, .arguments))]
    UnknownArguments {
        command: Option<String>,
        arguments: Vec<Argument>,
    },
    /// No registered parser or fallback conversion accepted the value.
    #[error("cannot convert {value:?} to {target_type}")]
    UnsupportedConversion {
        value: String,
        target_type: &'static str,
    },
}

fn describe_unknown(command: &Option<String>, arguments: &[Argument]) -> String {
    let names = arguments
        .iter()
        .map(|argument| argument.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    match command {
        Some(command) => format!("unknown arguments for command `{command}`: {names}"),
        None => format!("unknown arguments: {names}"),
    }
}

/// Malformed argument declaration, reported when metadata is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The long name is empty.
    #[error("argument field `{field}` has an empty long name")]
    EmptyLongName { field: String },
    /// The long name starts with a dash or contains whitespace.
    #[error("argument field `{field}` has an invalid long name `{name}`")]
    InvalidLongName { field: String, name: String },
    /// The short name is not a letter or digit.
    #[error("argument field `{field}` has an invalid short name `{short}`")]
    InvalidShortName { field: String, short: char },
}
