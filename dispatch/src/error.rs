//! Error types for registration, configuration and dispatch.

use command_dispatch_core::{ParseError, Path};
use command_dispatch_mapper::{DeclarationError, MappingError};
use thiserror::Error;

/// Command metadata could not be derived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The declared or derived name cannot appear on a command line.
    #[error("command {command} has an invalid name `{name}`")]
    InvalidCommandName { command: &'static str, name: String },
    /// One of the argument declarations is malformed.
    #[error("command {command}: {source}")]
    Argument {
        command: &'static str,
        #[source]
        source: DeclarationError,
    },
}

/// Registration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),
    /// The name is already bound to another implementation.
    #[error("command name `{name}` is already bound to {existing}, cannot bind {attempted}")]
    DuplicateCommandName {
        name: String,
        existing: &'static str,
        attempted: &'static str,
    },
    /// The path is already routed to another implementation.
    #[error("route {path} is already bound to {existing}, cannot bind {attempted}")]
    RouteConflict {
        path: Path,
        existing: &'static str,
        attempted: &'static str,
    },
    /// The route path is malformed.
    #[error("invalid route path: {0}")]
    InvalidPath(#[from] ParseError),
}

/// Configuration file failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Failures reported to the caller of
/// [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).
///
/// Errors raised by a command body are not in this list: they are
/// converted into a return code by the error-handler chain.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The input could not be tokenized or its flags could not be read.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The arguments do not fit the command's schema.
    #[error(transparent)]
    Mapping(#[from] MappingError),
    /// No route matches the command path.
    #[error("no command registered for {path}")]
    CommandNotFound { path: Path },
    /// The instance resolver could not provide the command.
    #[error("instance resolver returned no instance of {command}")]
    InstanceUnavailable { command: &'static str },
}

/// Convenience alias for results with [`DispatchError`].
pub type Result<T> = std::result::Result<T, DispatchError>;
