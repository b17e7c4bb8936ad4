//! Static description of a registered command.

use std::any::type_name;
use std::hash::{Hash, Hasher};

use command_dispatch_core::Path;
use command_dispatch_mapper::{ArgumentMetaData, CommandArguments};
use serde::Serialize;

use crate::command::{Command, TypeKey};
use crate::error::MetadataError;

/// Name, description and argument declarations of one command type.
///
/// Two values are equal when they describe the same command type.
#[derive(Debug, Clone, Serialize)]
pub struct CommandMetaData {
    pub command_type: TypeKey,
    pub arguments_type: TypeKey,
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<ArgumentMetaData>,
}

impl CommandMetaData {
    /// Collects the metadata of `C` and validates its declarations.
    ///
    /// # Errors
    ///
    /// [`MetadataError::InvalidCommandName`] when the name cannot start a
    /// command line, [`MetadataError::Argument`] for the first malformed
    /// argument declaration.
    pub fn of<C: Command>() -> Result<Self, MetadataError> {
        let command = type_name::<C>();
        let name = C::NAME
            .map(str::to_string)
            .unwrap_or_else(|| derive_command_name(command));
        let starts_alphabetic = name.chars().next().is_some_and(char::is_alphabetic);
        if !starts_alphabetic || Path::new(name.as_str()).is_err() {
            return Err(MetadataError::InvalidCommandName { command, name });
        }

        let arguments = C::Arguments::schema().metadata();
        for argument in &arguments {
            argument
                .validate()
                .map_err(|source| MetadataError::Argument { command, source })?;
        }

        Ok(Self {
            command_type: TypeKey::of::<C>(),
            arguments_type: TypeKey::of::<C::Arguments>(),
            name,
            description: C::DESCRIPTION.map(str::to_string),
            arguments,
        })
    }

    /// Declared long names, in declaration order.
    pub fn long_names(&self) -> Vec<&str> {
        self.arguments
            .iter()
            .map(|argument| argument.long_name.as_str())
            .collect()
    }
}

impl PartialEq for CommandMetaData {
    fn eq(&self, other: &Self) -> bool {
        self.command_type == other.command_type
    }
}

impl Eq for CommandMetaData {}

impl Hash for CommandMetaData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.command_type.hash(state);
    }
}

/// Default command name for a type name: the last path component, without
/// generic parameters or a `Command` suffix, lowercased.
///
/// ```
/// use command_dispatch_engine::derive_command_name;
///
/// assert_eq!(derive_command_name("app::commands::PushCommand"), "push");
/// assert_eq!(derive_command_name("app::Status"), "status");
/// assert_eq!(derive_command_name("app::WrapCommand<u8>"), "wrap");
/// assert_eq!(derive_command_name("Command"), "command");
/// ```
pub fn derive_command_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let last = base.rsplit("::").next().unwrap_or(base);
    let stem = last
        .strip_suffix("Command")
        .filter(|stem| !stem.is_empty())
        .unwrap_or(last);
    stem.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use command_dispatch_mapper::{ArgumentField, ArgumentSchema, DeclarationError};

    #[derive(Debug, Default)]
    struct CloneArguments {
        url: String,
        depth: Option<u32>,
    }

    impl CommandArguments for CloneArguments {
        fn schema() -> ArgumentSchema<Self> {
            ArgumentSchema::new()
                .field(
                    ArgumentField::value("Url", |a: &mut Self, v: String| a.url = v)
                        .short('u')
                        .description("repository to clone"),
                )
                .field(ArgumentField::nullable("Depth", |a: &mut Self, v| a.depth = v).optional())
        }
    }

    struct CloneCommand;

    impl Command for CloneCommand {
        type Arguments = CloneArguments;
        const DESCRIPTION: Option<&'static str> = Some("Clone a repository");

        fn execute(&mut self, _: CloneArguments) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct Renamed;

    impl Command for Renamed {
        type Arguments = ();
        const NAME: Option<&'static str> = Some("ls-remote");

        fn execute(&mut self, _: ()) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct BadName;

    impl Command for BadName {
        type Arguments = ();
        const NAME: Option<&'static str> = Some("9lives");

        fn execute(&mut self, _: ()) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct BadArguments;

    impl CommandArguments for BadArguments {
        fn schema() -> ArgumentSchema<Self> {
            ArgumentSchema::new().field(ArgumentField::flag("Quiet", |_: &mut Self, _| {}).short('-'))
        }
    }

    struct BadArgumentsCommand;

    impl Command for BadArgumentsCommand {
        type Arguments = BadArguments;

        fn execute(&mut self, _: BadArguments) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_metadata_of_command() {
        let meta = CommandMetaData::of::<CloneCommand>().unwrap();
        assert_eq!(meta.name, "clone");
        assert_eq!(meta.description.as_deref(), Some("Clone a repository"));
        assert_eq!(meta.command_type, TypeKey::of::<CloneCommand>());
        assert_eq!(meta.arguments_type, TypeKey::of::<CloneArguments>());
        assert_eq!(meta.long_names(), vec!["url", "depth"]);
        assert!(meta.arguments[0].is_required);
        assert!(!meta.arguments[1].is_required);
    }

    #[test]
    fn test_explicit_name_wins() {
        assert_eq!(CommandMetaData::of::<Renamed>().unwrap().name, "ls-remote");
    }

    #[test]
    fn test_name_must_start_with_letter() {
        let err = CommandMetaData::of::<BadName>().unwrap_err();
        assert!(matches!(err, MetadataError::InvalidCommandName { ref name, .. } if name == "9lives"));
    }

    #[test]
    fn test_invalid_argument_declaration() {
        let err = CommandMetaData::of::<BadArgumentsCommand>().unwrap_err();
        assert!(matches!(
            err,
            MetadataError::Argument {
                source: DeclarationError::InvalidShortName { short: '-', .. },
                ..
            }
        ));
    }

    #[test]
    fn test_equality_by_command_type() {
        let mut a = CommandMetaData::of::<CloneCommand>().unwrap();
        let b = CommandMetaData::of::<CloneCommand>().unwrap();
        a.description = None;
        assert_eq!(a, b);
        assert_ne!(a, CommandMetaData::of::<Renamed>().unwrap());
    }

    #[test]
    fn test_serializes_type_names() {
        let meta = CommandMetaData::of::<Renamed>().unwrap();
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["name"], "ls-remote");
        assert_eq!(json["arguments_type"], "()");
        assert!(json["command_type"].as_str().unwrap().ends_with("Renamed"));
    }
}
