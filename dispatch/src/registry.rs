//! Command registrations keyed by command name.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::command::TypeKey;
use crate::error::RegistrationError;
use crate::metadata::CommandMetaData;

/// One name-to-implementation binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRegistration {
    pub command_name: String,
    pub arguments_type: TypeKey,
    pub implementation: TypeKey,
}

impl CommandRegistration {
    pub fn from_metadata(metadata: &CommandMetaData) -> Self {
        Self {
            command_name: metadata.name.clone(),
            arguments_type: metadata.arguments_type,
            implementation: metadata.command_type,
        }
    }
}

/// Read access to registrations by command name.
pub trait CommandLookup {
    /// Finds the registration for `name`, ignoring case.
    fn find(&self, name: &str) -> Option<&CommandRegistration>;
}

/// Name-indexed registrations.
///
/// Registering the same implementation twice is a no-op; binding a name
/// that is already taken by another implementation is an error.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    by_name: HashMap<String, CommandRegistration>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the name in `metadata` to its command type.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::DuplicateCommandName`] when the name already
    /// belongs to a different implementation.
    pub fn register(
        &mut self,
        metadata: &CommandMetaData,
    ) -> Result<CommandRegistration, RegistrationError> {
        if let Some(existing) = self.check(metadata)? {
            debug!(name = %metadata.name, "Command already registered");
            return Ok(existing.clone());
        }

        let registration = CommandRegistration::from_metadata(metadata);
        debug!(
            name = %registration.command_name,
            implementation = %registration.implementation,
            "Registered command"
        );
        self.by_name
            .insert(metadata.name.to_lowercase(), registration.clone());
        Ok(registration)
    }

    /// Checks that `metadata` can be registered without changing anything.
    ///
    /// Returns the existing registration when the same implementation is
    /// already bound to the name.
    pub fn check(
        &self,
        metadata: &CommandMetaData,
    ) -> Result<Option<&CommandRegistration>, RegistrationError> {
        match self.by_name.get(&metadata.name.to_lowercase()) {
            Some(existing) if existing.implementation == metadata.command_type => Ok(Some(existing)),
            Some(existing) => Err(RegistrationError::DuplicateCommandName {
                name: metadata.name.clone(),
                existing: existing.implementation.name(),
                attempted: metadata.command_type.name(),
            }),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Registrations sorted by command name.
    pub fn registrations(&self) -> Vec<&CommandRegistration> {
        let mut registrations: Vec<_> = self.by_name.values().collect();
        registrations.sort_by(|a, b| a.command_name.cmp(&b.command_name));
        registrations
    }
}

impl CommandLookup for CommandRegistry {
    fn find(&self, name: &str) -> Option<&CommandRegistration> {
        self.by_name.get(&name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    struct StatusCommand;

    impl Command for StatusCommand {
        type Arguments = ();

        fn execute(&mut self, _: ()) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct OtherStatus;

    impl Command for OtherStatus {
        type Arguments = ();
        const NAME: Option<&'static str> = Some("Status");

        fn execute(&mut self, _: ()) -> anyhow::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_register_and_find() {
        let mut registry = CommandRegistry::new();
        let meta = CommandMetaData::of::<StatusCommand>().unwrap();
        let registration = registry.register(&meta).unwrap();

        assert_eq!(registration.command_name, "status");
        assert_eq!(registration.implementation, TypeKey::of::<StatusCommand>());
        assert_eq!(registration.arguments_type, TypeKey::of::<()>());
        assert_eq!(registry.find("STATUS"), Some(&registration));
        assert!(registry.find("stat").is_none());
    }

    #[test]
    fn test_same_implementation_is_idempotent() {
        let mut registry = CommandRegistry::new();
        let meta = CommandMetaData::of::<StatusCommand>().unwrap();
        let first = registry.register(&meta).unwrap();
        let second = registry.register(&meta).unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut registry = CommandRegistry::new();
        registry
            .register(&CommandMetaData::of::<StatusCommand>().unwrap())
            .unwrap();
        let err = registry
            .register(&CommandMetaData::of::<OtherStatus>().unwrap())
            .unwrap_err();

        match err {
            RegistrationError::DuplicateCommandName {
                name,
                existing,
                attempted,
            } => {
                assert_eq!(name, "Status");
                assert!(existing.ends_with("StatusCommand"));
                assert!(attempted.ends_with("OtherStatus"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(registry.len(), 1);
    }
}
