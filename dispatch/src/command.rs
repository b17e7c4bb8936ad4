//! The command contract and its type-erased form.

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};

use command_dispatch_core::Argument;
use command_dispatch_mapper::{ArgumentMapper, CommandArguments, MappingError};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::engine::DispatchState;

/// A command bound to one argument type.
///
/// The command name defaults to the type name with a trailing `Command`
/// removed, lowercased (see [`derive_command_name`](crate::derive_command_name)).
///
/// # Examples
///
/// ```
/// use command_dispatch_engine::Command;
/// use command_dispatch_mapper::{ArgumentField, ArgumentSchema, CommandArguments};
///
/// #[derive(Debug, Default)]
/// struct GreetArguments {
///     name: String,
/// }
///
/// impl CommandArguments for GreetArguments {
///     fn schema() -> ArgumentSchema<Self> {
///         ArgumentSchema::new().field(ArgumentField::value("Name", |a: &mut Self, v: String| a.name = v))
///     }
/// }
///
/// struct GreetCommand;
///
/// impl Command for GreetCommand {
///     type Arguments = GreetArguments;
///     const DESCRIPTION: Option<&'static str> = Some("Say hello");
///
///     fn execute(&mut self, arguments: GreetArguments) -> anyhow::Result<()> {
///         println!("hello {}", arguments.name);
///         Ok(())
///     }
/// }
/// ```
pub trait Command: 'static {
    type Arguments: CommandArguments;

    /// Explicit command name; derived from the type name when `None`.
    const NAME: Option<&'static str> = None;
    const DESCRIPTION: Option<&'static str> = None;

    fn execute(&mut self, arguments: Self::Arguments) -> anyhow::Result<()>;
}

/// Runtime identity of a Rust type, printed with its type name.
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for TypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// Which half of an invocation failed.
#[derive(Debug)]
pub enum InvokeError {
    /// The arguments could not be bound; the command body never ran.
    Mapping(MappingError),
    /// The command body returned an error.
    Execution(anyhow::Error),
}

/// Object-safe view of a [`Command`], as handed out by an
/// [`InstanceResolver`](crate::InstanceResolver).
///
/// Implemented for every `Command`; there is no reason to implement it by
/// hand.
pub trait ErasedCommand {
    fn command_type(&self) -> TypeKey;

    /// Maps `arguments` onto a fresh `Arguments` value and executes.
    fn invoke(
        &mut self,
        command_name: &str,
        arguments: &[Argument],
        mapper: &ArgumentMapper,
    ) -> Result<(), InvokeError>;
}

impl<C: Command> ErasedCommand for C {
    fn command_type(&self) -> TypeKey {
        TypeKey::of::<C>()
    }

    fn invoke(
        &mut self,
        command_name: &str,
        arguments: &[Argument],
        mapper: &ArgumentMapper,
    ) -> Result<(), InvokeError> {
        let schema = C::Arguments::schema().for_command(command_name);
        let mut bound = C::Arguments::default();
        mapper
            .map(&schema, &mut bound, arguments)
            .map_err(InvokeError::Mapping)?;

        debug!(state = %DispatchState::Executing, command = command_name);
        self.execute(bound).map_err(InvokeError::Execution)
    }
}
