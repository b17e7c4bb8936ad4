//! The dispatcher: from a raw line to a return code.

use std::error::Error as StdError;
use std::fmt;

use command_dispatch_core::{ArgumentReader, CommandLine, Path, SegmentReader};
use command_dispatch_mapper::{ArgumentMapper, ValueParsers};
use scopeguard::guard;
use tracing::{debug, warn};

use crate::command::{Command, ErasedCommand, InvokeError};
use crate::config::DispatchConfig;
use crate::error::{DispatchError, RegistrationError, Result};
use crate::handlers::ErrorHandlers;
use crate::metadata::CommandMetaData;
use crate::registry::{CommandLookup, CommandRegistration, CommandRegistry};
use crate::resolver::InstanceResolver;
use crate::route::{Route, RouteTable};

/// Stages of a single dispatch, as reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    /// No dispatch in progress; blank input leaves the dispatcher here.
    Idle,
    Resolving,
    Instantiating,
    Mapping,
    Executing,
    Succeeded,
    Failed,
}

impl fmt::Display for DispatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Resolving => "resolving",
            Self::Instantiating => "instantiating",
            Self::Mapping => "mapping",
            Self::Executing => "executing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Routes command lines to registered commands.
///
/// # Examples
///
/// ```
/// use command_dispatch_engine::{Command, Dispatcher, FactoryResolver};
/// use command_dispatch_mapper::{ArgumentField, ArgumentSchema, CommandArguments};
///
/// #[derive(Debug, Default)]
/// struct ShowArguments {
///     id: u32,
/// }
///
/// impl CommandArguments for ShowArguments {
///     fn schema() -> ArgumentSchema<Self> {
///         ArgumentSchema::new().field(ArgumentField::value("Id", |a: &mut Self, v| a.id = v))
///     }
/// }
///
/// #[derive(Default)]
/// struct ShowCommand;
///
/// impl Command for ShowCommand {
///     type Arguments = ShowArguments;
///
///     fn execute(&mut self, arguments: ShowArguments) -> anyhow::Result<()> {
///         anyhow::ensure!(arguments.id > 0, "ids start at 1");
///         Ok(())
///     }
/// }
///
/// let mut dispatcher = Dispatcher::new(FactoryResolver::new().with_default::<ShowCommand>());
/// dispatcher.register::<ShowCommand>().unwrap();
///
/// assert_eq!(dispatcher.dispatch("show -id 1").unwrap(), Some(0));
/// assert_eq!(dispatcher.dispatch("show --id 0").unwrap(), Some(1));
/// assert_eq!(dispatcher.dispatch("   ").unwrap(), None);
/// assert!(dispatcher.dispatch("hide").is_err());
/// ```
pub struct Dispatcher {
    config: DispatchConfig,
    segment_reader: SegmentReader,
    mapper: ArgumentMapper,
    registry: CommandRegistry,
    routes: RouteTable,
    handlers: ErrorHandlers,
    resolver: Box<dyn InstanceResolver>,
}

impl Dispatcher {
    pub fn new(resolver: impl InstanceResolver + 'static) -> Self {
        Self {
            config: DispatchConfig::default(),
            segment_reader: SegmentReader::new(),
            mapper: ArgumentMapper::default(),
            registry: CommandRegistry::new(),
            routes: RouteTable::new(),
            handlers: ErrorHandlers::new(),
            resolver: Box::new(resolver),
        }
    }

    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the value parsers used when mapping arguments.
    pub fn with_parsers(mut self, parsers: ValueParsers) -> Self {
        self.mapper = ArgumentMapper::new(parsers);
        self
    }

    pub fn with_error_handlers(mut self, handlers: ErrorHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    /// Adds an error handler for command failures of type `E`.
    pub fn on_error<E>(mut self, handler: impl Fn(&E) -> i32 + 'static) -> Self
    where
        E: StdError + 'static,
    {
        self.handlers.register(handler);
        self
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Registers `C` under its command name.
    ///
    /// Registering the same command again is a no-op.
    ///
    /// # Errors
    ///
    /// Invalid metadata, or a name or path already bound to another command.
    pub fn register<C: Command>(&mut self) -> std::result::Result<Route, RegistrationError> {
        let metadata = CommandMetaData::of::<C>()?;
        let path = Path::new(metadata.name.as_str())?;
        self.add_route(path, metadata)
    }

    /// Registers `C` under its command name and routes `path` to it.
    ///
    /// `path` uses the [`Path::parse`] forms, e.g. `"remote add"`.
    pub fn register_route<C: Command>(
        &mut self,
        path: &str,
    ) -> std::result::Result<Route, RegistrationError> {
        let metadata = CommandMetaData::of::<C>()?;
        let path = Path::parse(path)?;
        self.add_route(path, metadata)
    }

    fn add_route(
        &mut self,
        path: Path,
        metadata: CommandMetaData,
    ) -> std::result::Result<Route, RegistrationError> {
        // Both tables are checked before either one changes.
        self.registry.check(&metadata)?;
        let route = Route::new(path, metadata);
        self.routes.check(&route)?;

        self.registry.register(&route.command)?;
        self.routes.add(route.clone())?;
        Ok(route)
    }

    /// Registered routes, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Finds a registration by command name.
    pub fn find(&self, name: &str) -> Option<&CommandRegistration> {
        self.registry.find(name)
    }

    /// Parses `raw`, runs the routed command and returns its code.
    ///
    /// Returns `Ok(None)` for blank input. A failing command yields the code
    /// of the first matching error handler, or the configured error code.
    ///
    /// # Errors
    ///
    /// Parse and mapping errors, unknown paths, and resolvers that return no
    /// instance. The command body does not run in any of these cases.
    pub fn dispatch(&self, raw: &str) -> Result<Option<i32>> {
        let Some(line) = CommandLine::split_with(&self.segment_reader, raw)? else {
            debug!(state = %DispatchState::Idle, "Blank input, nothing to dispatch");
            return Ok(None);
        };

        debug!(state = %DispatchState::Resolving, path = %line.path);
        let route = self
            .routes
            .find(&line.path)
            .ok_or_else(|| DispatchError::CommandNotFound {
                path: line.path.clone(),
            })?;
        let command = &route.command;

        let reader = ArgumentReader::with_bundling(self.config.bundling.for_command(command));
        let arguments = line.read_arguments(&reader)?;

        debug!(state = %DispatchState::Instantiating, command = %command.command_type);
        let instance = self.resolver.resolve(&command.command_type).ok_or(
            DispatchError::InstanceUnavailable {
                command: command.command_type.name(),
            },
        )?;
        let mut instance = guard(instance, |instance| self.resolver.release(instance));

        debug!(
            state = %DispatchState::Mapping,
            command = %command.name,
            arguments = arguments.len()
        );
        match instance.invoke(&command.name, &arguments, &self.mapper) {
            Ok(()) => {
                debug!(state = %DispatchState::Succeeded, command = %command.name);
                Ok(Some(self.config.success_code))
            }
            Err(InvokeError::Mapping(err)) => {
                debug!(state = %DispatchState::Failed, command = %command.name, error = %err);
                Err(err.into())
            }
            Err(InvokeError::Execution(err)) => {
                let code = self
                    .handlers
                    .classify(&err)
                    .unwrap_or(self.config.error_code);
                warn!(
                    state = %DispatchState::Failed,
                    command = %command.name,
                    code,
                    error = %format!("{err:#}"),
                    "Command failed"
                );
                Ok(Some(code))
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("routes", &self.routes.len())
            .field("handlers", &self.handlers)
            .finish()
    }
}
