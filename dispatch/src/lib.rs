//! Route registry and dispatch engine.
//!
//! Commands implement [`Command`] with an argument type that describes its
//! own schema. A [`Dispatcher`] keeps a [`RouteTable`] from command paths to
//! [`CommandMetaData`] and a [`CommandRegistry`] from names to
//! implementations. Dispatching a line:
//!
//! 1. splits it into a [`Path`](command_dispatch_core::Path) and argument
//!    segments;
//! 2. looks the path up among the routes;
//! 3. reads the arguments, keeping single-dash words whole when the command
//!    declares them ([`BundlingConfig`]);
//! 4. asks the [`InstanceResolver`] for an instance, and releases it when the
//!    dispatch ends;
//! 5. maps the arguments and executes the command;
//! 6. turns a command failure into a code via [`ErrorHandlers`].
//!
//! # Example
//!
//! ```
//! use command_dispatch_engine::{Command, Dispatcher, FactoryResolver};
//! use command_dispatch_mapper::{ArgumentField, ArgumentSchema, CommandArguments};
//!
//! #[derive(Debug, Default)]
//! struct AddArguments {
//!     name: String,
//!     url: String,
//! }
//!
//! impl CommandArguments for AddArguments {
//!     fn schema() -> ArgumentSchema<Self> {
//!         ArgumentSchema::new()
//!             .field(ArgumentField::value("Name", |a: &mut Self, v: String| a.name = v))
//!             .field(ArgumentField::value("Url", |a: &mut Self, v: String| a.url = v))
//!     }
//! }
//!
//! #[derive(Default)]
//! struct RemoteAddCommand;
//!
//! impl Command for RemoteAddCommand {
//!     type Arguments = AddArguments;
//!
//!     fn execute(&mut self, arguments: AddArguments) -> anyhow::Result<()> {
//!         anyhow::ensure!(arguments.url.contains("://"), "not a URL: {}", arguments.url);
//!         Ok(())
//!     }
//! }
//!
//! let mut dispatcher =
//!     Dispatcher::new(FactoryResolver::new().with_default::<RemoteAddCommand>());
//! dispatcher.register_route::<RemoteAddCommand>("remote add").unwrap();
//!
//! let code = dispatcher
//!     .dispatch(r#"remote add --name origin --url "https://example.com/repo.git""#)
//!     .unwrap();
//! assert_eq!(code, Some(0));
//! ```

mod command;
mod config;
mod engine;
mod error;
mod handlers;
mod metadata;
mod registry;
mod resolver;
mod route;

pub use command::{Command, ErasedCommand, InvokeError, TypeKey};
pub use config::{BundlingConfig, DispatchConfig};
pub use engine::{DispatchState, Dispatcher};
pub use error::{ConfigError, DispatchError, MetadataError, RegistrationError, Result};
pub use handlers::ErrorHandlers;
pub use metadata::{CommandMetaData, derive_command_name};
pub use registry::{CommandLookup, CommandRegistration, CommandRegistry};
pub use resolver::{FactoryResolver, InstanceResolver};
pub use route::{Route, RouteTable};
