//! Schema-validating mapping of parsed flags onto typed argument structs.
//!
//! An argument struct describes itself through [`CommandArguments::schema`],
//! an explicit [`ArgumentSchema`] value listing each [`ArgumentField`]: its
//! long name, optional short name, description, required flag and a typed
//! setter. The [`ArgumentMapper`] then binds a list of
//! [`Argument`](command_dispatch_core::Argument)s onto a target:
//!
//! - fields match by long name (case-insensitive) or short name
//!   (case-sensitive);
//! - duplicate inputs, ambiguous schemas, unwritable fields, missing
//!   required fields and leftover inputs are rejected with a
//!   [`MappingError`];
//! - values are coerced by the [`ValueParsers`] registry first, then by the
//!   field's [`Coercion`] chain.
//!
//! # Example
//!
//! ```
//! use command_dispatch_core::{Argument, parse};
//! use command_dispatch_mapper::*;
//!
//! #[derive(Debug, Default)]
//! struct Deploy {
//!     target: String,
//!     replicas: u16,
//!     dry_run: bool,
//! }
//!
//! impl CommandArguments for Deploy {
//!     fn schema() -> ArgumentSchema<Self> {
//!         ArgumentSchema::new()
//!             .field(ArgumentField::value("Target", |d: &mut Self, v: String| d.target = v).short('t'))
//!             .field(ArgumentField::value("Replicas", |d: &mut Self, v| d.replicas = v).short('r'))
//!             .field(ArgumentField::flag("DryRun", |d: &mut Self, v| d.dry_run = v).short('n').optional())
//!     }
//! }
//!
//! let parsed = parse("deploy -t prod -nr 3").unwrap().unwrap();
//! let deploy: Deploy = ArgumentMapper::default().map_new(&parsed.arguments).unwrap();
//! assert_eq!(deploy.target, "prod");
//! assert_eq!(deploy.replicas, 3);
//! assert!(deploy.dry_run);
//! ```

mod coercion;
mod error;
mod mapper;
mod metadata;
mod parsers;
mod schema;

pub use coercion::{Coercion, Conversion};
pub use error::{DeclarationError, MappingError};
pub use mapper::ArgumentMapper;
pub use metadata::ArgumentMetaData;
pub use parsers::{ValueParsers, parse_bool};
pub use schema::{ArgumentField, ArgumentSchema, CommandArguments, FieldKind};
