//! Binding parsed arguments onto argument structs.

use std::collections::{HashMap, HashSet};
use std::collections::hash_map::Entry;

use command_dispatch_core::Argument;
use tracing::{debug, trace};

use crate::error::MappingError;
use crate::parsers::ValueParsers;
use crate::schema::{ArgumentField, ArgumentSchema, CommandArguments, FieldKind};

/// Schema-validating mapper from [`Argument`]s to a target struct.
///
/// Every call re-validates the schema, so ambiguous declarations fail no
/// matter which arguments are supplied.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::Argument;
/// use command_dispatch_mapper::*;
///
/// #[derive(Debug, Default)]
/// struct FooArguments {
///     id: String,
///     quiet: bool,
/// }
///
/// impl CommandArguments for FooArguments {
///     fn schema() -> ArgumentSchema<Self> {
///         ArgumentSchema::new()
///             .field(ArgumentField::value("Id", |a: &mut Self, v: String| a.id = v))
///             .field(ArgumentField::flag("Quiet", |a: &mut Self, v| a.quiet = v).optional())
///     }
/// }
///
/// let mapper = ArgumentMapper::default();
/// let args: FooArguments = mapper.map_new(&[Argument::long("id", "1")]).unwrap();
/// assert_eq!(args.id, "1");
/// assert!(!args.quiet);
///
/// let err = mapper.map_new::<FooArguments>(&[]).unwrap_err();
/// assert!(matches!(err, MappingError::RequiredArgumentMissing { .. }));
/// ```
#[derive(Debug, Default)]
pub struct ArgumentMapper {
    parsers: ValueParsers,
}

impl ArgumentMapper {
    pub fn new(parsers: ValueParsers) -> Self {
        Self { parsers }
    }

    pub fn parsers(&self) -> &ValueParsers {
        &self.parsers
    }

    /// Creates a fresh `A` and maps `arguments` onto it.
    pub fn map_new<A: CommandArguments>(&self, arguments: &[Argument]) -> Result<A, MappingError> {
        let mut target = A::default();
        self.map(&A::schema(), &mut target, arguments)?;
        Ok(target)
    }

    /// Maps `arguments` onto an existing `target` using `schema`.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// 1. [`MappingError::AmbiguousArgumentDefinition`]: two fields share a
    ///    long name (ignoring case) or a short name.
    /// 2. [`MappingError::UnavailableWriteAccess`]: a field has no setter.
    /// 3. [`MappingError::ArgumentDeclaredMultipleTimes`]: an input name is
    ///    repeated, or two inputs match one field.
    /// 4. [`MappingError::RequiredArgumentMissing`] and
    ///    [`MappingError::UnsupportedConversion`] per field.
    /// 5. [`MappingError::UnknownArguments`] for unconsumed inputs.
    pub fn map<A>(
        &self,
        schema: &ArgumentSchema<A>,
        target: &mut A,
        arguments: &[Argument],
    ) -> Result<(), MappingError> {
        check_ambiguity(schema.fields())?;
        check_write_access(schema.fields())?;
        check_repeated_inputs(arguments)?;

        let mut pending: Vec<&Argument> = arguments.iter().collect();
        for field in schema.fields() {
            self.bind_field(field, target, &mut pending)?;
        }

        if !pending.is_empty() {
            return Err(MappingError::UnknownArguments {
                command: schema.command().map(str::to_string),
                arguments: pending.into_iter().cloned().collect(),
            });
        }

        debug!(
            command = schema.command().unwrap_or_default(),
            fields = schema.fields().len(),
            arguments = arguments.len(),
            "Mapped arguments"
        );
        Ok(())
    }

    fn bind_field<A>(
        &self,
        field: &ArgumentField<A>,
        target: &mut A,
        pending: &mut Vec<&Argument>,
    ) -> Result<(), MappingError> {
        let meta = field.metadata();
        let matched: Vec<usize> = pending
            .iter()
            .enumerate()
            .filter(|(_, argument)| meta.matches(argument))
            .map(|(index, _)| index)
            .collect();

        match matched.as_slice() {
            [] if meta.is_required => Err(MappingError::RequiredArgumentMissing {
                name: meta.long_name.clone(),
            }),
            [] => {
                if field.kind() == FieldKind::Flag {
                    field.assign(target, "false", &self.parsers)?;
                }
                Ok(())
            }
            [index] => {
                let argument = pending.remove(*index);
                trace!(field = %meta.field_name, value = %argument.value, "Binding argument");
                field.assign(target, &argument.value, &self.parsers)
            }
            _ => Err(MappingError::ArgumentDeclaredMultipleTimes {
                name: meta.long_name.clone(),
            }),
        }
    }
}

fn check_ambiguity<A>(fields: &[ArgumentField<A>]) -> Result<(), MappingError> {
    let mut long_names: HashMap<String, &str> = HashMap::new();
    let mut short_names: HashMap<char, &str> = HashMap::new();

    for field in fields {
        let meta = field.metadata();
        match long_names.entry(meta.long_name.to_lowercase()) {
            Entry::Occupied(existing) => {
                return Err(MappingError::AmbiguousArgumentDefinition {
                    name: meta.long_name.clone(),
                    fields: vec![existing.get().to_string(), meta.field_name.clone()],
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(&meta.field_name);
            }
        }

        if let Some(short) = meta.short_name {
            match short_names.entry(short) {
                Entry::Occupied(existing) => {
                    return Err(MappingError::AmbiguousArgumentDefinition {
                        name: short.to_string(),
                        fields: vec![existing.get().to_string(), meta.field_name.clone()],
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(&meta.field_name);
                }
            }
        }
    }
    Ok(())
}

fn check_write_access<A>(fields: &[ArgumentField<A>]) -> Result<(), MappingError> {
    match fields.iter().find(|field| !field.is_writable()) {
        Some(field) => Err(MappingError::UnavailableWriteAccess {
            field: field.metadata().field_name.clone(),
        }),
        None => Ok(()),
    }
}

/// Short names group case-sensitively, long names case-insensitively.
fn check_repeated_inputs(arguments: &[Argument]) -> Result<(), MappingError> {
    let mut seen = HashSet::new();
    for argument in arguments {
        let key = if argument.is_short_name {
            (true, argument.name.clone())
        } else {
            (false, argument.name.to_lowercase())
        };
        if !seen.insert(key) {
            return Err(MappingError::ArgumentDeclaredMultipleTimes {
                name: argument.name.clone(),
            });
        }
    }
    Ok(())
}
