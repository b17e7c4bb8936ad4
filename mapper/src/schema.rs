//! Declarative argument schemas.
//!
//! A schema is plain data: a list of [`ArgumentField`]s, each holding its
//! [`ArgumentMetaData`] and a typed setter that writes a coerced value into
//! the target struct. Nothing is discovered by reflection.

use std::any::type_name;
use std::fmt;
use std::str::FromStr;

use crate::coercion::Coercion;
use crate::error::MappingError;
use crate::metadata::ArgumentMetaData;
use crate::parsers::{ValueParsers, parse_bool};

type Assign<A> = Box<dyn Fn(&mut A, &str, &ValueParsers) -> Result<(), MappingError>>;

/// Types that can be populated from command-line arguments.
///
/// # Examples
///
/// ```
/// use command_dispatch_mapper::{ArgumentField, ArgumentSchema, CommandArguments};
///
/// #[derive(Debug, Default)]
/// struct CopyArguments {
///     source: String,
///     force: bool,
///     retries: Option<u32>,
/// }
///
/// impl CommandArguments for CopyArguments {
///     fn schema() -> ArgumentSchema<Self> {
///         ArgumentSchema::new()
///             .field(ArgumentField::value("Source", |a: &mut Self, v: String| a.source = v).short('s'))
///             .field(ArgumentField::flag("Force", |a: &mut Self, v| a.force = v).short('f'))
///             .field(ArgumentField::nullable("Retries", |a: &mut Self, v| a.retries = v).optional())
///     }
/// }
///
/// let schema = CopyArguments::schema();
/// assert_eq!(schema.long_names(), vec!["source", "force", "retries"]);
/// ```
pub trait CommandArguments: Default + 'static {
    fn schema() -> ArgumentSchema<Self>;
}

impl CommandArguments for () {
    fn schema() -> ArgumentSchema<Self> {
        ArgumentSchema::new()
    }
}

/// Whether a field is a presence flag or takes a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Boolean presence flag: an empty value means `true`, absence means
    /// `false`.
    Flag,
    /// Any other value type.
    Value,
}

/// One declared argument field of target type `A`.
pub struct ArgumentField<A> {
    metadata: ArgumentMetaData,
    kind: FieldKind,
    assign: Option<Assign<A>>,
}

impl<A: 'static> ArgumentField<A> {
    /// Boolean presence flag. Flags are never required: absent flags are set
    /// to `false`.
    pub fn flag(field_name: &str, set: impl Fn(&mut A, bool) + 'static) -> Self {
        let coercion = Coercion::<bool>::new().then("bool", parse_bool);
        let mut field = Self::build(
            field_name,
            type_name::<bool>(),
            FieldKind::Flag,
            Some(Box::new(move |target: &mut A, text: &str, parsers: &ValueParsers| {
                let value = if text.is_empty() {
                    true
                } else {
                    coercion.coerce(text, parsers)?
                };
                set(target, value);
                Ok(())
            })),
        );
        field.metadata.is_required = false;
        field
    }

    /// Value field converted with the registered parser, then [`FromStr`].
    pub fn value<V>(field_name: &str, set: impl Fn(&mut A, V) + 'static) -> Self
    where
        V: FromStr + 'static,
    {
        Self::with_coercion(field_name, Coercion::new().parsed(), set)
    }

    /// Value field with an explicit conversion chain.
    pub fn with_coercion<V: 'static>(
        field_name: &str,
        coercion: Coercion<V>,
        set: impl Fn(&mut A, V) + 'static,
    ) -> Self {
        Self::build(
            field_name,
            type_name::<V>(),
            FieldKind::Value,
            Some(Box::new(move |target: &mut A, text: &str, parsers: &ValueParsers| {
                set(target, coercion.coerce(text, parsers)?);
                Ok(())
            })),
        )
    }

    /// `Option<V>` field: the text is converted to `V` and wrapped in `Some`.
    pub fn nullable<V>(field_name: &str, set: impl Fn(&mut A, Option<V>) + 'static) -> Self
    where
        V: FromStr + 'static,
    {
        Self::nullable_with_coercion(field_name, Coercion::new().parsed(), set)
    }

    pub fn nullable_with_coercion<V: 'static>(
        field_name: &str,
        coercion: Coercion<V>,
        set: impl Fn(&mut A, Option<V>) + 'static,
    ) -> Self {
        let mut field = Self::with_coercion(field_name, coercion, move |target, value| {
            set(target, Some(value))
        });
        field.metadata.field_type = type_name::<Option<V>>().to_string();
        field
    }

    /// Declares a field of type `V` without any way to write it.
    ///
    /// Mapping a schema that contains such a field fails with
    /// [`MappingError::UnavailableWriteAccess`].
    pub fn declared<V: 'static>(field_name: &str) -> Self {
        Self::build(field_name, type_name::<V>(), FieldKind::Value, None)
    }

    fn build(
        field_name: &str,
        field_type: &str,
        kind: FieldKind,
        assign: Option<Assign<A>>,
    ) -> Self {
        Self {
            metadata: ArgumentMetaData::new(field_name, field_type),
            kind,
            assign,
        }
    }
}

impl<A> ArgumentField<A> {
    /// Overrides the long name (defaults to the lowercased field name).
    pub fn long(mut self, long_name: &str) -> Self {
        self.metadata.long_name = long_name.to_string();
        self
    }

    pub fn short(mut self, short_name: char) -> Self {
        self.metadata.short_name = Some(short_name);
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.metadata.description = Some(description.to_string());
        self
    }

    /// Marks the field optional; absent values leave the target untouched
    /// (flags are still set to `false`).
    pub fn optional(mut self) -> Self {
        self.metadata.is_required = false;
        self
    }

    pub fn metadata(&self) -> &ArgumentMetaData {
        &self.metadata
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn is_writable(&self) -> bool {
        self.assign.is_some()
    }

    pub(crate) fn assign(
        &self,
        target: &mut A,
        text: &str,
        parsers: &ValueParsers,
    ) -> Result<(), MappingError> {
        let assign = self
            .assign
            .as_ref()
            .ok_or_else(|| MappingError::UnavailableWriteAccess {
                field: self.metadata.field_name.clone(),
            })?;
        assign(target, text, parsers)
    }
}

impl<A> fmt::Debug for ArgumentField<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentField")
            .field("metadata", &self.metadata)
            .field("kind", &self.kind)
            .field("writable", &self.assign.is_some())
            .finish()
    }
}

/// Ordered set of fields describing the arguments of target type `A`.
pub struct ArgumentSchema<A> {
    fields: Vec<ArgumentField<A>>,
    command: Option<String>,
}

impl<A> ArgumentSchema<A> {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            command: None,
        }
    }

    pub fn field(mut self, field: ArgumentField<A>) -> Self {
        self.fields.push(field);
        self
    }

    /// Names the command this schema belongs to, for error reporting.
    pub fn for_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn fields(&self) -> &[ArgumentField<A>] {
        &self.fields
    }

    pub fn metadata(&self) -> Vec<ArgumentMetaData> {
        self.fields.iter().map(|f| f.metadata.clone()).collect()
    }

    pub fn long_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .map(|f| f.metadata.long_name.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<A> Default for ArgumentSchema<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for ArgumentSchema<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSchema")
            .field("command", &self.command)
            .field("fields", &self.fields)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Target {
        name: String,
        verbose: bool,
        count: Option<i32>,
    }

    #[test]
    fn test_builder_sets_metadata() {
        let field = ArgumentField::value("Name", |t: &mut Target, v: String| t.name = v)
            .long("title")
            .short('t')
            .description("display name")
            .optional();
        let meta = field.metadata();
        assert_eq!(meta.field_name, "Name");
        assert_eq!(meta.field_type, "alloc::string::String");
        assert_eq!(meta.long_name, "title");
        assert_eq!(meta.short_name, Some('t'));
        assert_eq!(meta.description.as_deref(), Some("display name"));
        assert!(!meta.is_required);
        assert_eq!(field.kind(), FieldKind::Value);
    }

    #[test]
    fn test_flag_assign() {
        let field = ArgumentField::flag("Verbose", |t: &mut Target, v| t.verbose = v);
        assert!(!field.metadata().is_required);
        let parsers = ValueParsers::empty();
        let mut target = Target::default();

        field.assign(&mut target, "", &parsers).unwrap();
        assert!(target.verbose);
        field.assign(&mut target, "FALSE", &parsers).unwrap();
        assert!(!target.verbose);
        assert!(field.assign(&mut target, "maybe", &parsers).is_err());
    }

    #[test]
    fn test_nullable_wraps_value() {
        let field = ArgumentField::nullable("Count", |t: &mut Target, v| t.count = v);
        assert_eq!(field.metadata().field_type, "core::option::Option<i32>");

        let mut target = Target::default();
        field.assign(&mut target, "12", &ValueParsers::new()).unwrap();
        assert_eq!(target.count, Some(12));
    }

    #[test]
    fn test_declared_field_is_not_writable() {
        let field = ArgumentField::<Target>::declared::<String>("Name");
        assert!(!field.is_writable());
        let err = field
            .assign(&mut Target::default(), "x", &ValueParsers::new())
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::UnavailableWriteAccess {
                field: "Name".into()
            }
        );
    }

    #[test]
    fn test_unit_schema_is_empty() {
        assert!(<() as CommandArguments>::schema().is_empty());
    }
}
