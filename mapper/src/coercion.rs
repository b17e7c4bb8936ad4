//! Ordered text-to-value conversion chains.
//!
//! A [`Coercion`] first asks the [`ValueParsers`] registry for a parser of
//! the exact target type, then tries its own steps in the order they were
//! added. The first step that produces a value wins.

use std::any::type_name;
use std::fmt;
use std::str::FromStr;

use crate::error::MappingError;
use crate::parsers::ValueParsers;

/// A single fallback conversion.
pub type Conversion<V> = fn(&str) -> Option<V>;

struct Step<V> {
    name: &'static str,
    convert: Conversion<V>,
}

/// Conversion chain for values of type `V`.
///
/// # Examples
///
/// ```
/// use command_dispatch_mapper::{Coercion, ValueParsers};
///
/// #[derive(Debug, PartialEq)]
/// struct Label(String);
///
/// impl From<String> for Label {
///     fn from(text: String) -> Self {
///         Label(text)
///     }
/// }
///
/// let coercion = Coercion::<Label>::new().constructed();
/// let label = coercion.coerce("release", &ValueParsers::new()).unwrap();
/// assert_eq!(label, Label("release".into()));
///
/// let numbers = Coercion::<i64>::new().parsed();
/// assert!(numbers.coerce("twelve", &ValueParsers::new()).is_err());
/// ```
pub struct Coercion<V> {
    steps: Vec<Step<V>>,
}

impl<V: 'static> Coercion<V> {
    /// Chain that only consults the registered parsers.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends the generic conversion: [`FromStr`].
    pub fn parsed(self) -> Self
    where
        V: FromStr,
    {
        let convert: Conversion<V> = parse_text::<V>;
        self.then("parse", convert)
    }

    /// Appends the try-parse convention: `TryFrom<&str>`.
    pub fn try_from_text(self) -> Self
    where
        V: for<'a> TryFrom<&'a str>,
    {
        let convert: Conversion<V> = try_from_text::<V>;
        self.then("try_from", convert)
    }

    /// Appends single-argument construction: `From<String>`.
    pub fn constructed(self) -> Self
    where
        V: From<String>,
    {
        let convert: Conversion<V> = construct_from_text::<V>;
        self.then("construct", convert)
    }

    /// Appends a custom named step.
    pub fn then(mut self, name: &'static str, convert: Conversion<V>) -> Self {
        self.steps.push(Step { name, convert });
        self
    }

    /// Step names after the registered-parser lookup, in order.
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name).collect()
    }

    /// Converts `text`, trying the registered parser first.
    ///
    /// # Errors
    ///
    /// [`MappingError::UnsupportedConversion`] when every step declines.
    pub fn coerce(&self, text: &str, parsers: &ValueParsers) -> Result<V, MappingError> {
        if let Some(value) = parsers.try_parse::<V>(text) {
            return Ok(value);
        }
        self.steps
            .iter()
            .find_map(|step| (step.convert)(text))
            .ok_or_else(|| MappingError::UnsupportedConversion {
                value: text.to_string(),
                target_type: type_name::<V>(),
            })
    }
}

impl<V: 'static> Default for Coercion<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Coercion<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coercion")
            .field("target", &type_name::<V>())
            .field(
                "steps",
                &self.steps.iter().map(|step| step.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn parse_text<V: FromStr>(text: &str) -> Option<V> {
    text.parse().ok()
}

fn try_from_text<V>(text: &str) -> Option<V>
where
    V: for<'a> TryFrom<&'a str>,
{
    V::try_from(text).ok()
}

fn construct_from_text<V: From<String>>(text: &str) -> Option<V> {
    Some(V::from(text.to_string()))
}
