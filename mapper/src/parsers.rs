//! Registry of per-type value parsers.
//!
//! Parsers are looked up by the exact target type and always run before a
//! field's fallback conversions. The registry is passed to the mapper at
//! construction; there is no global default instance.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

type ErasedParser = Box<dyn Fn(&str) -> Option<Box<dyn Any>>>;

struct RegisteredParser {
    type_name: &'static str,
    parse: ErasedParser,
}

/// Typed lookup table of `text -> value` parsers.
///
/// # Examples
///
/// ```
/// use command_dispatch_mapper::ValueParsers;
///
/// let mut parsers = ValueParsers::new();
/// assert_eq!(parsers.try_parse::<bool>("TRUE"), Some(true));
/// assert!(parsers.try_parse::<uuid::Uuid>("not-a-uuid").is_none());
///
/// parsers.register::<u8>(|text| text.strip_prefix("0x").and_then(|hex| u8::from_str_radix(hex, 16).ok()));
/// assert_eq!(parsers.try_parse::<u8>("0xff"), Some(255));
/// ```
pub struct ValueParsers {
    parsers: HashMap<TypeId, RegisteredParser>,
}

impl ValueParsers {
    /// Registry with the built-in parsers for `bool` and [`Uuid`].
    pub fn new() -> Self {
        let mut parsers = Self::empty();
        parsers.register::<bool>(parse_bool);
        parsers.register::<Uuid>(|text| Uuid::parse_str(text).ok());
        parsers
    }

    /// Registry with no parsers at all.
    pub fn empty() -> Self {
        Self {
            parsers: HashMap::new(),
        }
    }

    /// Registers (or replaces) the parser for `T`.
    pub fn register<T: 'static>(
        &mut self,
        parser: impl Fn(&str) -> Option<T> + 'static,
    ) -> &mut Self {
        self.parsers.insert(
            TypeId::of::<T>(),
            RegisteredParser {
                type_name: type_name::<T>(),
                parse: Box::new(move |text: &str| {
                    parser(text).map(|value| Box::new(value) as Box<dyn Any>)
                }),
            },
        );
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<T: 'static>(mut self, parser: impl Fn(&str) -> Option<T> + 'static) -> Self {
        self.register(parser);
        self
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.parsers.contains_key(&TypeId::of::<T>())
    }

    /// Runs the parser registered for `T`.
    ///
    /// Returns `None` when no parser is registered or the parser rejects
    /// the text.
    pub fn try_parse<T: 'static>(&self, text: &str) -> Option<T> {
        let parser = self.parsers.get(&TypeId::of::<T>())?;
        let value = (parser.parse)(text)?;
        value.downcast::<T>().ok().map(|value| *value)
    }

    /// Names of the types with a registered parser, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.parsers.values().map(|p| p.type_name).collect();
        names.sort_unstable();
        names
    }
}

impl Default for ValueParsers {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ValueParsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueParsers")
            .field("types", &self.registered_types())
            .finish()
    }
}

/// `true`/`false`, ignoring ASCII case and surrounding whitespace.
pub fn parse_bool(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins() {
        let parsers = ValueParsers::new();
        assert!(parsers.contains::<bool>());
        assert!(parsers.contains::<Uuid>());
        assert_eq!(parsers.try_parse::<bool>("False"), Some(false));
        assert_eq!(parsers.try_parse::<bool>("yes"), None);

        let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert_eq!(
            parsers.try_parse::<Uuid>(id),
            Some(Uuid::parse_str(id).unwrap())
        );
    }

    #[test]
    fn test_empty_has_no_parsers() {
        let parsers = ValueParsers::empty();
        assert!(!parsers.contains::<bool>());
        assert_eq!(parsers.try_parse::<bool>("true"), None);
        assert!(parsers.registered_types().is_empty());
    }

    #[test]
    fn test_register_replaces_existing() {
        let parsers = ValueParsers::new().with::<bool>(|text| Some(text == "on"));
        assert_eq!(parsers.try_parse::<bool>("on"), Some(true));
        assert_eq!(parsers.try_parse::<bool>("true"), Some(false));
    }

    #[test]
    fn test_lookup_is_by_exact_type() {
        let parsers = ValueParsers::empty().with::<u32>(|text| text.parse().ok());
        assert_eq!(parsers.try_parse::<u32>("7"), Some(7));
        assert_eq!(parsers.try_parse::<u64>("7"), None);
    }
}
