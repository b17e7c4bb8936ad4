//! Per-field argument descriptors.

use command_dispatch_core::Argument;
use serde::{Deserialize, Serialize};

use crate::error::DeclarationError;

/// Describes one declared argument field.
///
/// The long name defaults to the lowercased field name; the field is
/// required unless marked optional.
///
/// # Examples
///
/// ```
/// use command_dispatch_core::Argument;
/// use command_dispatch_mapper::ArgumentMetaData;
///
/// let meta = ArgumentMetaData::new("OutputDir", "String").with_short_name('o');
/// assert_eq!(meta.long_name, "outputdir");
/// assert!(meta.is_required);
///
/// assert!(meta.matches(&Argument::long("OUTPUTDIR", "x")));
/// assert!(meta.matches(&Argument::short("o", "x")));
/// assert!(!meta.matches(&Argument::short("O", "x")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentMetaData {
    pub field_name: String,
    pub field_type: String,
    pub long_name: String,
    pub short_name: Option<char>,
    pub description: Option<String>,
    pub is_required: bool,
}

impl ArgumentMetaData {
    pub fn new(field_name: impl Into<String>, field_type: impl Into<String>) -> Self {
        let field_name = field_name.into();
        Self {
            long_name: field_name.to_lowercase(),
            field_name,
            field_type: field_type.into(),
            short_name: None,
            description: None,
            is_required: true,
        }
    }

    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.long_name = long_name.into();
        self
    }

    pub fn with_short_name(mut self, short_name: char) -> Self {
        self.short_name = Some(short_name);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    /// Returns `true` if `argument` names this field.
    ///
    /// Long-style arguments compare against the long name ignoring case.
    /// Short-style arguments compare exactly, against either name.
    pub fn matches(&self, argument: &Argument) -> bool {
        let by_long = if argument.is_short_name {
            argument.name == self.long_name
        } else {
            argument.name.to_lowercase() == self.long_name.to_lowercase()
        };
        let by_short = self.short_name.is_some_and(|short| {
            let mut chars = argument.name.chars();
            chars.next() == Some(short) && chars.next().is_none()
        });
        by_long || by_short
    }

    /// Checks the names are usable on a command line.
    pub fn validate(&self) -> Result<(), DeclarationError> {
        if self.long_name.is_empty() {
            return Err(DeclarationError::EmptyLongName {
                field: self.field_name.clone(),
            });
        }
        if self.long_name.starts_with('-') || self.long_name.chars().any(char::is_whitespace) {
            return Err(DeclarationError::InvalidLongName {
                field: self.field_name.clone(),
                name: self.long_name.clone(),
            });
        }
        if let Some(short) = self.short_name {
            if !short.is_alphanumeric() {
                return Err(DeclarationError::InvalidShortName {
                    field: self.field_name.clone(),
                    short,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let meta = ArgumentMetaData::new("Id", "String");
        assert_eq!(meta.field_name, "Id");
        assert_eq!(meta.long_name, "id");
        assert_eq!(meta.short_name, None);
        assert!(meta.is_required);
    }

    #[test]
    fn test_long_name_override_matches_ignoring_case() {
        let meta = ArgumentMetaData::new("dir", "PathBuf").with_long_name("outDir");
        assert!(meta.matches(&Argument::long("outdir", "")));
        assert!(meta.matches(&Argument::long("OUTDIR", "")));
        assert!(!meta.matches(&Argument::long("dir", "")));
    }

    #[test]
    fn test_short_name_is_case_sensitive() {
        let lower = ArgumentMetaData::new("file", "String").with_short_name('f');
        let upper = ArgumentMetaData::new("force", "bool").with_short_name('F');
        let arg = Argument::short("F", "");
        assert!(!lower.matches(&arg));
        assert!(upper.matches(&arg));
    }

    #[test]
    fn test_short_style_argument_matches_long_name_exactly() {
        let meta = ArgumentMetaData::new("v", "bool");
        assert!(meta.matches(&Argument::short("v", "")));
        assert!(!meta.matches(&Argument::short("V", "")));
    }

    #[test]
    fn test_validate() {
        assert!(ArgumentMetaData::new("ok", "String").validate().is_ok());
        assert!(matches!(
            ArgumentMetaData::new("x", "String").with_long_name("").validate(),
            Err(DeclarationError::EmptyLongName { .. })
        ));
        assert!(matches!(
            ArgumentMetaData::new("x", "String").with_long_name("two words").validate(),
            Err(DeclarationError::InvalidLongName { .. })
        ));
        assert!(matches!(
            ArgumentMetaData::new("x", "String").with_short_name('-').validate(),
            Err(DeclarationError::InvalidShortName { short: '-', .. })
        ));
    }

    #[test]
    fn test_serializes_to_json() {
        let meta = ArgumentMetaData::new("Id", "String").with_short_name('i');
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["long_name"], "id");
        assert_eq!(json["short_name"], "i");
    }
}
