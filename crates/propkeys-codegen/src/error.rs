//! Generation-time errors.

use std::{io, path::PathBuf};

/// Defect making a [declaration](crate::SchemaDeclaration) unusable for code generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaDefect {
    /// The key enumeration has no members.
    #[error("key enumeration has no members; at least the null key is required")]
    NoKeys,
    /// A key has an empty declared name.
    #[error("key #{ordinal} has an empty name")]
    EmptyKeyName {
        /// Ordinal of the key.
        ordinal: usize,
    },
    /// Two keys share the same declared name.
    #[error("key `{key}` is declared more than once")]
    DuplicateKey {
        /// Duplicated key name.
        key: String,
    },
    /// Two keys map to the same Rust variant identifier.
    #[error("keys `{first}` and `{second}` map to the same enum variant `{variant}`")]
    DuplicateVariant {
        /// First key.
        first: String,
        /// Second key.
        second: String,
        /// Shared variant identifier.
        variant: String,
    },
    /// More than one key is designated as the null key.
    #[error("keys `{first}` and `{second}` are both marked as the null key")]
    MultipleNullKeys {
        /// First null key.
        first: String,
        /// Second null key.
        second: String,
    },
    /// A customization refers to a key that is not declared.
    #[error("{hook} refers to undeclared key `{key}`")]
    UnknownKey {
        /// Customization hook referring to the key.
        hook: &'static str,
        /// Referenced key name.
        key: String,
    },
    /// A validator is attached to the null key, which is never validated.
    #[error("null key `{key}` cannot have a validator")]
    ValidatedNullKey {
        /// Null key name.
        key: String,
    },
    /// The properties path is empty.
    #[error("properties path is empty")]
    EmptyPropertiesPath,
    /// A string which must be a Rust identifier is not one.
    #[error("{what} `{value}` is not a valid Rust identifier")]
    InvalidIdentifier {
        /// What the identifier names.
        what: &'static str,
        /// Offending value.
        value: String,
    },
    /// A string which must be a Rust path is not one.
    #[error("{what} `{value}` is not a valid Rust path")]
    InvalidPath {
        /// What the path refers to.
        what: &'static str,
        /// Offending value.
        value: String,
    },
    /// A pass-through metadata tag cannot be placed into an attribute.
    #[error("metadata tag `{tag}` is not a valid attribute body")]
    InvalidMetadataTag {
        /// Offending tag.
        tag: String,
    },
    /// A pass-through metadata tag derives a trait that is always implemented for the provider.
    #[error("metadata tag `{tag}` derives `{derived}`, which is already implemented for the provider")]
    ConflictingMetadataTag {
        /// Offending tag.
        tag: String,
        /// Name of the conflicting trait.
        derived: &'static str,
    },
    /// Generated type names clash with each other.
    #[error("{first} and {second} are both named `{name}`")]
    TypeNameClash {
        /// First clashing type.
        first: &'static str,
        /// Second clashing type.
        second: &'static str,
        /// Shared name.
        name: String,
    },
    /// The naming strategy produced an empty external name.
    #[error("naming strategy maps key `{key}` to an empty property name")]
    EmptyExternalName {
        /// Key with the empty external name.
        key: String,
    },
}

impl SchemaDefect {
    fn key(&self) -> Option<&str> {
        match self {
            Self::DuplicateKey { key }
            | Self::UnknownKey { key, .. }
            | Self::ValidatedNullKey { key }
            | Self::EmptyExternalName { key } => Some(key),
            Self::DuplicateVariant { second, .. } | Self::MultipleNullKeys { second, .. } => {
                Some(second)
            }
            _ => None,
        }
    }
}

/// Errors aborting code generation. No code is produced if any of these occurs.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GenerationError {
    /// The declaration cannot be turned into a schema.
    #[error("malformed schema `{schema}`: {defect}")]
    MalformedSchema {
        /// Name of the key enumeration.
        schema: String,
        /// Specific defect.
        #[source]
        defect: SchemaDefect,
    },
    /// Two distinct keys resolve to the same external property name.
    #[error(
        "keys `{first_key}` and `{second_key}` of `{schema}` both resolve to property `{external_name}`"
    )]
    DuplicateExternalName {
        /// Name of the key enumeration.
        schema: String,
        /// Shared external name.
        external_name: String,
        /// Key declared first.
        first_key: String,
        /// Key declared second.
        second_key: String,
    },
    /// `OUT_DIR` is not set; [`Generator::write_to_out_dir()`](crate::Generator::write_to_out_dir()) can only be used
    /// from build scripts.
    #[error("`OUT_DIR` env var is not set; is the generator invoked outside a build script?")]
    MissingOutDir,
    /// Writing generated code has failed.
    #[error("failed writing generated code to `{}`", .path.display())]
    Io {
        /// Path to the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl GenerationError {
    pub(crate) fn malformed(schema: &str, defect: SchemaDefect) -> Self {
        Self::MalformedSchema {
            schema: schema.to_owned(),
            defect,
        }
    }

    /// Returns the declared name of the key this error concerns, if any. Useful to attribute the error
    /// to a specific location (e.g., an enum variant in derive macros).
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::MalformedSchema { defect, .. } => defect.key(),
            Self::DuplicateExternalName { second_key, .. } => Some(second_key),
            _ => None,
        }
    }
}
