//! Schema model: in-memory representation of a single key enumeration with its customizations.

use std::collections::BTreeMap;

pub use self::{
    declaration::SchemaDeclaration,
    naming::{KeyCase, NamingStrategy, UnknownKeyCase},
};
use crate::{GenerationError, ValidationContract};

mod declaration;
mod naming;
#[cfg(test)]
mod tests;

/// Member of a closed key enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key {
    name: String,
    ordinal: usize,
    variant: String,
}

impl Key {
    pub(crate) fn new(name: String, ordinal: usize, variant: String) -> Self {
        Self {
            name,
            ordinal,
            variant,
        }
    }

    /// Declared name of the key. This is the stable identity of the key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Zero-based position of the key in the enumeration.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Identifier of the enum variant corresponding to this key in the generated code.
    pub fn variant(&self) -> &str {
        &self.variant
    }
}

/// Validated declaration of a configuration enumeration.
///
/// A schema can only be obtained by [extracting](Self::extract()) it from a [`SchemaDeclaration`], which guarantees
/// that it is internally consistent: keys are unique, there is exactly one null key, and all referenced Rust items
/// are syntactically valid.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) enum_name: String,
    pub(crate) keys: Vec<Key>,
    pub(crate) null_key: usize,
    pub(crate) naming: NamingStrategy,
    pub(crate) validator: Option<String>,
    pub(crate) key_validators: BTreeMap<usize, String>,
    pub(crate) metadata_tags: Vec<String>,
    pub(crate) properties_path: String,
    pub(crate) provider_name: String,
    pub(crate) qualifier_name: String,
    pub(crate) crate_path: String,
    pub(crate) visibility: String,
    pub(crate) emit_key_enum: bool,
}

impl Schema {
    /// Extracts a schema from the provided declaration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MalformedSchema`] if the declaration is inconsistent.
    pub fn extract(declaration: SchemaDeclaration) -> Result<Self, GenerationError> {
        declaration.extract()
    }

    /// Derives the validation contract for this schema. This is a shortcut for [`ValidationContract::derive()`].
    ///
    /// # Errors
    ///
    /// See [`ValidationContract::derive()`].
    pub fn contract(&self) -> Result<ValidationContract, GenerationError> {
        ValidationContract::derive(self)
    }

    /// Name of the key enumeration.
    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Returns the designated null key.
    pub fn null_key(&self) -> &Key {
        &self.keys[self.null_key]
    }

    /// Checks whether the provided key is the null key.
    pub fn is_null_key(&self, key: &Key) -> bool {
        key.ordinal == self.null_key
    }

    /// Key naming strategy.
    pub fn naming(&self) -> &NamingStrategy {
        &self.naming
    }

    /// Returns the path to the validator function applying to the specified key, if any.
    /// The null key never has a validator.
    pub fn validator_for(&self, key: &Key) -> Option<&str> {
        if self.is_null_key(key) {
            return None;
        }
        self.key_validators
            .get(&key.ordinal)
            .or(self.validator.as_ref())
            .map(String::as_str)
    }

    /// Pass-through metadata tags (attribute bodies) copied onto the generated provider.
    pub fn metadata_tags(&self) -> &[String] {
        &self.metadata_tags
    }

    /// Path to the properties source loaded by the generated provider.
    pub fn properties_path(&self) -> &str {
        &self.properties_path
    }

    /// Name of the generated provider type.
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }

    /// Name of the generated qualifier type.
    pub fn qualifier_name(&self) -> &str {
        &self.qualifier_name
    }

    /// Path to the `propkeys` runtime crate used in the generated code.
    pub fn crate_path(&self) -> &str {
        &self.crate_path
    }

    /// Visibility of the generated items.
    pub fn visibility(&self) -> &str {
        &self.visibility
    }

    /// Whether the key enumeration itself is emitted by the generator.
    pub fn emits_key_enum(&self) -> bool {
        self.emit_key_enum
    }
}
