//! Validation contract: per-key obligations of the generated provider.

use std::collections::HashMap;

use crate::{
    GenerationError,
    error::SchemaDefect,
    schema::{Key, Schema},
};

/// Resolution and validation plan for a single non-null key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractEntry {
    key: Key,
    external_name: String,
    validator: Option<String>,
}

impl ContractEntry {
    /// Key this entry is for.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Name of the property the key is looked up by.
    pub fn external_name(&self) -> &str {
        &self.external_name
    }

    /// Path to the validator applied to the property value, if any.
    pub fn validator(&self) -> Option<&str> {
        self.validator.as_deref()
    }

    /// Checks whether the property value is validated beyond presence / non-emptiness.
    pub fn is_validated(&self) -> bool {
        self.validator.is_some()
    }
}

/// Immutable per-key resolution / validation plan derived from a [`Schema`].
///
/// The contract covers all keys except for the null key, in their declaration order. The same schema
/// always yields an equal contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationContract {
    null_key: Key,
    entries: Vec<ContractEntry>,
}

impl ValidationContract {
    /// Derives a contract for the provided schema.
    ///
    /// # Errors
    ///
    /// - Returns [`GenerationError::DuplicateExternalName`] if the naming strategy maps two keys to the same name.
    /// - Returns [`GenerationError::MalformedSchema`] if the naming strategy maps a key to an empty name.
    pub fn derive(schema: &Schema) -> Result<Self, GenerationError> {
        let mut entries = Vec::with_capacity(schema.keys().len().saturating_sub(1));
        let mut key_by_name = HashMap::<String, &Key>::with_capacity(entries.capacity());

        for key in schema.keys() {
            if schema.is_null_key(key) {
                continue;
            }

            let external_name = schema.naming().external_name(key);
            if external_name.trim().is_empty() {
                let defect = SchemaDefect::EmptyExternalName {
                    key: key.name().to_owned(),
                };
                return Err(GenerationError::malformed(schema.enum_name(), defect));
            }
            if let Some(prev) = key_by_name.insert(external_name.clone(), key) {
                return Err(GenerationError::DuplicateExternalName {
                    schema: schema.enum_name().to_owned(),
                    external_name,
                    first_key: prev.name().to_owned(),
                    second_key: key.name().to_owned(),
                });
            }

            entries.push(ContractEntry {
                key: key.clone(),
                external_name,
                validator: schema.validator_for(key).map(str::to_owned),
            });
        }

        tracing::debug!(
            schema = schema.enum_name(),
            entries = entries.len(),
            "derived validation contract"
        );
        Ok(Self {
            null_key: schema.null_key().clone(),
            entries,
        })
    }

    /// Returns the null key, which is excluded from validation.
    pub fn null_key(&self) -> &Key {
        &self.null_key
    }

    /// Returns contract entries in the key declaration order.
    pub fn entries(&self) -> &[ContractEntry] {
        &self.entries
    }

    /// Looks up an entry by the declared key name.
    pub fn entry(&self, key_name: &str) -> Option<&ContractEntry> {
        self.entries.iter().find(|entry| entry.key.name() == key_name)
    }

    /// Returns distinct validator paths in the order of their first use.
    pub fn validators(&self) -> Vec<&str> {
        let mut validators = Vec::<&str>::new();
        for path in self.entries.iter().filter_map(ContractEntry::validator) {
            if !validators.contains(&path) {
                validators.push(path);
            }
        }
        validators
    }
}
