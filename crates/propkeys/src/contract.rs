//! Static contracts of generated providers.

use std::fmt;

use crate::{
    ConfigKey, Properties,
    error::{Violation, ViolationKind, Violations},
    validation::Validate,
};

/// Resolution and validation plan for a single non-null key.
pub struct ContractEntry<K: 'static> {
    key: K,
    external_name: &'static str,
    validator: Option<&'static dyn Validate>,
}

impl<K: fmt::Debug> fmt::Debug for ContractEntry<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ContractEntry")
            .field("key", &self.key)
            .field("external_name", &self.external_name)
            .field("validator", &self.validator)
            .finish()
    }
}

impl<K: ConfigKey> ContractEntry<K> {
    /// Creates an entry checked for presence and non-blankness only.
    pub const fn new(key: K, external_name: &'static str) -> Self {
        Self {
            key,
            external_name,
            validator: None,
        }
    }

    /// Creates an entry additionally checked with the provided validator.
    pub const fn validated(
        key: K,
        external_name: &'static str,
        validator: &'static dyn Validate,
    ) -> Self {
        Self {
            key,
            external_name,
            validator: Some(validator),
        }
    }

    /// Returns the key for this entry.
    pub fn key(&self) -> K {
        self.key
    }

    /// Returns the name of the property the key is looked up by.
    pub fn external_name(&self) -> &'static str {
        self.external_name
    }

    /// Returns the validator applied to the property value, if any.
    pub fn validator(&self) -> Option<&'static dyn Validate> {
        self.validator
    }

    fn check<'a>(&self, properties: &'a Properties) -> Result<&'a str, ViolationKind> {
        let value = properties
            .get(self.external_name)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ViolationKind::MissingOrEmptyProperty)?;
        if let Some(validator) = self.validator
            && !validator.validate(value)
        {
            return Err(ViolationKind::InvalidPropertyValue {
                validator: validator.to_string(),
            });
        }
        Ok(value)
    }
}

/// Static contract of a generated provider: the properties source and the obligations for each non-null key.
pub struct Contract<K: 'static> {
    provider: &'static str,
    properties_path: &'static str,
    null_key: K,
    entries: &'static [ContractEntry<K>],
}

impl<K: fmt::Debug> fmt::Debug for Contract<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Contract")
            .field("provider", &self.provider)
            .field("properties_path", &self.properties_path)
            .field("null_key", &self.null_key)
            .field("entries", &self.entries)
            .finish()
    }
}

impl<K: ConfigKey> Contract<K> {
    /// Creates a contract. Entries must be listed in the key declaration order and must not include the null key.
    pub const fn new(
        provider: &'static str,
        properties_path: &'static str,
        null_key: K,
        entries: &'static [ContractEntry<K>],
    ) -> Self {
        Self {
            provider,
            properties_path,
            null_key,
            entries,
        }
    }

    /// Returns the name of the provider type.
    pub fn provider(&self) -> &'static str {
        self.provider
    }

    /// Returns the path to the properties source.
    pub fn properties_path(&self) -> &'static str {
        self.properties_path
    }

    /// Returns the null key.
    pub fn null_key(&self) -> K {
        self.null_key
    }

    /// Returns entries for all non-null keys in the declaration order.
    pub fn entries(&self) -> &'static [ContractEntry<K>] {
        self.entries
    }

    /// Returns the entry for the specified key, or `None` for the null key.
    pub fn entry(&self, key: K) -> Option<&'static ContractEntry<K>> {
        self.entries
            .iter()
            .find(|entry| entry.key.ordinal() == key.ordinal())
    }

    /// Checks the provided properties against this contract, collecting all violations.
    /// On success, returns values indexed by key ordinals; the null key has no value.
    pub(crate) fn resolve(
        &self,
        properties: &Properties,
    ) -> Result<Vec<Option<String>>, Violations> {
        let mut values = vec![None; K::ALL.len()];
        let mut violations = Violations::default();
        for entry in self.entries {
            match entry.check(properties) {
                Ok(value) => {
                    if let Some(slot) = values.get_mut(entry.key.ordinal()) {
                        *slot = Some(value.to_owned());
                    }
                }
                Err(kind) => violations.push(Violation::new(
                    entry.key.name(),
                    entry.external_name,
                    kind,
                )),
            }
        }

        if violations.is_empty() {
            Ok(values)
        } else {
            Err(violations)
        }
    }
}
