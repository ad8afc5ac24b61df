//! Runtime errors.

use std::{fmt, io, path::PathBuf};

use crate::ProviderState;

/// Errors loading a properties source.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SourceError {
    /// Error reading the source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Malformed line in a properties file.
    #[error("syntax error on line {line}: {message}")]
    Syntax {
        /// 1-based number of the line.
        line: usize,
        /// Error message.
        message: String,
    },
    /// Malformed JSON.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed YAML.
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON or YAML source is not an object.
    #[error("source is not an object")]
    NotAnObject,
    /// JSON or YAML source contains a non-scalar property value or key.
    #[error("property `{key}` is not a scalar; only flat objects are supported")]
    NotFlat {
        /// Offending property key.
        key: String,
    },
}

/// Kind of a [`Violation`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ViolationKind {
    /// Property is missing, or its value is empty or consists of whitespace only.
    MissingOrEmptyProperty,
    /// Property value is rejected by the validator.
    InvalidPropertyValue {
        /// Description of the validator.
        validator: String,
    },
}

/// Violation of a provider contract for a single key. Property values are never included into violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    key: &'static str,
    external_name: &'static str,
    kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            key, external_name, ..
        } = self;
        match &self.kind {
            ViolationKind::MissingOrEmptyProperty => write!(
                formatter,
                "property `{external_name}` for key `{key}` is missing or empty"
            ),
            ViolationKind::InvalidPropertyValue { validator } => write!(
                formatter,
                "property `{external_name}` for key `{key}` has invalid value: {validator}"
            ),
        }
    }
}

impl Violation {
    pub(crate) fn new(key: &'static str, external_name: &'static str, kind: ViolationKind) -> Self {
        Self {
            key,
            external_name,
            kind,
        }
    }

    /// Returns the declared name of the violating key.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Returns the name of the property the key is looked up by.
    pub fn external_name(&self) -> &'static str {
        self.external_name
    }

    /// Returns the violation kind.
    pub fn kind(&self) -> &ViolationKind {
        &self.kind
    }
}

/// Collection of [`Violation`]s. Non-empty when returned in an [`InitError`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    inner: Vec<Violation>,
}

impl fmt::Display for Violations {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.inner.iter().enumerate() {
            if i > 0 {
                writeln!(formatter)?;
            }
            write!(formatter, "- {violation}")?;
        }
        Ok(())
    }
}

impl Violations {
    pub(crate) fn push(&mut self, violation: Violation) {
        self.inner.push(violation);
    }

    /// Iterates over contained violations in the key declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Violation> + '_ {
        self.inner.iter()
    }

    /// Iterates over declared names of violating keys.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.inner.iter().map(Violation::key)
    }

    /// Returns the number of contained violations.
    #[allow(clippy::len_without_is_empty)] // is_empty should always return false
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the first violation.
    ///
    /// # Panics
    ///
    /// Panics if the collection is empty, which never happens for violations in an [`InitError`].
    pub fn first(&self) -> &Violation {
        self.inner.first().expect("no violations")
    }

    /// Finds a violation for the specified key (by its declared name).
    pub fn get(&self, key: &str) -> Option<&Violation> {
        self.inner.iter().find(|violation| violation.key == key)
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Errors initializing a provider.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum InitError {
    /// Properties source cannot be read or parsed.
    #[error("properties source `{}` is unavailable: {source}", .path.display())]
    SourceUnavailable {
        /// Path to the source.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: SourceError,
    },
    /// Properties violate the provider contract.
    #[error("`{provider}` has invalid properties ({} in total):\n{violations}", .violations.len())]
    Violations {
        /// Name of the provider type.
        provider: &'static str,
        /// All detected violations.
        violations: Violations,
    },
    /// Provider initialization was already attempted.
    #[error("provider is already initialized (state: {state})")]
    AlreadyInitialized {
        /// State of the provider.
        state: ProviderState,
    },
}

impl InitError {
    /// Returns violations if this error is caused by them.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::Violations { violations, .. } => Some(violations),
            _ => None,
        }
    }
}

/// Errors accessing values of a provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// Provider is not [ready](ProviderState::Ready).
    #[error("provider `{provider}` is not ready (state: {state})")]
    NotReady {
        /// Name of the provider type.
        provider: &'static str,
        /// Observed state of the provider.
        state: ProviderState,
    },
    /// Key is not covered by the provider contract. Only possible for manual `ConfigKey` implementations.
    #[error("key `{key}` is not covered by provider `{provider}`")]
    UnknownKey {
        /// Name of the provider type.
        provider: &'static str,
        /// Declared name of the key.
        key: &'static str,
    },
}

/// Errors resolving a qualifier in a [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// Provider for the qualifier is not registered.
    #[error("provider `{provider}` is not registered")]
    Unregistered {
        /// Name of the provider type.
        provider: &'static str,
    },
    /// Provider cannot produce a value.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
