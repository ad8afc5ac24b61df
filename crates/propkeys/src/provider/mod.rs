//! Provider state machine and initialization.

use std::{fmt, path::Path};

use crate::{
    ConfigKey, Contract, NULL_VALUE, Properties,
    error::{InitError, ProviderError},
};


/// State of a [`Provider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProviderState {
    /// Initialization was not started.
    Uninitialized,
    /// Properties source is being loaded.
    Loading,
    /// Loaded properties are being validated.
    Validating,
    /// Provider is successfully initialized, and its values can be accessed.
    Ready,
    /// Initialization has failed. This state is terminal.
    Failed,
}

impl fmt::Display for ProviderState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Uninitialized => "uninitialized",
            Self::Loading => "loading",
            Self::Validating => "validating",
            Self::Ready => "ready",
            Self::Failed => "failed",
        })
    }
}

impl ProviderState {
    /// Checks whether this state is terminal, i.e. initialization has finished (successfully or not).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

/// Runtime core of a generated provider: the validated values for a static [`Contract`].
///
/// Values are populated at most once, during initialization, and are immutable afterwards.
#[derive(Clone)]
pub struct Provider<K: ConfigKey> {
    contract: &'static Contract<K>,
    state: ProviderState,
    values: Vec<Option<String>>,
}

// Values are not output.
impl<K: ConfigKey> fmt::Debug for Provider<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Provider")
            .field("provider", &self.contract.provider())
            .field("properties_path", &self.contract.properties_path())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<K: ConfigKey> Provider<K> {
    /// Creates an uninitialized provider for the specified contract.
    pub fn new(contract: &'static Contract<K>) -> Self {
        Self {
            contract,
            state: ProviderState::Uninitialized,
            values: Vec::new(),
        }
    }

    /// Returns the contract of this provider.
    pub fn contract(&self) -> &'static Contract<K> {
        self.contract
    }

    /// Returns the current state of this provider.
    pub fn state(&self) -> ProviderState {
        self.state
    }

    fn transition(&mut self, state: ProviderState) {
        tracing::debug!(
            provider = self.contract.provider(),
            from = %self.state,
            to = %state,
            "provider state changed"
        );
        self.state = state;
    }

    fn start_initialization(&mut self) -> Result<(), InitError> {
        if self.state != ProviderState::Uninitialized {
            tracing::warn!(
                provider = self.contract.provider(),
                state = %self.state,
                "repeated provider initialization"
            );
            return Err(InitError::AlreadyInitialized { state: self.state });
        }
        self.transition(ProviderState::Loading);
        Ok(())
    }

    /// Loads properties from the path specified in the contract and validates them.
    ///
    /// # Errors
    ///
    /// See [`Self::initialize_from_path()`].
    pub fn initialize(&mut self) -> Result<(), InitError> {
        self.initialize_from_path(self.contract.properties_path())
    }

    /// Loads properties from the specified path rather than the one in the contract, and validates them.
    /// The source format is chosen based on the path extension; see [`PropertiesFormat`](crate::PropertiesFormat).
    ///
    /// # Errors
    ///
    /// - Returns [`InitError::SourceUnavailable`] if the source cannot be read or parsed.
    /// - Returns [`InitError::Violations`] if the properties violate the contract.
    /// - Returns [`InitError::AlreadyInitialized`] if initialization was attempted before.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(provider = self.contract.provider(), path = %path.as_ref().display())
    )]
    pub fn initialize_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), InitError> {
        self.start_initialization()?;

        let path = path.as_ref();
        let properties = match Properties::from_path(path) {
            Ok(properties) => properties,
            Err(source) => {
                tracing::warn!(%source, "properties source is unavailable");
                self.transition(ProviderState::Failed);
                return Err(InitError::SourceUnavailable {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        tracing::debug!(len = properties.len(), "loaded properties source");
        self.validate(&properties)
    }

    /// Validates the provided properties.
    ///
    /// # Errors
    ///
    /// - Returns [`InitError::Violations`] if the properties violate the contract.
    /// - Returns [`InitError::AlreadyInitialized`] if initialization was attempted before.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(provider = self.contract.provider(), len = properties.len())
    )]
    pub fn initialize_from(&mut self, properties: &Properties) -> Result<(), InitError> {
        self.start_initialization()?;
        self.validate(properties)
    }

    fn validate(&mut self, properties: &Properties) -> Result<(), InitError> {
        self.transition(ProviderState::Validating);
        match self.contract.resolve(properties) {
            Ok(values) => {
                self.values = values;
                self.transition(ProviderState::Ready);
                tracing::info!(
                    provider = self.contract.provider(),
                    keys = self.contract.entries().len(),
                    "provider is ready"
                );
                Ok(())
            }
            Err(violations) => {
                for violation in &violations {
                    tracing::warn!(
                        key = violation.key(),
                        property = violation.external_name(),
                        "{violation}"
                    );
                }
                self.transition(ProviderState::Failed);
                Err(InitError::Violations {
                    provider: self.contract.provider(),
                    violations,
                })
            }
        }
    }

    /// Returns the validated value for the specified key. The null key always maps to [`NULL_VALUE`].
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotReady`] if the provider is not [ready](ProviderState::Ready).
    pub fn get(&self, key: K) -> Result<&str, ProviderError> {
        if self.state != ProviderState::Ready {
            return Err(ProviderError::NotReady {
                provider: self.contract.provider(),
                state: self.state,
            });
        }
        if key.ordinal() == self.contract.null_key().ordinal() {
            return Ok(NULL_VALUE);
        }
        self.values
            .get(key.ordinal())
            .and_then(Option::as_deref)
            .ok_or(ProviderError::UnknownKey {
                provider: self.contract.provider(),
                key: key.name(),
            })
    }

    /// Iterates over validated values for all non-null keys in the declaration order.
    /// The iterator is empty if the provider is not [ready](ProviderState::Ready).
    pub fn values(&self) -> impl Iterator<Item = (K, &str)> + '_ {
        let entries = if self.state == ProviderState::Ready {
            self.contract.entries()
        } else {
            &[]
        };
        entries.iter().filter_map(|entry| {
            let key = entry.key();
            let value = self.values.get(key.ordinal())?.as_deref()?;
            Some((key, value))
        })
    }
}

/// Configuration provider generated by [`ConfigKeys`](crate::ConfigKeys).
///
/// A provider is created uninitialized; it must be initialized (once) before use.
pub trait ConfigProvider: Sized + Send + Sync + 'static {
    /// Key enumeration of the provider.
    type Key: ConfigKey;

    /// Returns the static contract of the provider.
    fn contract() -> &'static Contract<Self::Key>;

    #[doc(hidden)] // implementation detail of generated code
    fn from_inner(inner: Provider<Self::Key>) -> Self;
    #[doc(hidden)] // implementation detail of generated code
    fn inner(&self) -> &Provider<Self::Key>;
    #[doc(hidden)] // implementation detail of generated code
    fn inner_mut(&mut self) -> &mut Provider<Self::Key>;

    /// Creates an uninitialized provider.
    fn new() -> Self {
        Self::from_inner(Provider::new(Self::contract()))
    }

    /// Returns the current provider state.
    fn state(&self) -> ProviderState {
        self.inner().state()
    }

    /// Loads properties from the [contract path](Contract::properties_path()) and validates them.
    ///
    /// # Errors
    ///
    /// See [`Provider::initialize_from_path()`].
    fn initialize(&mut self) -> Result<(), InitError> {
        self.inner_mut().initialize()
    }

    /// Loads properties from the specified path and validates them.
    ///
    /// # Errors
    ///
    /// See [`Provider::initialize_from_path()`].
    fn initialize_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), InitError> {
        self.inner_mut().initialize_from_path(path)
    }

    /// Validates the provided properties.
    ///
    /// # Errors
    ///
    /// See [`Provider::initialize_from()`].
    fn initialize_from(&mut self, properties: &Properties) -> Result<(), InitError> {
        self.inner_mut().initialize_from(properties)
    }

    /// Returns the validated value for the specified key.
    ///
    /// # Errors
    ///
    /// See [`Provider::get()`].
    fn get(&self, key: Self::Key) -> Result<&str, ProviderError> {
        self.inner().get(key)
    }

    /// Iterates over validated values for all non-null keys.
    ///
    /// See [`Provider::values()`].
    fn values(&self) -> impl Iterator<Item = (Self::Key, &str)> + '_ {
        self.inner().values()
    }
}
