//! Registry of providers.

use std::{
    any::{self, Any, TypeId},
    collections::HashMap,
    fmt,
};

use crate::{ConfigProvider, Produces, Qualifier, ResolveError};

struct RegistryEntry {
    name: &'static str,
    provider: Box<dyn Any + Send + Sync>,
}

/// Registry of providers keyed by the provider type. Allows resolving [`Qualifier`]s to values without
/// knowing provider types.
///
/// # Examples
///
/// ```
/// use propkeys::{testing, ConfigKeys, Registry};
///
/// #[derive(Debug, Clone, Copy, ConfigKeys)]
/// #[config(properties_path = "http.properties", provider = "HttpConfig", qualifier = "Http")]
/// pub enum HttpKey {
///     None,
///     Port,
/// }
///
/// #[derive(Debug, Clone, Copy, ConfigKeys)]
/// #[config(properties_path = "db.properties", provider = "DbConfig", qualifier = "Db")]
/// pub enum DbKey {
///     None,
///     Url,
/// }
///
/// let registry = Registry::new()
///     .with(testing::test::<HttpConfig>([("port", "8080")])?)
///     .with(testing::test::<DbConfig>([("url", "postgres://")])?);
/// assert_eq!(registry.resolve(Http(HttpKey::Port))?, "8080");
/// assert_eq!(registry.resolve(Db(DbKey::Url))?, "postgres://");
/// # Ok::<_, anyhow::Error>(())
/// ```
#[derive(Default)]
pub struct Registry {
    entries: HashMap<TypeId, RegistryEntry>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.entries.values().map(|entry| entry.name).collect();
        names.sort_unstable();
        formatter
            .debug_struct("Registry")
            .field("providers", &names)
            .finish()
    }
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider, returning the previously registered provider of the same type, if any.
    /// The provider does not need to be initialized; resolving values from an uninitialized provider
    /// will fail though.
    pub fn register<P: ConfigProvider>(&mut self, provider: P) -> Option<P> {
        let name = P::contract().provider();
        tracing::debug!(
            provider = name,
            ty = any::type_name::<P>(),
            state = %provider.state(),
            "registering provider"
        );
        let entry = RegistryEntry {
            name,
            provider: Box::new(provider),
        };
        let prev = self.entries.insert(TypeId::of::<P>(), entry)?;
        prev.provider.downcast::<P>().ok().map(|prev| *prev)
    }

    /// Registers a provider and returns the updated registry.
    #[must_use]
    pub fn with<P: ConfigProvider>(mut self, provider: P) -> Self {
        self.register(provider);
        self
    }

    /// Returns the registered provider of the specified type.
    pub fn provider<P: ConfigProvider>(&self) -> Option<&P> {
        self.entries
            .get(&TypeId::of::<P>())?
            .provider
            .downcast_ref::<P>()
    }

    /// Returns the number of registered providers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether this registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves the value for the provided qualifier.
    ///
    /// # Errors
    ///
    /// - Returns [`ResolveError::Unregistered`] if the provider for the qualifier is not registered.
    /// - Returns [`ResolveError::Provider`] if the provider cannot produce the value (e.g., is not ready).
    pub fn resolve<Q: Qualifier>(&self, qualifier: Q) -> Result<&str, ResolveError> {
        let provider =
            self.provider::<Q::Provider>()
                .ok_or_else(|| ResolveError::Unregistered {
                    provider: <Q::Provider as ConfigProvider>::contract().provider(),
                })?;
        Ok(provider.produce(qualifier)?)
    }
}
