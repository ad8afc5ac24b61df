//! Qualifiers: DI-agnostic requests for configuration values.

use crate::{ConfigKey, ConfigProvider, ProviderError};

/// Request for the value of a specific key, resolvable without naming the provider type.
///
/// Qualifiers are generated together with providers by [`ConfigKeys`](crate::ConfigKeys). Each qualifier is a newtype
/// wrapping a key; the qualifier type determines the provider via [`Self::Provider`].
///
/// # Examples
///
/// ```
/// use propkeys::{testing, ConfigKey, ConfigKeys, Produces, Qualifier};
///
/// #[derive(Debug, Clone, Copy, ConfigKeys)]
/// #[config(properties_path = "app.properties", qualifier = "AppSetting")]
/// pub enum AppKey {
///     None,
///     Host,
/// }
///
/// let provider: ConfigurationProvider = testing::test([("host", "localhost")])?;
/// let qualifier = AppSetting(AppKey::Host);
/// assert_eq!(qualifier.key().name(), "Host");
/// assert_eq!(provider.produce(qualifier)?, "localhost");
/// # Ok::<_, anyhow::Error>(())
/// ```
pub trait Qualifier: Copy + Send + Sync + 'static {
    /// Key enumeration.
    type Key: ConfigKey;
    /// Provider producing values for this qualifier.
    type Provider: ConfigProvider<Key = Self::Key> + Produces<Self>;

    /// Returns the requested key.
    fn key(&self) -> Self::Key;
}

/// Producer of values for qualifiers of type `Q`.
pub trait Produces<Q> {
    /// Produces the value for the provided qualifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer cannot produce the value (e.g., a provider is not ready).
    fn produce(&self, qualifier: Q) -> Result<&str, ProviderError>;
}
