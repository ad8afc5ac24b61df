//! Testing tools for providers.

use std::any;

use crate::{ConfigProvider, InitError, Properties};

/// Tests provider initialization from the provided `sample` properties.
///
/// # Errors
///
/// Propagates initialization errors, which allows testing negative cases.
///
/// # Examples
///
/// ## Basic usage
///
/// ```
/// use propkeys::{testing, ConfigKeys, ConfigProvider};
///
/// #[derive(Debug, Clone, Copy, ConfigKeys)]
/// #[config(properties_path = "app.properties", rename_all = "kebab-case")]
/// pub enum AppKey {
///     None,
///     ListenPort,
/// }
///
/// let provider: ConfigurationProvider = testing::test([("listen-port", "8080")])?;
/// assert_eq!(provider.get(AppKey::ListenPort)?, "8080");
/// # anyhow::Ok(())
/// ```
///
/// ## Testing errors
///
/// ```
/// # use propkeys::{testing, ConfigKeys};
/// # #[derive(Debug, Clone, Copy, ConfigKeys)]
/// # #[config(properties_path = "app.properties", rename_all = "kebab-case")]
/// # pub enum AppKey {
/// #     None,
/// #     ListenPort,
/// # }
/// let err = testing::test::<ConfigurationProvider>([("listen_port", "8080")]).unwrap_err();
/// let violations = err.violations().unwrap();
/// assert_eq!(violations.first().external_name(), "listen-port");
/// ```
pub fn test<P: ConfigProvider>(
    sample: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
) -> Result<P, InitError> {
    let properties = sample.into_iter().collect();
    test_properties(&properties)
}

/// Tests provider initialization ensuring that *all* `sample` properties are used by the provider.
///
/// # Panics
///
/// Panics if the `sample` contains properties not looked up by the provider (e.g., because of a typo
/// or an unexpected naming strategy). The panic message will contain names of the unused properties.
///
/// # Errors
///
/// Propagates initialization errors, which allows testing negative cases.
///
/// # Examples
///
/// ```should_panic
/// # use propkeys::{testing, ConfigKeys};
/// #[derive(Debug, Clone, Copy, ConfigKeys)]
/// #[config(properties_path = "app.properties")]
/// pub enum AppKey {
///     None,
///     Port,
/// }
///
/// // Will panic because `Port` is looked up as `port`.
/// testing::test_complete::<ConfigurationProvider>([("port", "8080"), ("PORT", "80")]);
/// ```
pub fn test_complete<P: ConfigProvider>(
    sample: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
) -> Result<P, InitError> {
    let properties: Properties = sample.into_iter().collect();
    let contract = P::contract();
    let unused: Vec<_> = properties
        .iter()
        .map(|(name, _)| name)
        .filter(|&name| {
            !contract
                .entries()
                .iter()
                .any(|entry| entry.external_name() == name)
        })
        .collect();
    assert!(
        unused.is_empty(),
        "Sample contains properties not used by provider `{}` ({}): {unused:?}",
        contract.provider(),
        any::type_name::<P>()
    );
    test_properties(&properties)
}

fn test_properties<P: ConfigProvider>(properties: &Properties) -> Result<P, InitError> {
    let mut provider = P::new();
    provider.initialize_from(properties)?;
    Ok(provider)
}
