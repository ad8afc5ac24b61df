//! Tests for the public provider generated by the build script.

use assert_matches::assert_matches;
use propkeys::{
    ConfigKey, ConfigProvider, InitError, NULL_VALUE, Properties, ProviderState, Qualifier,
    ViolationKind, testing,
};
use propkeys_build_tests::{AppKey, Configuration, ConfigurationProvider};

#[test]
fn generated_key_enum() {
    assert_eq!(
        AppKey::ALL,
        [AppKey::Ignored, AppKey::Host, AppKey::Port, AppKey::DbUrl]
    );
    assert_eq!(AppKey::NULL, AppKey::Ignored);
    assert_eq!(AppKey::DbUrl.name(), "DB_URL");
    assert_eq!(AppKey::DbUrl.ordinal(), 3);
    assert!(AppKey::Host < AppKey::Port);
}

#[test]
fn contract_uses_lowercase_names() {
    let contract = ConfigurationProvider::contract();
    assert_eq!(contract.provider(), "ConfigurationProvider");
    assert_eq!(contract.properties_path(), "config/app.properties");
    assert_eq!(contract.null_key(), AppKey::Ignored);

    let names: Vec<_> = contract.entries().iter().map(|entry| entry.external_name()).collect();
    assert_eq!(names, ["host", "port", "db_url"]);
    let validated: Vec<_> = contract
        .entries()
        .iter()
        .filter(|entry| entry.validator().is_some())
        .map(|entry| entry.key())
        .collect();
    assert_eq!(validated, [AppKey::Port]);
}

#[test]
fn missing_property_fails_initialization() {
    let mut provider = ConfigurationProvider::new();
    let properties = Properties::new()
        .with("host", "localhost")
        .with("db_url", "postgres://localhost/app");
    let err = provider.initialize_from(&properties).unwrap_err();

    let violations = err.violations().unwrap();
    assert_eq!(violations.len(), 1);
    let violation = violations.first();
    assert_eq!(violation.key(), "PORT");
    assert_eq!(violation.external_name(), "port");
    assert_eq!(*violation.kind(), ViolationKind::MissingOrEmptyProperty);
    assert_eq!(provider.state(), ProviderState::Failed);
}

#[test]
fn provider_becomes_ready() {
    let provider: ConfigurationProvider = testing::test_complete([
        ("host", "localhost"),
        ("port", "8080"),
        ("db_url", "postgres://localhost/app"),
    ])
    .unwrap();

    assert_eq!(provider.state(), ProviderState::Ready);
    assert_eq!(provider.get(AppKey::Host).unwrap(), "localhost");
    assert_eq!(provider.get(AppKey::Port).unwrap(), "8080");
    assert_eq!(provider.get(AppKey::Ignored).unwrap(), NULL_VALUE);
    assert_eq!(Configuration::from(AppKey::DbUrl).key(), AppKey::DbUrl);

    // `derive(Clone)` is passed through to the provider.
    let cloned = provider.clone();
    assert_eq!(cloned.get(AppKey::Port).unwrap(), "8080");
}

#[test]
fn invalid_port_is_rejected() {
    let err = testing::test::<ConfigurationProvider>([
        ("host", "localhost"),
        ("port", "0"),
        ("db_url", "postgres://localhost/app"),
    ])
    .unwrap_err();
    assert_matches!(&err, InitError::Violations { provider: "ConfigurationProvider", .. });

    let violation = err.violations().unwrap().first();
    assert_eq!(violation.key(), "PORT");
    assert_matches!(
        violation.kind(),
        ViolationKind::InvalidPropertyValue { validator } if validator == "must satisfy `crate::is_port`"
    );
}

#[test]
fn debug_and_default_are_implemented() {
    let provider = ConfigurationProvider::default();
    assert_eq!(provider.state(), ProviderState::Uninitialized);
    let debug = format!("{provider:?}");
    assert!(debug.starts_with("ConfigurationProvider"), "{debug}");
}
