//! Integration tests for `propkeys`.

use assert_matches::assert_matches;
use propkeys::{
    ConfigKey, ConfigKeys, ConfigProvider, InitError, NULL_VALUE, Properties, ProviderError,
    ProviderState, Qualifier, Registry, ResolveError, ViolationKind, testing,
};

mod sources;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ConfigKeys)]
#[config(properties_path = "config/server.properties")]
pub enum ServerKey {
    Ignored,
    Host,
    Port,
}

pub mod db {
    use propkeys::ConfigKeys;

    /// Database configuration keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, ConfigKeys)]
    #[config(
        properties_path = "config/db.yaml",
        provider = "DbConfig",
        qualifier = "DbSetting",
        rename_all = "SCREAMING_SNAKE_CASE",
        pass(derive(Clone)),
        pass(must_use)
    )]
    pub enum DbKey {
        ConnectionUrl,
        #[config(validate = Self::is_pool_size)]
        PoolSize,
        #[config(null)]
        Unused,
        #[config(rename = "db.schema", validate = crate::is_identifier)]
        Schema,
    }

    impl DbKey {
        fn is_pool_size(value: &str) -> bool {
            value.parse::<u32>().is_ok_and(|size| size > 0)
        }
    }
}

use self::db::{DbConfig, DbKey, DbSetting};

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn server_properties(host: &str, port: &str) -> Properties {
    Properties::new().with("host", host).with("port", port)
}

#[test]
fn generated_key_enum() {
    assert_eq!(
        ServerKey::ALL,
        [ServerKey::Ignored, ServerKey::Host, ServerKey::Port]
    );
    assert_eq!(ServerKey::NULL, ServerKey::Ignored);
    assert_eq!(ServerKey::Port.name(), "Port");
    assert_eq!(ServerKey::Port.ordinal(), 2);
    assert_eq!(DbKey::NULL, DbKey::Unused);
}

#[test]
fn provider_becomes_ready() {
    let mut provider = ConfigurationProvider::default();
    assert_eq!(provider.state(), ProviderState::Uninitialized);

    provider
        .initialize_from(&server_properties("localhost", "8080"))
        .unwrap();
    assert_eq!(provider.state(), ProviderState::Ready);
    assert_eq!(provider.get(ServerKey::Host).unwrap(), "localhost");
    assert_eq!(provider.get(ServerKey::Port).unwrap(), "8080");
    assert_eq!(provider.get(ServerKey::Ignored).unwrap(), NULL_VALUE);
}

#[test]
fn missing_property_fails_initialization() {
    let mut provider = ConfigurationProvider::new();
    let properties = Properties::new().with("host", "localhost");
    let err = provider.initialize_from(&properties).unwrap_err();

    let violations = err.violations().unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations.first().key(), "Port");
    assert_eq!(
        *violations.first().kind(),
        ViolationKind::MissingOrEmptyProperty
    );
    assert_eq!(provider.state(), ProviderState::Failed);
    assert_matches!(
        provider.get(ServerKey::Host),
        Err(ProviderError::NotReady {
            state: ProviderState::Failed,
            ..
        })
    );
}

#[test]
fn provider_with_customizations() {
    let provider: DbConfig = testing::test_complete([
        ("CONNECTION_URL", "postgres://localhost/app"),
        ("POOL_SIZE", "32"),
        ("db.schema", "app_v2"),
    ])
    .unwrap();
    assert_eq!(
        provider.get(DbKey::ConnectionUrl).unwrap(),
        "postgres://localhost/app"
    );
    assert_eq!(provider.get(DbKey::PoolSize).unwrap(), "32");
    assert_eq!(provider.get(DbKey::Schema).unwrap(), "app_v2");
    assert_eq!(provider.get(DbKey::Unused).unwrap(), NULL_VALUE);

    // `derive(Clone)` is passed through to the provider.
    let cloned = provider.clone();
    assert_eq!(cloned.state(), ProviderState::Ready);
}

#[test]
fn all_violations_are_collected() {
    let err = testing::test::<DbConfig>([
        ("CONNECTION_URL", ""),
        ("POOL_SIZE", "0"),
        ("db.schema", "1st"),
        ("UNUSED", "?"),
    ])
    .unwrap_err();
    let InitError::Violations {
        provider,
        violations,
    } = &err
    else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(*provider, "DbConfig");

    let kinds: Vec<_> = violations
        .iter()
        .map(|violation| (violation.key(), violation.kind().clone()))
        .collect();
    assert_eq!(
        kinds,
        [
            ("ConnectionUrl", ViolationKind::MissingOrEmptyProperty),
            (
                "PoolSize",
                ViolationKind::InvalidPropertyValue {
                    validator: "must satisfy `DbKey::is_pool_size`".to_owned()
                }
            ),
            (
                "Schema",
                ViolationKind::InvalidPropertyValue {
                    validator: "must satisfy `crate::is_identifier`".to_owned()
                }
            ),
        ]
    );

    let message = err.to_string();
    assert!(message.contains("(3 in total)"), "{message}");
    assert!(!message.contains("1st"), "{message}");
}

#[test]
fn repeated_initialization() {
    let mut provider = ConfigurationProvider::new();
    provider
        .initialize_from(&server_properties("localhost", "8080"))
        .unwrap();
    let err = provider
        .initialize_from(&server_properties("example.com", "80"))
        .unwrap_err();
    assert_matches!(
        err,
        InitError::AlreadyInitialized {
            state: ProviderState::Ready
        }
    );
    assert_eq!(provider.get(ServerKey::Host).unwrap(), "localhost");
}

#[test]
fn resolving_qualifiers_via_registry() {
    let server: ConfigurationProvider =
        testing::test([("host", "localhost"), ("port", "80")]).unwrap();
    let db = DbConfig::new();
    let registry = Registry::new().with(server).with(db);

    let qualifier = Configuration::from(ServerKey::Port);
    assert_eq!(qualifier.key(), ServerKey::Port);
    assert_eq!(registry.resolve(qualifier).unwrap(), "80");

    let err = registry.resolve(DbSetting(DbKey::Schema)).unwrap_err();
    assert_matches!(
        err,
        ResolveError::Provider(ProviderError::NotReady {
            provider: "DbConfig",
            state: ProviderState::Uninitialized,
        })
    );
}
