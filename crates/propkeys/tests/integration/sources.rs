//! Tests for initializing providers from properties files.

use std::fs;

use assert_matches::assert_matches;
use propkeys::{ConfigProvider, InitError, ProviderState, SourceError};
use test_casing::test_casing;

use crate::{
    ConfigurationProvider, ServerKey,
    db::{DbConfig, DbKey},
};

#[test_casing(3, [
    ("server.properties", "# Server\nhost = localhost\nport : 8080\n"),
    ("server.json", r#"{ "host": "localhost", "port": 8080 }"#),
    ("server.yaml", "host: localhost\nport: 8080\n"),
])]
fn initializing_from_file(file_name: &str, contents: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(file_name);
    fs::write(&path, contents).unwrap();

    let mut provider = ConfigurationProvider::new();
    provider.initialize_from_path(&path).unwrap();
    assert_eq!(provider.state(), ProviderState::Ready);

    let values: Vec<_> = provider.values().collect();
    assert_eq!(
        values,
        [(ServerKey::Host, "localhost"), (ServerKey::Port, "8080")]
    );
}

#[test]
fn initializing_with_invalid_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.yaml");
    fs::write(&path, "CONNECTION_URL:\n  host: localhost\n").unwrap();

    let mut provider = DbConfig::new();
    let err = provider.initialize_from_path(&path).unwrap_err();
    assert_matches!(
        &err,
        InitError::SourceUnavailable {
            source: SourceError::NotFlat { key },
            ..
        } if key == "CONNECTION_URL"
    );
    assert_eq!(provider.state(), ProviderState::Failed);
    assert!(provider.get(DbKey::ConnectionUrl).is_err());
}

#[test]
fn initializing_from_missing_contract_path() {
    let mut provider = DbConfig::new();
    let err = provider.initialize().unwrap_err();
    let InitError::SourceUnavailable { path, source } = &err else {
        panic!("unexpected error: {err:?}");
    };
    assert_eq!(path.to_str(), Some("config/db.yaml"));
    assert_matches!(source, SourceError::Io(_));
    assert!(err.to_string().contains("`config/db.yaml`"), "{err}");
    assert_eq!(provider.state(), ProviderState::Failed);
}
