use assert_matches::assert_matches;
use test_casing::test_casing;

use super::*;
use crate::{GenerationError, SchemaDefect};

fn declaration() -> SchemaDeclaration {
    SchemaDeclaration::new("AppKey", "config/app.properties").keys(["IGNORED", "HOST", "PORT"])
}

fn extract_defect(declaration: SchemaDeclaration) -> SchemaDefect {
    let err = declaration.extract().unwrap_err();
    match err {
        GenerationError::MalformedSchema { schema, defect } => {
            assert_eq!(schema, "AppKey");
            defect
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn extracting_schema_with_defaults() {
    let schema = declaration().extract().unwrap();

    assert_eq!(schema.enum_name(), "AppKey");
    assert_eq!(schema.properties_path(), "config/app.properties");
    assert_eq!(schema.provider_name(), "ConfigurationProvider");
    assert_eq!(schema.qualifier_name(), "Configuration");
    assert_eq!(schema.crate_path(), "::propkeys");
    assert_eq!(schema.visibility(), "pub");
    assert!(schema.emits_key_enum());
    assert!(schema.metadata_tags().is_empty());

    let names: Vec<_> = schema.keys().iter().map(Key::name).collect();
    assert_eq!(names, ["IGNORED", "HOST", "PORT"]);
    let variants: Vec<_> = schema.keys().iter().map(Key::variant).collect();
    assert_eq!(variants, ["Ignored", "Host", "Port"]);
    let ordinals: Vec<_> = schema.keys().iter().map(Key::ordinal).collect();
    assert_eq!(ordinals, [0, 1, 2]);

    assert_eq!(schema.null_key().name(), "IGNORED");
    for key in schema.keys() {
        assert_eq!(schema.naming().external_name(key), key.name().to_lowercase());
        assert_eq!(schema.validator_for(key), None);
    }
}

#[test]
fn explicit_null_key() {
    let schema = declaration().null_key("PORT").extract().unwrap();
    assert_eq!(schema.null_key().name(), "PORT");
    assert!(schema.is_null_key(&schema.keys()[2]));
    assert!(!schema.is_null_key(&schema.keys()[0]));
}

#[test]
fn multiple_null_keys_are_rejected() {
    let defect = extract_defect(declaration().null_key("IGNORED").null_key("HOST"));
    assert_matches!(
        defect,
        SchemaDefect::MultipleNullKeys { first, second } if first == "IGNORED" && second == "HOST"
    );
}

#[test]
fn unknown_null_key_is_rejected() {
    let defect = extract_defect(declaration().null_key("NONE"));
    assert_matches!(defect, SchemaDefect::UnknownKey { key, .. } if key == "NONE");
}

#[test]
fn empty_enum_is_rejected() {
    let defect = extract_defect(SchemaDeclaration::new("AppKey", "app.properties"));
    assert_matches!(defect, SchemaDefect::NoKeys);
}

#[test]
fn duplicate_keys_are_rejected() {
    let defect = extract_defect(declaration().key("HOST"));
    assert_matches!(defect, SchemaDefect::DuplicateKey { key } if key == "HOST");
}

#[test]
fn keys_with_same_variant_are_rejected() {
    let defect = extract_defect(declaration().keys(["db_url", "DB_URL"]));
    assert_matches!(
        defect,
        SchemaDefect::DuplicateVariant { first, second, variant }
            if first == "db_url" && second == "DB_URL" && variant == "DbUrl"
    );
}

#[test]
fn existing_enum_variants_are_used_verbatim() {
    let schema = SchemaDeclaration::new("AppKey", "app.properties")
        .keys(["Ignored", "db_url", "DB_URL"])
        .emit_key_enum(false)
        .extract()
        .unwrap();
    let variants: Vec<_> = schema.keys().iter().map(Key::variant).collect();
    assert_eq!(variants, ["Ignored", "db_url", "DB_URL"]);
}

#[test_casing(4, ["", "9lives", "fn", "with space"])]
fn invalid_key_names_are_rejected(name: &str) {
    let defect = extract_defect(declaration().emit_key_enum(false).key(name));
    if name.is_empty() {
        assert_matches!(defect, SchemaDefect::EmptyKeyName { ordinal: 3 });
    } else {
        assert_matches!(defect, SchemaDefect::InvalidIdentifier { value, .. } if value == name);
    }
}

#[test]
fn invalid_validator_path_is_rejected() {
    let defect = extract_defect(declaration().validator("not a path"));
    assert_matches!(
        defect,
        SchemaDefect::InvalidPath { what: "validator", value } if value == "not a path"
    );
}

#[test]
fn validator_on_null_key_is_rejected() {
    let defect = extract_defect(declaration().key_validator("IGNORED", "crate::is_host"));
    assert_matches!(defect, SchemaDefect::ValidatedNullKey { key } if key == "IGNORED");
}

#[test]
fn validator_for_unknown_key_is_rejected() {
    let defect = extract_defect(declaration().key_validator("NONE", "crate::is_host"));
    assert_matches!(defect, SchemaDefect::UnknownKey { hook: "key validator", key } if key == "NONE");
}

#[test]
fn rename_for_unknown_key_is_rejected() {
    let defect = extract_defect(declaration().rename("NONE", "none"));
    assert_matches!(defect, SchemaDefect::UnknownKey { hook: "rename", key } if key == "NONE");
}

#[test]
fn invalid_metadata_tag_is_rejected() {
    let defect = extract_defect(declaration().metadata_tag("derive(Clone"));
    assert_matches!(defect, SchemaDefect::InvalidMetadataTag { tag } if tag == "derive(Clone");
}

#[test_casing(4, [
    ("derive(Debug)", "Debug"),
    ("derive(Clone, Default)", "Default"),
    ("derive(::core::fmt::Debug)", "Debug"),
    ("derive(PartialEq, core::default::Default,)", "Default"),
])]
fn metadata_tag_conflicting_with_generated_impls_is_rejected(tag: &str, expected_trait: &str) {
    let defect = extract_defect(declaration().metadata_tag(tag));
    assert_matches!(
        &defect,
        SchemaDefect::ConflictingMetadataTag { tag: actual, derived }
            if actual == tag && *derived == expected_trait
    );
    assert!(defect.to_string().contains("already implemented"), "{defect}");
}

#[test_casing(3, ["derive(Clone, PartialEq)", "allow(dead_code)", "doc = \"Debug\""])]
fn non_conflicting_metadata_tags_are_accepted(tag: &str) {
    let schema = declaration().metadata_tag(tag).extract().unwrap();
    assert_eq!(schema.metadata_tags(), [tag]);
}

#[test]
fn empty_properties_path_is_rejected() {
    let defect = extract_defect(SchemaDeclaration::new("AppKey", "  ").key("NONE"));
    assert_matches!(defect, SchemaDefect::EmptyPropertiesPath);
}

#[test]
fn clashing_type_names_are_rejected() {
    let defect = extract_defect(declaration().provider_name("AppKey"));
    assert_matches!(
        defect,
        SchemaDefect::TypeNameClash { first: "key enum", second: "provider", name } if name == "AppKey"
    );

    let defect = extract_defect(declaration().qualifier_name("ConfigurationProvider"));
    assert_matches!(
        defect,
        SchemaDefect::TypeNameClash { first: "provider", second: "qualifier", .. }
    );
}

#[test]
fn invalid_visibility_is_rejected() {
    let defect = extract_defect(declaration().visibility("public"));
    assert_matches!(defect, SchemaDefect::InvalidPath { what: "visibility", .. });
}

#[test]
fn private_visibility_is_supported() {
    let schema = declaration().visibility("").extract().unwrap();
    assert_eq!(schema.visibility(), "");
}

#[test]
fn per_key_validators_take_precedence() {
    let schema = declaration()
        .validator("crate::not_blank")
        .key_validator("PORT", "crate::is_port")
        .extract()
        .unwrap();
    let [ignored, host, port] = schema.keys() else {
        unreachable!();
    };
    assert_eq!(schema.validator_for(ignored), None);
    assert_eq!(schema.validator_for(host), Some("crate::not_blank"));
    assert_eq!(schema.validator_for(port), Some("crate::is_port"));
}

#[test_casing(8, [
    (KeyCase::Lower, "dbconnectionurl"),
    (KeyCase::Upper, "DBCONNECTIONURL"),
    (KeyCase::Snake, "db_connection_url"),
    (KeyCase::Kebab, "db-connection-url"),
    (KeyCase::Camel, "dbConnectionUrl"),
    (KeyCase::ScreamingSnake, "DB_CONNECTION_URL"),
    (KeyCase::ScreamingKebab, "DB-CONNECTION-URL"),
    (KeyCase::Dot, "db.connection.url"),
])]
fn naming_with_case_conversion(case: KeyCase, expected: &str) {
    let schema = SchemaDeclaration::new("AppKey", "app.properties")
        .keys(["None", "DbConnectionUrl"])
        .emit_key_enum(false)
        .rename_all(case)
        .extract()
        .unwrap();
    assert_eq!(schema.naming().external_name(&schema.keys()[1]), expected);

    assert_eq!(case.as_str().parse::<KeyCase>().unwrap(), case);
}

#[test]
fn parsing_unknown_case() {
    let err = "PascalCase".parse::<KeyCase>().unwrap_err();
    assert!(err.to_string().contains("unknown key case `PascalCase`"), "{err}");
}

#[test]
fn custom_naming_with_overrides() {
    let naming = NamingStrategy::custom(|key| format!("app.{}", key.name().to_lowercase()))
        .with_override("PORT", "http.port");
    let schema = declaration().naming(naming).extract().unwrap();

    let names: Vec<_> = schema
        .keys()
        .iter()
        .map(|key| schema.naming().external_name(key))
        .collect();
    assert_eq!(names, ["app.ignored", "app.host", "http.port"]);
}

#[test]
fn renames_are_layered_over_naming_strategy() {
    let schema = declaration()
        .rename("HOST", "server.host")
        .rename_all(KeyCase::Upper)
        .extract()
        .unwrap();
    let names: Vec<_> = schema
        .keys()
        .iter()
        .map(|key| schema.naming().external_name(key))
        .collect();
    assert_eq!(names, ["IGNORED", "server.host", "PORT"]);
}
