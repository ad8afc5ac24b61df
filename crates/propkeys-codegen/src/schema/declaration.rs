//! Declaration builder and schema extraction.

use std::collections::{BTreeMap, HashMap};

use heck::ToUpperCamelCase;
use syn::{Token, punctuated::Punctuated};

use super::{Key, KeyCase, NamingStrategy, Schema};
use crate::error::{GenerationError, SchemaDefect};

const DEFAULT_PROVIDER_NAME: &str = "ConfigurationProvider";
const DEFAULT_QUALIFIER_NAME: &str = "Configuration";
const DEFAULT_CRATE_PATH: &str = "::propkeys";
const DEFAULT_VISIBILITY: &str = "pub";

/// Raw declaration of a configuration enumeration: keys, properties path and optional customization hooks.
///
/// This is the sole input of the generation pipeline. Hooks that are not specified fall back to defaults:
///
/// - The first declared key is the null key.
/// - Keys are mapped to external names by lowercasing their declared names.
/// - Values are only checked for presence and non-emptiness.
/// - The provider is named `ConfigurationProvider`, and the qualifier `Configuration`.
///
/// # Examples
///
/// ```
/// use propkeys_codegen::{KeyCase, Schema, SchemaDeclaration};
///
/// let declaration = SchemaDeclaration::new("AppKey", "config/app.properties")
///     .keys(["IGNORED", "HOST", "PORT", "DB_URL"])
///     .rename_all(KeyCase::Dot)
///     .key_validator("PORT", "crate::validators::is_port")
///     .metadata_tag("derive(Clone)");
/// let schema = Schema::extract(declaration)?;
/// assert_eq!(schema.null_key().name(), "IGNORED");
///
/// let contract = schema.contract()?;
/// let names: Vec<_> = contract.entries().iter().map(|entry| entry.external_name()).collect();
/// assert_eq!(names, ["host", "port", "db.url"]);
/// # Ok::<_, propkeys_codegen::GenerationError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use = "declaration must be extracted into a schema"]
pub struct SchemaDeclaration {
    enum_name: String,
    keys: Vec<String>,
    null_keys: Vec<String>,
    naming: Option<NamingStrategy>,
    renames: Vec<(String, String)>,
    validator: Option<String>,
    key_validators: Vec<(String, String)>,
    metadata_tags: Vec<String>,
    properties_path: String,
    provider_name: Option<String>,
    qualifier_name: Option<String>,
    crate_path: Option<String>,
    visibility: Option<String>,
    emit_key_enum: bool,
}

impl SchemaDeclaration {
    /// Starts a declaration for the enumeration with the specified name, loaded from the specified properties path.
    pub fn new(enum_name: impl Into<String>, properties_path: impl Into<String>) -> Self {
        Self {
            enum_name: enum_name.into(),
            keys: vec![],
            null_keys: vec![],
            naming: None,
            renames: vec![],
            validator: None,
            key_validators: vec![],
            metadata_tags: vec![],
            properties_path: properties_path.into(),
            provider_name: None,
            qualifier_name: None,
            crate_path: None,
            visibility: None,
            emit_key_enum: true,
        }
    }

    /// Appends a key to the enumeration.
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.keys.push(name.into());
        self
    }

    /// Appends multiple keys to the enumeration.
    pub fn keys<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.keys.extend(names.into_iter().map(Into::into));
        self
    }

    /// Designates the null key. Designating more than one key is an error.
    pub fn null_key(mut self, name: impl Into<String>) -> Self {
        self.null_keys.push(name.into());
        self
    }

    /// Sets the key naming strategy.
    pub fn naming(mut self, naming: NamingStrategy) -> Self {
        self.naming = Some(naming);
        self
    }

    /// Sets a case conversion as the key naming strategy.
    pub fn rename_all(self, case: KeyCase) -> Self {
        self.naming(NamingStrategy::case(case))
    }

    /// Overrides the external name of a single key on top of the naming strategy.
    pub fn rename(mut self, key: impl Into<String>, external_name: impl Into<String>) -> Self {
        self.renames.push((key.into(), external_name.into()));
        self
    }

    /// Sets the path to a `fn(&str) -> bool` validator applied to all non-null keys without a dedicated validator.
    pub fn validator(mut self, path: impl Into<String>) -> Self {
        self.validator = Some(path.into());
        self
    }

    /// Sets the path to a `fn(&str) -> bool` validator for a single key.
    pub fn key_validator(mut self, key: impl Into<String>, path: impl Into<String>) -> Self {
        self.key_validators.push((key.into(), path.into()));
        self
    }

    /// Adds a metadata tag copied verbatim as an attribute onto the provider type, e.g. `derive(Clone)`.
    ///
    /// `Debug` and `Default` are always implemented for the provider, so deriving either of them
    /// is rejected during extraction.
    pub fn metadata_tag(mut self, tag: impl Into<String>) -> Self {
        self.metadata_tags.push(tag.into());
        self
    }

    /// Sets the name of the generated provider type.
    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = Some(name.into());
        self
    }

    /// Sets the name of the generated qualifier type.
    pub fn qualifier_name(mut self, name: impl Into<String>) -> Self {
        self.qualifier_name = Some(name.into());
        self
    }

    /// Sets the path to the `propkeys` crate used by the generated code. Defaults to `::propkeys`.
    pub fn crate_path(mut self, path: impl Into<String>) -> Self {
        self.crate_path = Some(path.into());
        self
    }

    /// Sets visibility of the generated items, e.g. `pub(crate)`. An empty string means private items.
    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    /// Specifies whether the key enumeration itself should be generated (`true` by default). If it is not generated,
    /// declared key names must be identifiers of the existing enum variants.
    pub fn emit_key_enum(mut self, emit: bool) -> Self {
        self.emit_key_enum = emit;
        self
    }

    /// Extracts the schema from this declaration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MalformedSchema`] if the declaration is inconsistent.
    pub fn extract(self) -> Result<Schema, GenerationError> {
        let enum_name = self.enum_name.clone();
        self.extract_inner()
            .map_err(|defect| GenerationError::malformed(&enum_name, defect))
    }

    fn extract_inner(self) -> Result<Schema, SchemaDefect> {
        check_ident("enum name", &self.enum_name)?;
        let keys = self.extract_keys()?;
        let key_index: HashMap<_, _> = keys
            .iter()
            .map(|key| (key.name.as_str(), key.ordinal))
            .collect();
        let find_key = |hook: &'static str, name: &str| {
            key_index
                .get(name)
                .copied()
                .ok_or_else(|| SchemaDefect::UnknownKey {
                    hook,
                    key: name.to_owned(),
                })
        };

        let null_key = match self.null_keys.as_slice() {
            [] => 0,
            [name] => find_key("null key designation", name)?,
            [first, second, ..] => {
                return Err(SchemaDefect::MultipleNullKeys {
                    first: first.clone(),
                    second: second.clone(),
                });
            }
        };

        let mut naming = self.naming.unwrap_or_default();
        for (key, external_name) in self.renames {
            naming = naming.with_override(key, external_name);
        }
        for key in naming.overridden_keys() {
            find_key("rename", key)?;
        }

        if let Some(path) = &self.validator {
            check_path("validator", path)?;
        }
        let mut key_validators = BTreeMap::new();
        for (key, path) in self.key_validators {
            let ordinal = find_key("key validator", &key)?;
            if ordinal == null_key {
                return Err(SchemaDefect::ValidatedNullKey { key });
            }
            check_path("validator", &path)?;
            key_validators.insert(ordinal, path);
        }

        for tag in &self.metadata_tags {
            check_metadata_tag(tag)?;
        }

        if self.properties_path.trim().is_empty() {
            return Err(SchemaDefect::EmptyPropertiesPath);
        }

        let provider_name = self
            .provider_name
            .unwrap_or_else(|| DEFAULT_PROVIDER_NAME.to_owned());
        check_ident("provider name", &provider_name)?;
        let qualifier_name = self
            .qualifier_name
            .unwrap_or_else(|| DEFAULT_QUALIFIER_NAME.to_owned());
        check_ident("qualifier name", &qualifier_name)?;
        let type_names = [
            ("key enum", &self.enum_name),
            ("provider", &provider_name),
            ("qualifier", &qualifier_name),
        ];
        for (i, &(first, first_name)) in type_names.iter().enumerate() {
            for &(second, second_name) in &type_names[i + 1..] {
                if first_name == second_name {
                    return Err(SchemaDefect::TypeNameClash {
                        first,
                        second,
                        name: first_name.clone(),
                    });
                }
            }
        }

        let crate_path = self
            .crate_path
            .unwrap_or_else(|| DEFAULT_CRATE_PATH.to_owned());
        check_path("crate path", &crate_path)?;
        let visibility = self
            .visibility
            .unwrap_or_else(|| DEFAULT_VISIBILITY.to_owned());
        if syn::parse_str::<syn::Visibility>(&visibility).is_err() {
            return Err(SchemaDefect::InvalidPath {
                what: "visibility",
                value: visibility,
            });
        }

        let schema = Schema {
            enum_name: self.enum_name,
            keys,
            null_key,
            naming,
            validator: self.validator,
            key_validators,
            metadata_tags: self.metadata_tags,
            properties_path: self.properties_path,
            provider_name,
            qualifier_name,
            crate_path,
            visibility,
            emit_key_enum: self.emit_key_enum,
        };
        tracing::debug!(
            schema = %schema.enum_name,
            keys = schema.keys.len(),
            null_key = schema.null_key().name(),
            "extracted schema"
        );
        Ok(schema)
    }

    fn extract_keys(&self) -> Result<Vec<Key>, SchemaDefect> {
        if self.keys.is_empty() {
            return Err(SchemaDefect::NoKeys);
        }

        let mut names = HashMap::with_capacity(self.keys.len());
        let mut variants = HashMap::with_capacity(self.keys.len());
        let mut keys = Vec::with_capacity(self.keys.len());
        for (ordinal, name) in self.keys.iter().enumerate() {
            if name.is_empty() {
                return Err(SchemaDefect::EmptyKeyName { ordinal });
            }
            if names.insert(name.as_str(), ordinal).is_some() {
                return Err(SchemaDefect::DuplicateKey { key: name.clone() });
            }

            let variant = if self.emit_key_enum {
                name.to_upper_camel_case()
            } else {
                name.clone()
            };
            check_ident("key variant", &variant)?;
            if let Some(prev) = variants.insert(variant.clone(), ordinal) {
                return Err(SchemaDefect::DuplicateVariant {
                    first: self.keys[prev].clone(),
                    second: name.clone(),
                    variant,
                });
            }
            keys.push(Key::new(name.clone(), ordinal, variant));
        }
        Ok(keys)
    }
}

/// Traits the provider always implements.
const GENERATED_PROVIDER_IMPLS: [&str; 2] = ["Debug", "Default"];

fn check_metadata_tag(tag: &str) -> Result<(), SchemaDefect> {
    let Ok(meta) = syn::parse_str::<syn::Meta>(tag) else {
        return Err(SchemaDefect::InvalidMetadataTag { tag: tag.to_owned() });
    };
    let syn::Meta::List(list) = meta else {
        return Ok(());
    };
    if !list.path.is_ident("derive") {
        return Ok(());
    }

    let derived = list
        .parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
        .map_err(|_| SchemaDefect::InvalidMetadataTag { tag: tag.to_owned() })?;
    for path in &derived {
        let Some(last) = path.segments.last() else {
            continue;
        };
        if let Some(name) = GENERATED_PROVIDER_IMPLS
            .into_iter()
            .find(|name| last.ident == *name)
        {
            return Err(SchemaDefect::ConflictingMetadataTag {
                tag: tag.to_owned(),
                derived: name,
            });
        }
    }
    Ok(())
}

fn check_ident(what: &'static str, value: &str) -> Result<(), SchemaDefect> {
    if syn::parse_str::<syn::Ident>(value).is_err() {
        return Err(SchemaDefect::InvalidIdentifier {
            what,
            value: value.to_owned(),
        });
    }
    Ok(())
}

fn check_path(what: &'static str, value: &str) -> Result<(), SchemaDefect> {
    if syn::parse_str::<syn::Path>(value).is_err() {
        return Err(SchemaDefect::InvalidPath {
            what,
            value: value.to_owned(),
        });
    }
    Ok(())
}
