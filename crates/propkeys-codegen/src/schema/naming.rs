//! Key naming strategies, i.e. rules mapping keys to external property names.

use std::{collections::BTreeMap, fmt, str::FromStr, sync::Arc};

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
};

use super::Key;

/// Case conversion applied to declared key names.
///
/// Conversions other than [`Self::Lower`] and [`Self::Upper`] split names into words on case changes
/// and non-alphanumeric chars, so both `DbUrl` and `DB_URL` convert to `db_url` with [`Self::Snake`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum KeyCase {
    /// `lowercase`: the whole name is lowercased with no word splitting.
    Lower,
    /// `UPPERCASE`: the whole name is uppercased with no word splitting.
    Upper,
    /// `snake_case`
    Snake,
    /// `kebab-case`
    Kebab,
    /// `camelCase`
    Camel,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnake,
    /// `SCREAMING-KEBAB-CASE`
    ScreamingKebab,
    /// `dot.case`
    Dot,
}

impl KeyCase {
    const ALL: [Self; 8] = [
        Self::Lower,
        Self::Upper,
        Self::Snake,
        Self::Kebab,
        Self::Camel,
        Self::ScreamingSnake,
        Self::ScreamingKebab,
        Self::Dot,
    ];

    /// Returns the name of this case as accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lower => "lowercase",
            Self::Upper => "UPPERCASE",
            Self::Snake => "snake_case",
            Self::Kebab => "kebab-case",
            Self::Camel => "camelCase",
            Self::ScreamingSnake => "SCREAMING_SNAKE_CASE",
            Self::ScreamingKebab => "SCREAMING-KEBAB-CASE",
            Self::Dot => "dot.case",
        }
    }

    /// Converts the provided name.
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
            Self::Snake => name.to_snake_case(),
            Self::Kebab => name.to_kebab_case(),
            Self::Camel => name.to_lower_camel_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
            Self::ScreamingKebab => name.to_shouty_kebab_case(),
            Self::Dot => name.to_snake_case().replace('_', "."),
        }
    }
}

impl fmt::Display for KeyCase {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Error parsing a [`KeyCase`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key case `{0}`; expected one of lowercase, UPPERCASE, snake_case, kebab-case, camelCase, SCREAMING_SNAKE_CASE, SCREAMING-KEBAB-CASE, dot.case")]
pub struct UnknownKeyCase(String);

impl FromStr for KeyCase {
    type Err = UnknownKeyCase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|case| case.as_str() == s)
            .ok_or_else(|| UnknownKeyCase(s.to_owned()))
    }
}

type CustomNaming = Arc<dyn Fn(&Key) -> String + Send + Sync>;

#[derive(Clone)]
enum BaseNaming {
    Case(KeyCase),
    Custom(CustomNaming),
}

impl fmt::Debug for BaseNaming {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Case(case) => formatter.debug_tuple("Case").field(case).finish(),
            Self::Custom(_) => formatter.debug_tuple("Custom").field(&"_").finish(),
        }
    }
}

/// Rule mapping a [`Key`] to the name of the property it is looked up by.
///
/// The default strategy lowercases declared key names. Per-key overrides take precedence over the base rule.
///
/// # Examples
///
/// ```
/// use propkeys_codegen::{KeyCase, NamingStrategy};
///
/// let naming = NamingStrategy::case(KeyCase::Dot).with_override("PORT", "http.listen.port");
/// # let _ = naming;
/// ```
#[derive(Debug, Clone)]
pub struct NamingStrategy {
    base: BaseNaming,
    overrides: BTreeMap<String, String>,
}

impl Default for NamingStrategy {
    fn default() -> Self {
        Self::case(KeyCase::Lower)
    }
}

impl NamingStrategy {
    /// Applies a case conversion to declared key names.
    pub fn case(case: KeyCase) -> Self {
        Self {
            base: BaseNaming::Case(case),
            overrides: BTreeMap::new(),
        }
    }

    /// Uses a custom function. The function must be pure; it is called exactly once per key
    /// during contract derivation.
    pub fn custom(naming: impl Fn(&Key) -> String + Send + Sync + 'static) -> Self {
        Self {
            base: BaseNaming::Custom(Arc::new(naming)),
            overrides: BTreeMap::new(),
        }
    }

    /// Overrides the external name for the key with the specified declared name.
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, external_name: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), external_name.into());
        self
    }

    pub(crate) fn overridden_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.overrides.keys().map(String::as_str)
    }

    /// Resolves the external name for the provided key.
    pub fn external_name(&self, key: &Key) -> String {
        if let Some(name) = self.overrides.get(key.name()) {
            return name.clone();
        }
        match &self.base {
            BaseNaming::Case(case) => case.apply(key.name()),
            BaseNaming::Custom(naming) => naming(key),
        }
    }
}
