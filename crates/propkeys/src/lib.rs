//! `propkeys` – typed, validated configuration providers generated from closed key enumerations.
//!
//! # Overview
//!
//! A configuration is declared as an enum: each variant is a configuration key, one of the keys is designated
//! as the *null key* (a placeholder that is never looked up), and the enum is bound to a path to a properties source.
//! From this declaration, [`ConfigKeys`] (or a build script using the `propkeys-codegen` crate) generates
//! a *provider* – a type implementing [`ConfigProvider`] that:
//!
//! - Loads the properties source during [initialization](ConfigProvider::initialize()).
//! - Resolves every non-null key to an external property name (by default, the lowercased variant name).
//! - Checks that every property is present, non-blank and, if a validator is attached to the key, satisfies
//!   the validator. All violations are collected and reported at once ([`InitError::Violations`]).
//! - Afterwards, exposes validated values by key ([`ConfigProvider::get()`]).
//!
//! Besides the provider, the generated code contains a *qualifier* type wrapping a key. Qualifiers allow
//! to request values from a [`Registry`] of providers without naming provider types.
//!
//! # Provider lifecycle
//!
//! Provider state is tracked by [`ProviderState`]:
//!
//! ```text
//! Uninitialized -> Loading -> Validating -> Ready
//!                     |            |
//!                     +------------+------> Failed
//! ```
//!
//! `Ready` and `Failed` are terminal; a provider is initialized at most once. Values can only be
//! accessed in the `Ready` state; otherwise, accessors return [`ProviderError::NotReady`].
//!
//! # Properties sources
//!
//! [`Properties`] can be loaded from line-oriented `.properties` files, as well as from flat JSON and YAML objects.
//! The format is chosen based on the file extension; see [`PropertiesFormat`].
//!
//! # Examples
//!
//! ```
//! use propkeys::{ConfigKeys, ConfigProvider, Properties, NULL_VALUE};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, ConfigKeys)]
//! #[config(properties_path = "config/app.properties")]
//! pub enum AppKey {
//!     #[config(null)]
//!     Ignored,
//!     Host,
//!     #[config(validate = is_port)]
//!     Port,
//! }
//!
//! fn is_port(value: &str) -> bool {
//!     value.parse::<u16>().is_ok_and(|port| port != 0)
//! }
//!
//! let properties: Properties = [("host", "localhost"), ("port", "8080")].into_iter().collect();
//! let mut provider = ConfigurationProvider::new();
//! provider.initialize_from(&properties)?;
//!
//! assert_eq!(provider.get(AppKey::Host)?, "localhost");
//! assert_eq!(provider.get(AppKey::Port)?, "8080");
//! assert_eq!(provider.get(AppKey::Ignored)?, NULL_VALUE);
//! # Ok::<_, anyhow::Error>(())
//! ```
//!
//! ## Reporting violations
//!
//! ```
//! # use propkeys::{ConfigKeys, ConfigProvider, InitError, Properties, ProviderState, ViolationKind};
//! #[derive(Debug, Clone, Copy, ConfigKeys)]
//! #[config(properties_path = "config/app.properties", rename_all = "snake_case")]
//! pub enum AppKey {
//!     None,
//!     Host,
//!     DbUrl,
//! }
//!
//! let properties: Properties = [("host", "  ")].into_iter().collect();
//! let mut provider = ConfigurationProvider::new();
//! let err = provider.initialize_from(&properties).unwrap_err();
//! let InitError::Violations { violations, .. } = &err else {
//!     unreachable!();
//! };
//! let keys: Vec<_> = violations.keys().collect();
//! assert_eq!(keys, ["Host", "DbUrl"]);
//! assert!(violations
//!     .iter()
//!     .all(|violation| *violation.kind() == ViolationKind::MissingOrEmptyProperty));
//!
//! assert_eq!(provider.state(), ProviderState::Failed);
//! assert!(provider.get(AppKey::Host).is_err());
//! ```

// Linter settings
#![warn(missing_docs)]

use std::fmt;

/// Derives a configuration provider for a field-less enum.
///
/// # Container attributes
///
/// Specified as `#[config(..)]` on the enum:
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `properties_path = "…"` | **Required.** Path to the properties source loaded by [`ConfigProvider::initialize()`]. |
/// | `rename_all = "…"` | Case conversion applied to variant names to get property names. One of `lowercase` (default), `UPPERCASE`, `snake_case`, `kebab-case`, `camelCase`, `SCREAMING_SNAKE_CASE`, `SCREAMING-KEBAB-CASE`, `dot.case`. |
/// | `validate = path` | Path to a `fn(&str) -> bool` validator applied to all non-null keys without a dedicated validator. |
/// | `provider = "Name"` | Name of the generated provider type; `ConfigurationProvider` by default. |
/// | `qualifier = "Name"` | Name of the generated qualifier type; `Configuration` by default. |
/// | `pass(…)` | Attribute copied verbatim onto the provider type, e.g. `pass(must_use)`. May be repeated. `Debug` and `Default` are always implemented for the provider, so `pass(derive(Debug))` and `pass(derive(Default))` are rejected. |
/// | `crate = path` | Path to this crate; `::propkeys` by default. |
///
/// # Variant attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `null` | Designates the null key. If not specified, the first variant is the null key. |
/// | `rename = "…"` | Overrides the property name for the key. |
/// | `validate = path` | Path to a `fn(&str) -> bool` validator for the key. |
///
/// The enum itself must implement `Debug`, `Clone` and `Copy`. The generated items have the same visibility
/// as the enum.
///
/// Generation-time errors (e.g., several variants mapped to the same property name) are reported
/// as compilation errors.
pub use propkeys_derive::ConfigKeys;

pub use self::{
    contract::{Contract, ContractEntry},
    error::{
        InitError, ProviderError, ResolveError, SourceError, Violation, ViolationKind, Violations,
    },
    provider::{ConfigProvider, Provider, ProviderState},
    qualifier::{Produces, Qualifier},
    registry::Registry,
    source::{Properties, PropertiesFormat},
};

mod contract;
mod error;
mod provider;
mod qualifier;
mod registry;
mod source;
pub mod testing;
#[cfg(test)]
mod testonly;
pub mod validation;

/// Value returned by providers for the null key.
pub const NULL_VALUE: &str = "";

/// Closed enumeration of configuration keys.
///
/// This trait is implemented by [`ConfigKeys`]; it should not be implemented manually.
pub trait ConfigKey: Copy + fmt::Debug + Send + Sync + 'static {
    /// All keys in the declaration order.
    const ALL: &'static [Self];
    /// The null key, which is excluded from validation and never looked up.
    const NULL: Self;

    /// Returns the declared name of this key.
    fn name(self) -> &'static str;
    /// Returns the zero-based position of this key in [`Self::ALL`].
    fn ordinal(self) -> usize;
}
