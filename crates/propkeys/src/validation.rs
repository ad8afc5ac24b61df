//! Property value validation.
//!
//! # Overview
//!
//! Validation beyond presence and non-blankness is encapsulated in the [`Validate`] trait. Generated providers
//! wrap validator functions (`fn(&str) -> bool`) into [`Predicate`]s.
//!
//! # Examples
//!
//! ```
//! use propkeys::{ConfigKeys, ConfigProvider, InitError, ViolationKind};
//! # use propkeys::testing;
//!
//! #[derive(Debug, Clone, Copy, ConfigKeys)]
//! #[config(properties_path = "app.properties", validate = not_localhost)]
//! pub enum AppKey {
//!     None,
//!     Host,
//!     #[config(validate = AppKey::is_port)]
//!     Port,
//! }
//!
//! fn not_localhost(value: &str) -> bool {
//!     value != "localhost"
//! }
//!
//! impl AppKey {
//!     fn is_port(value: &str) -> bool {
//!         value.parse::<u16>().is_ok_and(|port| port != 0)
//!     }
//! }
//!
//! let err = testing::test::<ConfigurationProvider>([("host", "localhost"), ("port", "0")])
//!     .unwrap_err();
//! let InitError::Violations { violations, .. } = &err else {
//!     unreachable!();
//! };
//! assert_eq!(violations.len(), 2);
//! let first = violations.first();
//! assert_eq!(first.key(), "Host");
//! assert_matches::assert_matches!(first.kind(), ViolationKind::InvalidPropertyValue { .. });
//! assert!(err.to_string().contains("must satisfy `not_localhost`"));
//! ```

use std::fmt;

/// Generic validation of a property value.
///
/// Validation receives the raw property value. It is only invoked for present, non-blank values.
pub trait Validate: 'static + Send + Sync {
    /// Describes this validation.
    ///
    /// # Errors
    ///
    /// Should propagate formatting errors.
    fn describe(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Validates a property value.
    fn validate(&self, value: &str) -> bool;
}

impl fmt::Debug for dyn Validate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("Validate")
            .field(&self.to_string())
            .finish()
    }
}

impl fmt::Display for dyn Validate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.describe(formatter)
    }
}

/// Validation via a named predicate function.
#[derive(Debug, Clone, Copy)]
pub struct Predicate {
    name: &'static str,
    check: fn(&str) -> bool,
}

impl Predicate {
    /// Creates a predicate with the specified name (usually, the path to the function).
    pub const fn new(name: &'static str, check: fn(&str) -> bool) -> Self {
        Self { name, check }
    }

    /// Returns the name of the predicate.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl Validate for Predicate {
    fn describe(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "must satisfy `{}`", self.name)
    }

    fn validate(&self, value: &str) -> bool {
        (self.check)(value)
    }
}
