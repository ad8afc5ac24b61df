//! Code generation for `propkeys` – typed, validated configuration providers backed by a properties source.
//!
//! # Overview
//!
//! Generation is an explicit two-stage pipeline:
//!
//! 1. **Plain data.** A [`SchemaDeclaration`] (keys, properties path and optional customization hooks) is
//!    [extracted](Schema::extract()) into a [`Schema`], which is then turned into a [`ValidationContract`]:
//!    the external property name and validator for each non-null key. All generation-time errors
//!    ([`GenerationError`]) are raised at this stage.
//! 2. **Rendering.** A [renderer](render::Render) turns the schema and its contract into an artifact.
//!    [`RustRenderer`](render::RustRenderer) emits the provider code; [`PropertiesTemplate`](render::PropertiesTemplate)
//!    emits a skeleton properties file.
//!
//! The pipeline is used both by the `ConfigKeys` derive macro (re-exported from the `propkeys` crate) and by
//! build scripts via [`Generator`].
//!
//! # Customization hooks
//!
//! | Hook | Default |
//! |------|---------|
//! | [Null key](SchemaDeclaration::null_key()) | First declared key |
//! | [Naming strategy](SchemaDeclaration::naming()) | Lowercased declared key name |
//! | [Validator](SchemaDeclaration::validator()) | None (presence and non-emptiness only) |
//! | [Metadata tags](SchemaDeclaration::metadata_tag()) | None |
//!
//! # Examples
//!
//! ```
//! use propkeys_codegen::{render::PropertiesTemplate, Generator, SchemaDeclaration};
//!
//! let declaration = SchemaDeclaration::new("AppKey", "app.properties")
//!     .keys(["IGNORED", "HOST", "PORT"]);
//! let generator = Generator::new(declaration)?;
//! let template = generator.render(&PropertiesTemplate)?;
//! assert!(template.contains("\nhost=\n"));
//! assert!(template.contains("\nport=\n"));
//! assert!(!template.contains("ignored="));
//! # Ok::<_, propkeys_codegen::GenerationError>(())
//! ```

// Linter settings
#![warn(missing_docs)]

use proc_macro2::TokenStream;

pub use crate::{
    contract::{ContractEntry, ValidationContract},
    error::{GenerationError, SchemaDefect},
    generator::Generator,
    schema::{Key, KeyCase, NamingStrategy, Schema, SchemaDeclaration, UnknownKeyCase},
};
use crate::render::{Render, RustRenderer};

mod contract;
mod error;
mod generator;
pub mod render;
mod schema;

/// Runs the entire pipeline for the provided declaration and returns the provider code.
///
/// # Errors
///
/// Propagates extraction, derivation and rendering errors.
pub fn generate(declaration: SchemaDeclaration) -> Result<TokenStream, GenerationError> {
    let schema = declaration.extract()?;
    let contract = ValidationContract::derive(&schema)?;
    RustRenderer.render(&schema, &contract)
}
