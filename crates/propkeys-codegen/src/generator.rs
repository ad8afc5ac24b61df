//! Build script integration.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{
    GenerationError, Schema, SchemaDeclaration, ValidationContract,
    render::{Render, RustRenderer},
};

const HEADER: &str = "// @generated by propkeys-codegen. Do not edit by hand.\n";

/// Generation pipeline for build scripts: extracts a schema, derives its contract and renders the artifacts.
///
/// All generation-time errors surface in [`Self::new()`], so no output is written for a malformed declaration.
///
/// # Examples
///
/// In `build.rs`:
///
/// ```no_run
/// use propkeys_codegen::{Generator, SchemaDeclaration};
///
/// let declaration = SchemaDeclaration::new("AppKey", "config/app.properties")
///     .keys(["IGNORED", "HOST", "PORT"])
///     .key_validator("PORT", "crate::validators::is_port");
/// Generator::new(declaration)?.write_to_out_dir("app_config.rs")?;
/// # Ok::<_, propkeys_codegen::GenerationError>(())
/// ```
///
/// Then, in the crate code:
///
/// ```ignore
/// include!(concat!(env!("OUT_DIR"), "/app_config.rs"));
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    schema: Schema,
    contract: ValidationContract,
}

impl Generator {
    /// Runs extraction and contract derivation for the provided declaration.
    ///
    /// # Errors
    ///
    /// Propagates extraction and derivation errors.
    pub fn new(declaration: SchemaDeclaration) -> Result<Self, GenerationError> {
        let schema = declaration.extract()?;
        let contract = ValidationContract::derive(&schema)?;
        Ok(Self { schema, contract })
    }

    /// Returns the extracted schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns the derived contract.
    pub fn contract(&self) -> &ValidationContract {
        &self.contract
    }

    /// Renders an artifact using the provided renderer.
    ///
    /// # Errors
    ///
    /// Propagates rendering errors.
    pub fn render<R: Render>(&self, renderer: &R) -> Result<R::Output, GenerationError> {
        renderer.render(&self.schema, &self.contract)
    }

    /// Renders Rust source code for the provider.
    ///
    /// # Errors
    ///
    /// Propagates rendering errors.
    pub fn rust_source(&self) -> Result<String, GenerationError> {
        let tokens = self.render(&RustRenderer)?;
        Ok(format!("{HEADER}{tokens}\n"))
    }

    /// Writes Rust source code for the provider to the specified path. The file is not touched if it already has
    /// the expected contents, so that dependent compilation units are not rebuilt.
    ///
    /// Returns `true` if the file was (re)written.
    ///
    /// # Errors
    ///
    /// Propagates rendering and I/O errors.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<bool, GenerationError> {
        let path = path.as_ref();
        let source = self.rust_source()?;
        if fs::read_to_string(path).is_ok_and(|existing| existing == source) {
            tracing::debug!(path = %path.display(), "generated code is up to date");
            return Ok(false);
        }

        fs::write(path, source).map_err(|source| GenerationError::Io {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(
            path = %path.display(),
            schema = self.schema.enum_name(),
            "wrote generated code"
        );
        Ok(true)
    }

    /// Writes Rust source code to a file with the specified name in the `OUT_DIR` of a build script.
    ///
    /// # Errors
    ///
    /// Returns an error if `OUT_DIR` is not set, and propagates rendering and I/O errors.
    pub fn write_to_out_dir(&self, file_name: &str) -> Result<PathBuf, GenerationError> {
        let out_dir = env::var_os("OUT_DIR").ok_or(GenerationError::MissingOutDir)?;
        let path = Path::new(&out_dir).join(file_name);
        self.write_to(&path)?;
        Ok(path)
    }
}
