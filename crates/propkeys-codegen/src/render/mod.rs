//! Rendering stage of the generation pipeline.
//!
//! Renderers only consume plain data ([`Schema`] and [`ValidationContract`]); they never re-validate the schema.
//! All rendering is deterministic: identical inputs produce identical outputs.

pub use self::{rust::RustRenderer, template::PropertiesTemplate};
use crate::{GenerationError, Schema, ValidationContract};

mod rust;
mod template;

/// Renderer of a provider artifact for a specific target.
pub trait Render {
    /// Rendered artifact.
    type Output;

    /// Renders the artifact for the provided schema and its contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema contains items that cannot be represented in the target.
    /// Schemas produced by [`Schema::extract()`] never lead to errors for built-in renderers.
    fn render(
        &self,
        schema: &Schema,
        contract: &ValidationContract,
    ) -> Result<Self::Output, GenerationError>;
}
