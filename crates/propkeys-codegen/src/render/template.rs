//! Properties template renderer.

use std::fmt::Write as _;

use super::Render;
use crate::{GenerationError, Schema, ValidationContract};

/// Renders a skeleton properties file listing every property required by the provider.
///
/// Useful to bootstrap a properties source or to document it. Values are left empty, so the skeleton
/// itself does not pass validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesTemplate;

impl Render for PropertiesTemplate {
    type Output = String;

    fn render(
        &self,
        schema: &Schema,
        contract: &ValidationContract,
    ) -> Result<String, GenerationError> {
        let mut output = String::new();
        // Writing to a `String` is infallible
        writeln!(
            output,
            "# Properties for `{}` loaded from `{}`.",
            schema.provider_name(),
            schema.properties_path()
        )
        .ok();
        writeln!(output, "# All properties are required and must not be blank.").ok();

        for entry in contract.entries() {
            writeln!(output).ok();
            writeln!(output, "# Key: {}", entry.key().name()).ok();
            if let Some(validator) = entry.validator() {
                writeln!(output, "# Validated by: {validator}").ok();
            }
            writeln!(output, "{}=", entry.external_name()).ok();
        }
        Ok(output)
    }
}
