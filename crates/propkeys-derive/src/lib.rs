//! Procedural macros for `propkeys`.
//!
//! All macros in this crate are re-exported from the `propkeys` crate. See its docs for more details
//! and the examples of usage.

// General settings
#![recursion_limit = "128"]
// Linter settings
#![allow(missing_docs)] // Adding docs here would interfere with docs in the main crate

extern crate proc_macro;

use proc_macro::TokenStream;

mod attrs;
mod keys;

#[proc_macro_derive(ConfigKeys, attributes(config))]
pub fn config_keys(input: TokenStream) -> TokenStream {
    keys::impl_config_keys(input)
}
