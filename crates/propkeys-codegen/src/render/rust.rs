//! Rust renderer.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;

use super::Render;
use crate::{GenerationError, Schema, ValidationContract, error::SchemaDefect};

/// Renders the provider as Rust code.
///
/// The output contains:
///
/// - The key enum (only if [emitted](Schema::emits_key_enum())) and its `ConfigKey` implementation.
/// - The provider type with pass-through metadata tags. The provider implements `ConfigProvider`; its
///   initialization runs the validation routine of the `propkeys` crate on a static contract.
/// - The qualifier type wrapping a key, and the corresponding `Produces` implementation for the provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustRenderer;

impl Render for RustRenderer {
    type Output = TokenStream;

    fn render(
        &self,
        schema: &Schema,
        contract: &ValidationContract,
    ) -> Result<TokenStream, GenerationError> {
        RustItems::new(schema)?.render(contract)
    }
}

/// Parsed Rust items referenced by the generated code.
struct RustItems<'a> {
    schema: &'a Schema,
    cr: syn::Path,
    vis: syn::Visibility,
    enum_name: Ident,
    provider_name: Ident,
    qualifier_name: Ident,
    variants: Vec<Ident>,
    tags: Vec<syn::Meta>,
}

impl<'a> RustItems<'a> {
    fn new(schema: &'a Schema) -> Result<Self, GenerationError> {
        let malformed = |defect| GenerationError::malformed(schema.enum_name(), defect);
        let ident = |what: &'static str, value: &str| {
            syn::parse_str::<Ident>(value).map_err(|_| {
                malformed(SchemaDefect::InvalidIdentifier {
                    what,
                    value: value.to_owned(),
                })
            })
        };

        let cr: syn::Path = syn::parse_str(schema.crate_path()).map_err(|_| {
            malformed(SchemaDefect::InvalidPath {
                what: "crate path",
                value: schema.crate_path().to_owned(),
            })
        })?;
        let vis: syn::Visibility = syn::parse_str(schema.visibility()).map_err(|_| {
            malformed(SchemaDefect::InvalidPath {
                what: "visibility",
                value: schema.visibility().to_owned(),
            })
        })?;
        let variants: Vec<Ident> = schema
            .keys()
            .iter()
            .map(|key| ident("key variant", key.variant()))
            .collect::<Result<_, _>>()?;
        let tags: Vec<syn::Meta> = schema
            .metadata_tags()
            .iter()
            .map(|tag| {
                syn::parse_str(tag)
                    .map_err(|_| malformed(SchemaDefect::InvalidMetadataTag { tag: tag.clone() }))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            schema,
            cr,
            vis,
            enum_name: ident("enum name", schema.enum_name())?,
            provider_name: ident("provider name", schema.provider_name())?,
            qualifier_name: ident("qualifier name", schema.qualifier_name())?,
            variants,
            tags,
        })
    }

    fn validator_path(&self, path: &str) -> Result<syn::Path, GenerationError> {
        syn::parse_str(path).map_err(|_| {
            let defect = SchemaDefect::InvalidPath {
                what: "validator",
                value: path.to_owned(),
            };
            GenerationError::malformed(self.schema.enum_name(), defect)
        })
    }

    fn render(&self, contract: &ValidationContract) -> Result<TokenStream, GenerationError> {
        let key_enum = self.schema.emits_key_enum().then(|| self.render_key_enum());
        let key_impl = self.render_key_impl();
        let provider = self.render_provider(contract)?;
        let qualifier = self.render_qualifier();
        Ok(quote! {
            #key_enum
            #key_impl
            #provider
            #qualifier
        })
    }

    fn render_key_enum(&self) -> TokenStream {
        let vis = &self.vis;
        let enum_name = &self.enum_name;
        let doc = format!(
            " Configuration keys loaded from `{}`.",
            self.schema.properties_path()
        );
        let variants = self.schema.keys().iter().zip(&self.variants).map(|(key, variant)| {
            let doc = if self.schema.is_null_key(key) {
                format!(" `{}` (null key, never looked up)", key.name())
            } else {
                format!(" `{}`", key.name())
            };
            quote!(#[doc = #doc] #variant)
        });

        quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            #vis enum #enum_name {
                #(#variants,)*
            }
        }
    }

    fn render_key_impl(&self) -> TokenStream {
        let cr = &self.cr;
        let enum_name = &self.enum_name;
        let variants = &self.variants;
        let names = self.schema.keys().iter().map(|key| key.name());
        let ordinals = self.schema.keys().iter().map(|key| key.ordinal());
        let null_variant = &self.variants[self.schema.null_key().ordinal()];

        quote! {
            impl #cr::ConfigKey for #enum_name {
                const ALL: &'static [Self] = &[#(Self::#variants,)*];
                const NULL: Self = Self::#null_variant;

                fn name(self) -> &'static str {
                    match self {
                        #(Self::#variants => #names,)*
                    }
                }

                fn ordinal(self) -> usize {
                    match self {
                        #(Self::#variants => #ordinals,)*
                    }
                }
            }
        }
    }

    fn render_provider(&self, contract: &ValidationContract) -> Result<TokenStream, GenerationError> {
        let cr = &self.cr;
        let vis = &self.vis;
        let enum_name = &self.enum_name;
        let provider_name = &self.provider_name;
        let provider_str = self.schema.provider_name();
        let properties_path = self.schema.properties_path();
        let null_variant = &self.variants[contract.null_key().ordinal()];
        let tags = &self.tags;

        let validator_paths = contract.validators();
        let validator_statics: Vec<_> = (0..validator_paths.len())
            .map(|i| Ident::new(&format!("VALIDATOR_{i}"), Span::call_site()))
            .collect();
        let validators = validator_paths
            .iter()
            .zip(&validator_statics)
            .map(|(&path, static_name)| {
                let path_tokens = self.validator_path(path)?;
                Ok(quote! {
                    static #static_name: #cr::validation::Predicate =
                        #cr::validation::Predicate::new(#path, #path_tokens);
                })
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;

        let entries = contract.entries().iter().map(|entry| {
            let variant = &self.variants[entry.key().ordinal()];
            let external_name = entry.external_name();
            if let Some(path) = entry.validator() {
                // `validators()` contains every validator path by construction
                let idx = validator_paths
                    .iter()
                    .position(|&p| p == path)
                    .unwrap_or_default();
                let static_name = &validator_statics[idx];
                quote!(#cr::ContractEntry::validated(#enum_name::#variant, #external_name, &#static_name))
            } else {
                quote!(#cr::ContractEntry::new(#enum_name::#variant, #external_name))
            }
        });
        let entry_count = contract.entries().len();

        let doc = format!(
            " Validated configuration for [`{}`] loaded from `{properties_path}`.",
            self.schema.enum_name()
        );
        Ok(quote! {
            #[doc = #doc]
            #(#[#tags])*
            #vis struct #provider_name {
                inner: #cr::Provider<#enum_name>,
            }

            impl #cr::ConfigProvider for #provider_name {
                type Key = #enum_name;

                fn contract() -> &'static #cr::Contract<#enum_name> {
                    #(#validators)*
                    static ENTRIES: [#cr::ContractEntry<#enum_name>; #entry_count] = [
                        #(#entries,)*
                    ];
                    static CONTRACT: #cr::Contract<#enum_name> = #cr::Contract::new(
                        #provider_str,
                        #properties_path,
                        #enum_name::#null_variant,
                        &ENTRIES,
                    );
                    &CONTRACT
                }

                fn from_inner(inner: #cr::Provider<#enum_name>) -> Self {
                    Self { inner }
                }

                fn inner(&self) -> &#cr::Provider<#enum_name> {
                    &self.inner
                }

                fn inner_mut(&mut self) -> &mut #cr::Provider<#enum_name> {
                    &mut self.inner
                }
            }

            impl ::core::default::Default for #provider_name {
                fn default() -> Self {
                    <Self as #cr::ConfigProvider>::new()
                }
            }

            impl ::core::fmt::Debug for #provider_name {
                fn fmt(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    formatter
                        .debug_struct(#provider_str)
                        .field("inner", &self.inner)
                        .finish()
                }
            }
        })
    }

    fn render_qualifier(&self) -> TokenStream {
        let cr = &self.cr;
        let vis = &self.vis;
        let enum_name = &self.enum_name;
        let provider_name = &self.provider_name;
        let qualifier_name = &self.qualifier_name;
        let doc = format!(
            " Qualifier requesting the value of a specific [`{}`] from [`{}`].",
            self.schema.enum_name(),
            self.schema.provider_name()
        );

        quote! {
            #[doc = #doc]
            #[derive(Debug, Clone, Copy)]
            #vis struct #qualifier_name(pub #enum_name);

            impl ::core::convert::From<#enum_name> for #qualifier_name {
                fn from(key: #enum_name) -> Self {
                    Self(key)
                }
            }

            impl #cr::Qualifier for #qualifier_name {
                type Key = #enum_name;
                type Provider = #provider_name;

                fn key(&self) -> #enum_name {
                    self.0
                }
            }

            impl #cr::Produces<#qualifier_name> for #provider_name {
                fn produce(
                    &self,
                    qualifier: #qualifier_name,
                ) -> ::core::result::Result<&str, #cr::ProviderError> {
                    #cr::ConfigProvider::get(self, qualifier.0)
                }
            }
        }
    }
}
