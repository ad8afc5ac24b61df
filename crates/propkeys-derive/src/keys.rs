//! `ConfigKeys` derive macro implementation.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::ToTokens;
use syn::{Data, DeriveInput, Fields, Ident};

use propkeys_codegen::{GenerationError, SchemaDeclaration};

use crate::attrs::{ContainerAttrs, VariantAttrs, path_to_string};


struct KeyVariant {
    ident: Ident,
    attrs: VariantAttrs,
}

struct ConfigKeysImpl {
    attrs: ContainerAttrs,
    vis: syn::Visibility,
    name: Ident,
    variants: Vec<KeyVariant>,
}

impl ConfigKeysImpl {
    fn new(raw: &DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &raw.data else {
            let message = "#[derive(ConfigKeys)] can only be placed on enums";
            return Err(syn::Error::new_spanned(&raw.ident, message));
        };
        if raw.generics.type_params().count() != 0
            || raw.generics.const_params().count() != 0
            || raw.generics.lifetimes().count() != 0
        {
            let message = "generics are not supported";
            return Err(syn::Error::new_spanned(&raw.generics, message));
        }

        let attrs = ContainerAttrs::new(&raw.attrs)?;
        let variants = data
            .variants
            .iter()
            .map(|variant| {
                if !matches!(variant.fields, Fields::Unit) {
                    let message = "only unit variants are supported";
                    return Err(syn::Error::new_spanned(&variant.fields, message));
                }
                Ok(KeyVariant {
                    ident: variant.ident.clone(),
                    attrs: VariantAttrs::new(&variant.attrs)?,
                })
            })
            .collect::<syn::Result<_>>()?;

        Ok(Self {
            attrs,
            vis: raw.vis.clone(),
            name: raw.ident.clone(),
            variants,
        })
    }

    fn declaration(&self) -> syn::Result<SchemaDeclaration> {
        let Some(properties_path) = &self.attrs.properties_path else {
            let message = "properties path must be specified, e.g. `#[config(properties_path = \"app.properties\")]`";
            return Err(syn::Error::new_spanned(&self.name, message));
        };

        let mut declaration =
            SchemaDeclaration::new(self.name.to_string(), properties_path.value())
                .emit_key_enum(false)
                .crate_path(self.attrs.crate_path())
                .visibility(self.vis.to_token_stream().to_string());
        if let Some(case) = self.attrs.rename_all {
            declaration = declaration.rename_all(case);
        }
        if let Some(validate) = &self.attrs.validate {
            declaration = declaration.validator(path_to_string(validate, &self.name)?);
        }
        if let Some(provider) = &self.attrs.provider {
            declaration = declaration.provider_name(provider.value());
        }
        if let Some(qualifier) = &self.attrs.qualifier {
            declaration = declaration.qualifier_name(qualifier.value());
        }
        for tag in &self.attrs.pass {
            declaration = declaration.metadata_tag(tag.to_token_stream().to_string());
        }

        for variant in &self.variants {
            let name = variant.ident.to_string();
            if variant.attrs.null {
                declaration = declaration.null_key(&name);
            }
            if let Some(rename) = &variant.attrs.rename {
                declaration = declaration.rename(&name, rename.value());
            }
            if let Some(validate) = &variant.attrs.validate {
                declaration = declaration.key_validator(&name, path_to_string(validate, &self.name)?);
            }
            declaration = declaration.key(name);
        }
        Ok(declaration)
    }

    fn error_span(&self, err: &GenerationError) -> Span {
        err.key()
            .and_then(|key| self.variants.iter().find(|variant| variant.ident == key))
            .map_or_else(|| self.name.span(), |variant| variant.ident.span())
    }

    fn derive_config_keys(&self) -> syn::Result<proc_macro2::TokenStream> {
        let declaration = self.declaration()?;
        propkeys_codegen::generate(declaration)
            .map_err(|err| syn::Error::new(self.error_span(&err), err))
    }
}

fn derive(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    ConfigKeysImpl::new(input)?.derive_config_keys()
}

pub(crate) fn impl_config_keys(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse(input) {
        Ok(input) => input,
        Err(err) => return err.into_compile_error().into(),
    };
    match derive(&input) {
        Ok(derived) => derived.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
