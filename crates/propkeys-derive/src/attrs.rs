//! Parsing `#[config(...)]` attributes.

use proc_macro2::Span;
use quote::ToTokens;
use syn::{Attribute, Ident, LitStr, Path, spanned::Spanned};

use propkeys_codegen::KeyCase;

fn config_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("config"))
}

fn set_once<T>(slot: &mut Option<T>, value: T, name: &str, span: Span) -> syn::Result<()> {
    if slot.is_some() {
        let message = format!("`{name}` is specified more than once");
        return Err(syn::Error::new(span, message));
    }
    *slot = Some(value);
    Ok(())
}

/// Renders a path as a string without whitespace, replacing a leading `Self` segment with `self_ty`.
pub(crate) fn path_to_string(path: &Path, self_ty: &Ident) -> syn::Result<String> {
    let mut rendered = String::new();
    if path.leading_colon.is_some() {
        rendered.push_str("::");
    }
    for (i, segment) in path.segments.iter().enumerate() {
        if !segment.arguments.is_none() {
            let message = "generic arguments are not supported in paths";
            return Err(syn::Error::new_spanned(&segment.arguments, message));
        }
        if i > 0 {
            rendered.push_str("::");
        }
        if i == 0 && segment.ident == "Self" {
            rendered.push_str(&self_ty.to_string());
        } else {
            rendered.push_str(&segment.ident.to_string());
        }
    }
    Ok(rendered)
}

/// Container attributes, i.e. ones placed on the enum.
#[derive(Debug, Default)]
pub(crate) struct ContainerAttrs {
    pub(crate) cr: Option<Path>,
    pub(crate) properties_path: Option<LitStr>,
    pub(crate) rename_all: Option<KeyCase>,
    pub(crate) validate: Option<Path>,
    pub(crate) provider: Option<LitStr>,
    pub(crate) qualifier: Option<LitStr>,
    pub(crate) pass: Vec<syn::Meta>,
}

impl ContainerAttrs {
    pub(crate) fn new(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in config_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                let span = meta.path.span();
                if meta.path.is_ident("crate") {
                    set_once(&mut this.cr, meta.value()?.parse()?, "crate", span)
                } else if meta.path.is_ident("properties_path") {
                    let path: LitStr = meta.value()?.parse()?;
                    set_once(&mut this.properties_path, path, "properties_path", span)
                } else if meta.path.is_ident("rename_all") {
                    let case: LitStr = meta.value()?.parse()?;
                    let parsed = case
                        .value()
                        .parse::<KeyCase>()
                        .map_err(|err| syn::Error::new(case.span(), err))?;
                    set_once(&mut this.rename_all, parsed, "rename_all", span)
                } else if meta.path.is_ident("validate") {
                    set_once(&mut this.validate, meta.value()?.parse()?, "validate", span)
                } else if meta.path.is_ident("provider") {
                    set_once(&mut this.provider, meta.value()?.parse()?, "provider", span)
                } else if meta.path.is_ident("qualifier") {
                    set_once(&mut this.qualifier, meta.value()?.parse()?, "qualifier", span)
                } else if meta.path.is_ident("pass") {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    this.pass.push(content.parse()?);
                    Ok(())
                } else {
                    Err(meta.error(
                        "Unsupported attribute; expected one of `crate`, `properties_path`, `rename_all`, \
                         `validate`, `provider`, `qualifier` or `pass`",
                    ))
                }
            })?;
        }
        Ok(this)
    }

    pub(crate) fn crate_path(&self) -> String {
        self.cr
            .as_ref()
            .map_or_else(|| "::propkeys".to_owned(), |cr| cr.to_token_stream().to_string())
    }
}

/// Variant attributes.
#[derive(Debug, Default)]
pub(crate) struct VariantAttrs {
    pub(crate) null: bool,
    pub(crate) rename: Option<LitStr>,
    pub(crate) validate: Option<Path>,
}

impl VariantAttrs {
    pub(crate) fn new(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        let mut null_span = None;
        for attr in config_attrs(attrs) {
            attr.parse_nested_meta(|meta| {
                let span = meta.path.span();
                if meta.path.is_ident("null") {
                    set_once(&mut null_span, span, "null", span)
                } else if meta.path.is_ident("rename") {
                    set_once(&mut this.rename, meta.value()?.parse()?, "rename", span)
                } else if meta.path.is_ident("validate") {
                    set_once(&mut this.validate, meta.value()?.parse()?, "validate", span)
                } else {
                    Err(meta.error(
                        "Unsupported attribute; expected one of `null`, `rename` or `validate`",
                    ))
                }
            })?;
        }

        if let Some(null_span) = null_span {
            if this.rename.is_some() {
                let message = "null key is never looked up, so it cannot be renamed";
                return Err(syn::Error::new(null_span, message));
            }
            this.null = true;
        }
        Ok(this)
    }
}
