//! Parsing logic for the parent reducer macros.
//!
//! This module turns `syn` syntax trees into our internal data structures:
//! - The struct-level directive `#[parent_reducer_state(of = ..., crate = ...)]`
//! - The declaration scanner walking named fields in source order
//! - Field declarations with their helper options (`init`, `set`, `action`)
//! - The module-level arguments of `#[parent_reducer(...)]`

use crate::types::*;
use proc_macro2::TokenStream as TokenStream2;
use syn::{
    Attribute, Data, DeriveInput, Expr, Field, Fields, Ident, Path, Result, Type, Visibility,
    meta::ParseNestedMeta, parse::Parser,
};

impl<'a> ParentState<'a> {
    /// Read the derive input and its struct-level directive.
    pub fn from_derive_input(input: &'a DeriveInput) -> Result<Self> {
        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            directive: parse_directive(&input.attrs)?,
            data: &input.data,
        })
    }
}

/// Parse every `#[parent_reducer_state(...)]` attached to the struct.
///
/// Options may be split across several attributes, but each key may only be
/// given once.
pub fn parse_directive(attrs: &[Attribute]) -> Result<StateDirective> {
    let mut directive = StateDirective::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident(DIRECTIVE)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("of") {
                let ty: Type = meta.value()?.parse()?;
                set_once(&mut directive.of, ty, &meta, "of")
            } else if meta.path.is_ident("crate") {
                let path: Path = meta.value()?.parse()?;
                set_once(&mut directive.krate, path, &meta, "crate")
            } else {
                Err(meta.error(
                    "unsupported `parent_reducer_state` option on a struct, expected `of` or `crate`",
                ))
            }
        })?;
    }

    Ok(directive)
}

/// Declaration scanner: the named fields of a struct, in source order.
///
/// Enums, unions, tuple structs and unit structs have nothing to delegate and
/// yield an empty sequence.
pub fn named_fields(data: &Data) -> impl Iterator<Item = &Field> {
    let fields = match data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Some(named.named.iter()),
            Fields::Unnamed(_) | Fields::Unit => None,
        },
        Data::Enum(_) | Data::Union(_) => None,
    };
    fields.into_iter().flatten()
}

impl FieldDecl {
    /// Collect what the classifier needs to know about a named field.
    pub fn from_field(field: &Field) -> Result<Self> {
        let name = field.ident.clone().ok_or_else(|| {
            syn::Error::new_spanned(field, "delegation requires a named field")
        })?;

        let mut init = None;
        let mut action = None;
        let mut modifiers = Vec::new();

        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident(DIRECTIVE)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("init") {
                    let expr: Expr = meta.value()?.parse()?;
                    set_once(&mut init, expr, &meta, "init")
                } else if meta.path.is_ident("set") {
                    let vis: Visibility = meta.value()?.parse()?;
                    if modifiers.iter().any(|m| matches!(m, Modifier::Setter(_))) {
                        return Err(meta.error("duplicate `set` option"));
                    }
                    modifiers.push(Modifier::Setter(vis));
                    Ok(())
                } else if meta.path.is_ident("action") {
                    let variant: Ident = meta.value()?.parse()?;
                    set_once(&mut action, variant, &meta, "action")
                } else {
                    Err(meta.error(
                        "unsupported `parent_reducer_state` option on a field, expected `init`, `set` or `action`",
                    ))
                }
            })?;
        }

        // Attributes come before the visibility keyword in source.
        if !matches!(field.vis, Visibility::Inherited) {
            modifiers.push(Modifier::Plain(field.vis.clone()));
        }

        let binding = match &field.ty {
            Type::Reference(reference) if reference.mutability.is_none() => Binding::Immutable,
            _ => Binding::Mutable,
        };

        Ok(Self {
            name,
            ty: field.ty.clone(),
            init,
            decorations: field.attrs.iter().map(decoration_name).collect(),
            modifiers,
            binding,
            action,
        })
    }
}

/// Textual name of an attribute, `a::b` for a path.
pub fn decoration_name(attr: &Attribute) -> String {
    attr.path()
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::")
}

impl ContainerArgs {
    /// Parse the arguments of `#[parent_reducer(...)]`. Empty input is valid.
    pub fn parse_args(tokens: TokenStream2) -> Result<Self> {
        let mut args = Self::default();
        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("of") {
                let ty: Type = meta.value()?.parse()?;
                set_once(&mut args.of, ty, &meta, "of")
            } else if meta.path.is_ident("crate") {
                let path: Path = meta.value()?.parse()?;
                set_once(&mut args.krate, path, &meta, "crate")
            } else {
                Err(meta.error("unsupported `parent_reducer` option, expected `of` or `crate`"))
            }
        });
        parser.parse2(tokens)?;
        Ok(args)
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, meta: &ParseNestedMeta<'_>, key: &str) -> Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate `{key}` option")));
    }
    *slot = Some(value);
    Ok(())
}
