//! Module-level expansion of `#[parent_reducer]`.
//!
//! The attribute marks a module holding a reducer and its types. Every struct
//! in the module, other than the reducer itself, receives
//! `#[derive(ParentReducerState)]` and a directive naming the reducer, so the
//! derive knows whose `Action` wraps the child actions. Whatever the struct
//! already carries is kept, so a hand-written derive or `crate = ...` is never
//! duplicated.

use crate::parser::parse_directive;
use crate::types::*;
use proc_macro2::TokenStream as TokenStream2;
use quote::ToTokens;
use syn::{
    Attribute, Ident, Item, ItemMod, ItemStruct, Path, Result, Token, Type, parse_quote,
    punctuated::Punctuated,
};

/// Expand `#[parent_reducer(args)]` applied to `item`.
pub fn expand(args: TokenStream2, item: TokenStream2) -> Result<TokenStream2> {
    let args = ContainerArgs::parse_args(args)?;
    let mut module = match syn::parse2::<Item>(item)? {
        Item::Mod(module) => module,
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "`#[parent_reducer]` can only be applied to an inline module",
            ));
        }
    };

    attach_directives(&args, &mut module)?;
    Ok(module.into_token_stream())
}

/// Attach the derive and its directive to the structs of `module`.
///
/// A module without a body, or without a reducer to name, is left untouched.
/// A struct that already derives `ParentReducerState` keeps its derive, and a
/// directive that already names the reducer is kept as written.
///
/// # Errors
///
/// Fails when the reducer is found by name and is generic: its parameters
/// cannot be spelled from the other structs, so it must be given with `of`.
pub fn attach_directives(args: &ContainerArgs, module: &mut ItemMod) -> Result<()> {
    let Some((_, items)) = module.content.as_mut() else {
        return Ok(());
    };
    let reducer = match &args.of {
        Some(of) => of.clone(),
        None => match find_reducer(items)? {
            Some(reducer) => reducer,
            None => return Ok(()),
        },
    };
    let runtime = runtime_path(args.krate.as_ref());

    for item in items.iter_mut() {
        let Item::Struct(item) = item else {
            continue;
        };
        if names(&reducer, &item.ident) {
            continue;
        }
        let existing = parse_directive(&item.attrs);

        if !has_derive(item) {
            // Derive helpers must not appear before the derive introducing them.
            let at = item
                .attrs
                .iter()
                .position(|attr| attr.path().is_ident(DIRECTIVE))
                .unwrap_or(item.attrs.len());
            item.attrs
                .insert(at, parse_quote!(#[derive(#runtime::ParentReducerState)]));
        }
        // A malformed directive is reported by the derive itself.
        let Ok(existing) = existing else {
            continue;
        };
        if existing.of.is_none() {
            let krate = args.krate.as_ref().filter(|_| existing.krate.is_none());
            item.attrs.push(directive(&reducer, krate));
        }
    }
    Ok(())
}

/// The parent reducer of a module.
///
/// Among the structs whose name ends with `Reducer`, the first one the module
/// implements `Reducer` for is preferred; otherwise the first one declared.
fn find_reducer(items: &[Item]) -> Result<Option<Type>> {
    let candidates: Vec<&ItemStruct> = items
        .iter()
        .filter_map(|item| match item {
            Item::Struct(item) if item.ident.to_string().ends_with(REDUCER_SUFFIX) => Some(item),
            _ => None,
        })
        .collect();

    let chosen = candidates
        .iter()
        .find(|candidate| implements_reducer(items, &candidate.ident))
        .or(candidates.first());
    let Some(reducer) = chosen else {
        return Ok(None);
    };

    if !reducer.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &reducer.generics,
            "generic reducers must be named with `#[parent_reducer(of = ...)]`",
        ));
    }
    let ident = &reducer.ident;
    Ok(Some(parse_quote!(#ident)))
}

/// Whether `items` holds `impl Reducer for #ident`.
fn implements_reducer(items: &[Item], ident: &Ident) -> bool {
    items.iter().any(|item| {
        let Item::Impl(item) = item else {
            return false;
        };
        let Some((_, trait_path, _)) = &item.trait_ else {
            return false;
        };
        let is_reducer_trait = trait_path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == REDUCER_TRAIT);
        is_reducer_trait && matches!(&*item.self_ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident(ident))
    })
}

fn directive(reducer: &Type, krate: Option<&Path>) -> Attribute {
    match krate {
        Some(krate) => parse_quote!(#[parent_reducer_state(of = #reducer, crate = #krate)]),
        None => parse_quote!(#[parent_reducer_state(of = #reducer)]),
    }
}

/// Whether `reducer` is the struct `ident` itself, generic arguments aside.
fn names(reducer: &Type, ident: &Ident) -> bool {
    let Type::Path(path) = reducer else {
        return false;
    };
    path.qself.is_none()
        && path.path.leading_colon.is_none()
        && path.path.segments.len() == 1
        && path.path.segments[0].ident == *ident
}

/// Whether the struct already derives `ParentReducerState`, by any path.
fn has_derive(item: &ItemStruct) -> bool {
    item.attrs
        .iter()
        .filter(|attr| attr.path().is_ident("derive"))
        .any(|attr| {
            attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
                .is_ok_and(|paths| {
                    paths
                        .iter()
                        .any(|path| path.segments.last().is_some_and(|segment| segment.ident == DERIVE))
                })
        })
}
