//! Delegation method generation.
//!
//! Every eligible field gets one method, named after the field, that forwards a
//! child action to the child reducer and lifts the resulting effect into the
//! parent's action space.
//!
//! # Example Generated Code
//!
//! For `child: StateOf<ChildReducer>` in the state of `ParentReducer`:
//!
//! ```rust,ignore
//! pub fn child(
//!     &mut self,
//!     action: <ChildReducer as ::parent_reducer::Reducer>::Action,
//! ) -> ::parent_reducer::EffectOf<ParentReducer> {
//!     <ChildReducer as ::parent_reducer::Reducer>::reduce(
//!         &<ChildReducer as ::core::default::Default>::default(),
//!         &mut self.child,
//!         action,
//!     )
//!     .map(<ParentReducer as ::parent_reducer::Reducer>::Action::Child)
//! }
//! ```
//!
//! For `child: Option<...>` the state is reduced through `as_mut()`, so it stays
//! in the field even if the child panics; a `None` field short-circuits to
//! `Effect::none()`.

use crate::types::FieldDescriptor;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::{Ident, Path, Type, Visibility};

/// Shape of a delegation method's body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Body {
    /// The field holds the child state directly.
    Direct,
    /// The field holds `Option` of the child state.
    Optional,
}

/// A delegation method, rendered through [`ToTokens`].
pub struct DelegationMethod<'a> {
    pub vis: &'a Visibility,
    pub name: &'a Ident,
    pub child: &'a Type,
    pub parent: &'a Type,
    pub variant: &'a Ident,
    pub runtime: &'a Path,
    pub body: Body,
}

impl<'a> DelegationMethod<'a> {
    pub fn new(descriptor: &'a FieldDescriptor, parent: &'a Type, runtime: &'a Path) -> Self {
        Self {
            vis: &descriptor.vis,
            name: &descriptor.name,
            child: &descriptor.child,
            parent,
            variant: &descriptor.variant,
            runtime,
            body: if descriptor.optional {
                Body::Optional
            } else {
                Body::Direct
            },
        }
    }

    fn body_tokens(&self) -> TokenStream2 {
        let Self {
            name,
            child,
            parent,
            variant,
            runtime,
            ..
        } = self;
        let child_reducer = quote!(&<#child as ::core::default::Default>::default());
        let lift = quote!(.map(<#parent as #runtime::Reducer>::Action::#variant));

        match self.body {
            Body::Direct => quote! {
                <#child as #runtime::Reducer>::reduce(#child_reducer, &mut self.#name, action)
                    #lift
            },
            Body::Optional => quote! {
                let ::core::option::Option::Some(state) = self.#name.as_mut() else {
                    return #runtime::Effect::none();
                };
                <#child as #runtime::Reducer>::reduce(#child_reducer, state, action)
                    #lift
            },
        }
    }
}

impl ToTokens for DelegationMethod<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let Self {
            vis,
            name,
            child,
            parent,
            runtime,
            ..
        } = self;
        let doc = format!("Reduce a child action against `self.{name}`.");
        let body = self.body_tokens();

        tokens.extend(quote! {
            #[doc = #doc]
            #vis fn #name(
                &mut self,
                action: <#child as #runtime::Reducer>::Action,
            ) -> #runtime::EffectOf<#parent> {
                #body
            }
        });
    }
}
