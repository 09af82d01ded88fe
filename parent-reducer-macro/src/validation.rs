//! Validation logic for parent reducer definitions.
//!
//! Classification never fails: a field that does not follow the naming
//! convention is skipped. What is checked here is the helper attribute syntax
//! the user wrote on purpose:
//! - `of` must name a type by path
//! - The ignore marker takes no arguments
//! - Field options need a named field to attach the method to

use crate::types::*;
use syn::{Attribute, Data, Fields, Meta, Result, Type};

/// Accumulate `error` so every problem is reported in one expansion.
pub fn push_error(errors: &mut Option<syn::Error>, error: syn::Error) {
    match errors {
        Some(existing) => existing.combine(error),
        None => *errors = Some(error),
    }
}

impl ParentState<'_> {
    /// Validate the directive and the helper attributes on fields.
    ///
    /// # Errors
    ///
    /// Returns a `syn::Error` combining every problem found, each one spanned
    /// at the offending tokens.
    pub fn validate(&self) -> Result<()> {
        let mut errors = None;

        if let Some(of) = &self.directive.of {
            if !is_plain_path(of) {
                push_error(
                    &mut errors,
                    syn::Error::new_spanned(
                        of,
                        "`of` expects the parent reducer type, e.g. `of = AppReducer`",
                    ),
                );
            }
        }

        let Data::Struct(data) = self.data else {
            return finish(errors);
        };

        for field in &data.fields {
            for attr in &field.attrs {
                if let Err(err) = check_ignore_marker(attr) {
                    push_error(&mut errors, err);
                }
            }

            if matches!(data.fields, Fields::Unnamed(_)) {
                for attr in field.attrs.iter().filter(|attr| is_helper(attr)) {
                    push_error(
                        &mut errors,
                        syn::Error::new_spanned(
                            attr,
                            "parent reducer options require a named field",
                        ),
                    );
                }
            }
        }

        finish(errors)
    }
}

fn finish(errors: Option<syn::Error>) -> Result<()> {
    match errors {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn check_ignore_marker(attr: &Attribute) -> Result<()> {
    if !attr.path().is_ident(IGNORE_MARKER) {
        return Ok(());
    }
    match &attr.meta {
        Meta::Path(_) => Ok(()),
        other => Err(syn::Error::new_spanned(
            other,
            "`#[parent_reducer_state_ignored]` takes no arguments",
        )),
    }
}

fn is_helper(attr: &Attribute) -> bool {
    attr.path().is_ident(DIRECTIVE) || attr.path().is_ident(IGNORE_MARKER)
}

fn is_plain_path(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path.qself.is_none(),
        Type::Group(group) => is_plain_path(&group.elem),
        Type::Paren(paren) => is_plain_path(&paren.elem),
        _ => false,
    }
}
