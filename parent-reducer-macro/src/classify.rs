//! Field classification.
//!
//! Decides whether a field embeds the state of a child reducer, and which
//! reducer. There is no type information at expansion time, so the decision
//! rests on a naming convention: the child is a type whose name ends in
//! `Reducer`, and the field holds its nested `State`.
//!
//! Resolution is a chain of independent matchers; each one either recognizes
//! the field or returns `None`, and the first match wins:
//!
//! 1. the declared type names the state (`Owner::State`, `<Owner as Reducer>::State`,
//!    `StateOf<Owner>`)
//! 2. the declared type is an `Option` of such a state
//! 3. the `init` expression constructs such a state (`Owner::State::new()`)

use crate::codegen::utils::variant_ident;
use crate::modifier::resolve_visibility;
use crate::types::*;
use syn::{
    Expr, GenericArgument, Path, PathArguments, PathSegment, QSelf, Type, TypePath,
    punctuated::Punctuated,
};

type Matcher = fn(&FieldDecl) -> Option<ChildReducer>;

const MATCHERS: [Matcher; 3] = [
    reducer_from_type,
    reducer_from_optional_type,
    reducer_from_initializer,
];

/// Classify a field, returning a descriptor when it can be delegated.
pub fn classify(field: &FieldDecl) -> Option<FieldDescriptor> {
    if is_ignored(field) || field.binding == Binding::Immutable {
        return None;
    }

    let child = resolve_child(field)?;
    Some(FieldDescriptor {
        name: field.name.clone(),
        child: child.ty,
        optional: child.optional,
        vis: resolve_visibility(&field.modifiers),
        variant: field
            .action
            .clone()
            .unwrap_or_else(|| variant_ident(&field.name)),
    })
}

/// Run the matcher chain.
pub fn resolve_child(field: &FieldDecl) -> Option<ChildReducer> {
    MATCHERS.iter().find_map(|matcher| matcher(field))
}

pub fn is_ignored(field: &FieldDecl) -> bool {
    field.decorations.iter().any(|name| name == IGNORE_MARKER)
}

fn reducer_from_type(field: &FieldDecl) -> Option<ChildReducer> {
    let ty = state_owner(&field.ty)?;
    Some(ChildReducer {
        ty,
        optional: false,
    })
}

fn reducer_from_optional_type(field: &FieldDecl) -> Option<ChildReducer> {
    let wrapped = option_inner(&field.ty)?;
    let ty = state_owner(wrapped)?;
    Some(ChildReducer { ty, optional: true })
}

fn reducer_from_initializer(field: &FieldDecl) -> Option<ChildReducer> {
    let Expr::Call(call) = ungroup_expr(field.init.as_ref()?) else {
        return None;
    };
    let Expr::Path(callee) = ungroup_expr(&call.func) else {
        return None;
    };
    let ty = constructed_state_owner(callee.qself.as_ref(), &callee.path)?;
    Some(ChildReducer {
        ty,
        optional: false,
    })
}

/// The reducer owning a state type, if `ty` spells one.
fn state_owner(ty: &Type) -> Option<Type> {
    let Type::Path(TypePath { qself, path }) = ungroup_type(ty) else {
        return None;
    };
    let owner = match qself {
        Some(qself) => qualified_state_owner(qself, path)?,
        None => path_state_owner(&path.segments, path.leading_colon.is_some())?,
    };
    is_reducer(&owner).then_some(owner)
}

/// `<Owner as Trait>::State` or `<Owner>::State`.
fn qualified_state_owner(qself: &QSelf, path: &Path) -> Option<Type> {
    let last = path.segments.last()?;
    if path.segments.len() != qself.position + 1 || !is_state_segment(last) {
        return None;
    }
    Some((*qself.ty).clone())
}

/// `Owner::State` or `StateOf<Owner>`.
fn path_state_owner(
    segments: &Punctuated<PathSegment, syn::Token![::]>,
    leading_colon: bool,
) -> Option<Type> {
    let last = segments.last()?;
    if last.ident == STATE_ALIAS {
        return single_type_argument(&last.arguments).cloned();
    }
    if segments.len() < 2 || !is_state_segment(last) {
        return None;
    }
    Some(owner_type(segments.iter().take(segments.len() - 1), leading_colon))
}

/// The reducer whose state a constructor path builds.
///
/// Accepts the state path itself (`Owner::State(..)`) or a constructor one
/// segment below it (`Owner::State::new(..)`).
fn constructed_state_owner(qself: Option<&QSelf>, path: &Path) -> Option<Type> {
    let segments = &path.segments;
    let owner = match qself {
        Some(qself) => {
            let state = segments.iter().nth(qself.position)?;
            let trailing = segments.len() - qself.position - 1;
            if !is_state_segment(state) || trailing > 1 {
                return None;
            }
            (*qself.ty).clone()
        }
        None => {
            let len = segments.len();
            let state_index = (len.saturating_sub(2)..len)
                .rev()
                .find(|&i| is_state_segment(&segments[i]) || segments[i].ident == STATE_ALIAS)?;
            let state = &segments[state_index];
            if state.ident == STATE_ALIAS {
                single_type_argument(&state.arguments)?.clone()
            } else if state_index == 0 {
                return None;
            } else {
                owner_type(
                    segments.iter().take(state_index),
                    path.leading_colon.is_some(),
                )
            }
        }
    };
    is_reducer(&owner).then_some(owner)
}

/// `T` of `Option<T>`, `std::option::Option<T>` and friends.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { qself: None, path }) = ungroup_type(ty) else {
        return None;
    };
    let last = path.segments.last()?;
    if last.ident != "Option" {
        return None;
    }
    single_type_argument(&last.arguments)
}

fn single_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(arguments) = arguments else {
        return None;
    };
    if arguments.args.len() != 1 {
        return None;
    }
    match arguments.args.first()? {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

fn is_state_segment(segment: &PathSegment) -> bool {
    segment.ident == STATE_MEMBER && segment.arguments.is_none()
}

/// Whether the last name of `ty` carries the reducer suffix.
fn is_reducer(ty: &Type) -> bool {
    let Type::Path(TypePath { path, .. }) = ungroup_type(ty) else {
        return false;
    };
    path.segments
        .last()
        .is_some_and(|segment| segment.ident.to_string().ends_with(REDUCER_SUFFIX))
}

fn owner_type<'a>(segments: impl Iterator<Item = &'a PathSegment>, leading_colon: bool) -> Type {
    let path = Path {
        leading_colon: leading_colon.then(Default::default),
        segments: segments.cloned().collect(),
    };
    Type::Path(TypePath { qself: None, path })
}

fn ungroup_type(mut ty: &Type) -> &Type {
    loop {
        match ty {
            Type::Group(group) => ty = &group.elem,
            Type::Paren(paren) => ty = &paren.elem,
            _ => return ty,
        }
    }
}

fn ungroup_expr(mut expr: &Expr) -> &Expr {
    loop {
        match expr {
            Expr::Group(group) => expr = &group.expr,
            Expr::Paren(paren) => expr = &paren.expr,
            _ => return expr,
        }
    }
}
