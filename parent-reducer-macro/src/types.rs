//! Type definitions for the parent reducer macros.
//!
//! This module contains the data structures used while expanding
//! `#[derive(ParentReducerState)]` and `#[parent_reducer]`:
//! - ParentState: the struct being derived and its directive
//! - FieldDecl: one named field, with everything the classifier looks at
//! - FieldDescriptor: a field that was accepted for delegation
//! - ContainerArgs: arguments of the module-level attribute

use syn::{Expr, Generics, Ident, Path, Type, Visibility, parse_quote};

/// Name of the derive helper attribute carrying the directive and field options.
pub const DIRECTIVE: &str = "parent_reducer_state";

/// Name of the marker attribute that opts a field out of delegation.
pub const IGNORE_MARKER: &str = "parent_reducer_state_ignored";

/// Suffix a type name must carry to be treated as a reducer.
pub const REDUCER_SUFFIX: &str = "Reducer";

/// Name of the derive, as written in `#[derive(...)]`.
pub const DERIVE: &str = "ParentReducerState";

/// Name of the runtime trait a reducer implements.
pub const REDUCER_TRAIT: &str = "Reducer";

/// Name of the nested state type of a reducer.
pub const STATE_MEMBER: &str = "State";

/// Name of the runtime alias `StateOf<R>`.
pub const STATE_ALIAS: &str = "StateOf";

/// Arguments of `#[parent_reducer_state(...)]` on the derived struct.
#[derive(Default)]
pub struct StateDirective {
    /// The reducer owning this state, whose `Action` wraps child actions.
    pub of: Option<Type>,
    /// Path to the runtime crate used in generated code.
    pub krate: Option<Path>,
}

/// The derived struct, ready for the field-level pass.
pub struct ParentState<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub directive: StateDirective,
    pub data: &'a syn::Data,
}

/// One named field of the derived struct.
pub struct FieldDecl {
    pub name: Ident,
    pub ty: Type,
    /// Expression the field starts from, given with `init = ...`.
    pub init: Option<Expr>,
    /// Attribute names, in source order.
    pub decorations: Vec<String>,
    /// Visibility modifiers, in source order.
    pub modifiers: Vec<Modifier>,
    pub binding: Binding,
    /// Parent action variant override, given with `action = ...`.
    pub action: Option<Ident>,
}

/// A visibility modifier attached to a field.
#[derive(Clone)]
pub enum Modifier {
    /// The field's own visibility, e.g. `pub(crate) child: ...`.
    Plain(Visibility),
    /// A write restriction given with `set = ...`.
    Setter(Visibility),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    Mutable,
    Immutable,
}

/// A child reducer resolved from a field.
#[derive(Debug)]
pub struct ChildReducer {
    pub ty: Type,
    pub optional: bool,
}

/// A field accepted for delegation.
pub struct FieldDescriptor {
    pub name: Ident,
    pub child: Type,
    pub optional: bool,
    pub vis: Visibility,
    pub variant: Ident,
}

/// Arguments of `#[parent_reducer(...)]` on a module.
#[derive(Default)]
pub struct ContainerArgs {
    pub of: Option<Type>,
    pub krate: Option<Path>,
}

/// Runtime crate path, `::parent_reducer` unless overridden.
pub fn runtime_path(krate: Option<&Path>) -> Path {
    match krate {
        Some(path) => path.clone(),
        None => parse_quote!(::parent_reducer),
    }
}
