//! Procedural macros for the parent reducer crate.
//!
//! This crate provides `#[derive(ParentReducerState)]`, which generates one
//! delegation method per child reducer embedded in a parent state, and the
//! `#[parent_reducer]` module attribute that wires the derive up for every
//! struct next to a reducer.
//!
//! # Architecture
//!
//! The macro implementation is split into several modules:
//!
//! - **types**: Data structures representing the derive input and its fields
//! - **parser**: Reading attributes and scanning fields
//! - **classify**: Deciding which fields hold a child reducer's state
//! - **modifier**: Picking the visibility of generated methods
//! - **codegen**: Generating the delegation methods
//! - **container**: The module-level attribute
//! - **validation**: Validating helper attribute usage
//!
//! # Example
//!
//! ```ignore
//! use parent_reducer::{ActionOf, ParentReducerState, StateOf};
//!
//! #[derive(ParentReducerState)]
//! #[parent_reducer_state(of = AppReducer)]
//! pub struct State {
//!     pub counter: StateOf<CounterReducer>,
//!     pub detail: Option<StateOf<DetailReducer>>,
//! }
//!
//! pub enum Action {
//!     Counter(ActionOf<CounterReducer>),
//!     Detail(ActionOf<DetailReducer>),
//! }
//! ```

use proc_macro::TokenStream;

// Module declarations
mod classify;
mod codegen;
mod container;
mod modifier;
mod parser;
mod types;
mod validation;

/// Generate delegation methods for the child reducers of a parent state.
///
/// For every named field holding the state of a child reducer, the derive
/// generates a method with the field's name that reduces a child action against
/// that field and maps the resulting effect into the parent's action space.
///
/// # Attributes
///
/// ```ignore
/// #[derive(ParentReducerState)]
/// #[parent_reducer_state(
///     of = AppReducer,                   // Required: reducer owning this state
///     crate = ::parent_reducer,          // Optional: path to the runtime crate
/// )]
/// pub struct State {
///     counter: StateOf<CounterReducer>,  // Delegated as `counter()`
///
///     detail: Option<StateOf<DetailReducer>>, // No-op while `None`
///
///     #[parent_reducer_state(
///         init = CounterReducer::State::default(), // Optional: initializer, used
///                                                  // when the type hides the child
///         set = pub(crate),              // Optional: restricts the method
///         action = Tally,                // Optional: parent action variant
///     )]
///     pub tally: Tally,
///
///     #[parent_reducer_state_ignored]    // Never delegated
///     draft: StateOf<CounterReducer>,
/// }
/// ```
///
/// # Recognized Fields
///
/// A field is delegated when its type names the state of a type whose name
/// ends with `Reducer`:
///
/// - `CounterReducer::State`
/// - `<CounterReducer as Reducer>::State`
/// - `StateOf<CounterReducer>`
/// - any of the above wrapped in `Option`
///
/// or, failing that, when its `init` expression constructs such a state.
/// Shared references are never delegated. Fields that do not match are
/// skipped without error.
///
/// # Generated Code
///
/// ```ignore
/// impl State {
///     fn counter(
///         &mut self,
///         action: <CounterReducer as Reducer>::Action,
///     ) -> EffectOf<AppReducer> {
///         // CounterReducer::default().reduce(&mut self.counter, action)
///         //     .map(<AppReducer as Reducer>::Action::Counter)
///     }
/// }
/// ```
///
/// The method takes the visibility of the field, or of `set` when given. The
/// parent action variant is the field name in `UpperCamelCase`.
#[proc_macro_derive(
    ParentReducerState,
    attributes(parent_reducer_state, parent_reducer_state_ignored)
)]
pub fn derive_parent_reducer_state(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    match types::ParentState::from_derive_input(&input).and_then(|state| state.expand()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Attach `#[derive(ParentReducerState)]` to every struct of a reducer module.
///
/// The reducer is the one given with `of = ...`. Otherwise it is the first
/// struct whose name ends with `Reducer` and that the module implements
/// `Reducer` for, falling back to the first struct whose name ends with
/// `Reducer`. A generic reducer found this way is an error; name it with `of`.
///
/// What a struct already carries is kept: a hand-written
/// `#[derive(ParentReducerState)]` is not repeated, and a directive that
/// already has `of` is left as written.
///
/// ```ignore
/// #[parent_reducer]
/// mod app {
///     #[derive(Default)]
///     pub struct AppReducer;
///
///     pub struct State {
///         pub counter: StateOf<CounterReducer>,
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn parent_reducer(args: TokenStream, item: TokenStream) -> TokenStream {
    match container::expand(args.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
