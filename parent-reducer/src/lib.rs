#![no_std]
#![doc = include_str!("../../README.md")]

pub mod core {
    pub use parent_reducer_core::*;
}

pub use parent_reducer_core::{ActionOf, Effect, EffectOf, Reducer, StateOf, Store};
pub use parent_reducer_macro::{ParentReducerState, parent_reducer};
