#![no_std]

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::vec::{self, Vec};

/// A state machine that reduces actions into state mutations.
///
/// Child reducers embedded in a parent state are driven through delegation
/// methods generated by `#[derive(ParentReducerState)]`. Those methods build the
/// child with [`Default`], so child reducers are expected to be cheap,
/// stateless values.
pub trait Reducer {
    type State;
    type Action;

    /// Apply `action` to `state`, returning the effect it produced.
    fn reduce(&self, state: &mut Self::State, action: Self::Action) -> Effect<Self::Action>;
}

/// State type of a reducer.
pub type StateOf<R> = <R as Reducer>::State;

/// Action type of a reducer.
pub type ActionOf<R> = <R as Reducer>::Action;

/// Effect type returned by a reducer.
pub type EffectOf<R> = Effect<<R as Reducer>::Action>;

/// Follow-up work produced by a reduction.
///
/// An effect carries the actions that must be fed back into the reducer once
/// the current reduction is done. Effects of a child reducer are lifted into
/// the parent's action space with [`Effect::map`].
#[must_use = "effects carry actions that are lost unless sent back to a store"]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Effect<Action> {
    actions: Vec<Action>,
}

impl<Action> Effect<Action> {
    /// The empty effect.
    pub const fn none() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    /// An effect that feeds a single action back.
    pub fn send(action: Action) -> Self {
        let mut actions = Vec::with_capacity(1);
        actions.push(action);
        Self { actions }
    }

    /// Concatenate two effects, keeping `self`'s actions first.
    pub fn merge(mut self, other: Self) -> Self {
        self.actions.extend(other.actions);
        self
    }

    /// Transform every action of this effect.
    pub fn map<B, F>(self, f: F) -> Effect<B>
    where
        F: FnMut(Action) -> B,
    {
        Effect {
            actions: self.actions.into_iter().map(f).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}

impl<Action> Default for Effect<Action> {
    fn default() -> Self {
        Self::none()
    }
}

impl<Action> FromIterator<Action> for Effect<Action> {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl<Action> IntoIterator for Effect<Action> {
    type Item = Action;
    type IntoIter = vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.into_iter()
    }
}

/// Owns a reducer and its state and runs actions to completion.
///
/// Every action returned through an effect is queued and reduced in FIFO
/// order before [`Store::send`] returns.
pub struct Store<R>
where
    R: Reducer,
{
    reducer: R,
    state: R::State,
}

impl<R> Store<R>
where
    R: Reducer,
{
    pub fn new(reducer: R, state: R::State) -> Self {
        Self { reducer, state }
    }

    pub fn reducer(&self) -> &R {
        &self.reducer
    }

    pub fn state(&self) -> &R::State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut R::State {
        &mut self.state
    }

    pub fn into_state(self) -> R::State {
        self.state
    }

    /// Reduce `action` and every action fed back by the resulting effects.
    ///
    /// Returns the number of actions reduced, `action` included. A reducer that
    /// keeps answering with non-empty effects never lets this return.
    pub fn send(&mut self, action: R::Action) -> usize {
        let mut queue = VecDeque::new();
        queue.push_back(action);

        let mut reduced = 0;
        while let Some(action) = queue.pop_front() {
            let effect = self.reducer.reduce(&mut self.state, action);
            reduced += 1;
            tracing::trace!(
                step = reduced,
                follow_ups = effect.actions.len(),
                pending = queue.len(),
                "reduced action"
            );
            queue.extend(effect);
        }

        tracing::debug!(reduced, "store settled");
        reduced
    }
}

impl<R> Default for Store<R>
where
    R: Reducer + Default,
    R::State: Default,
{
    fn default() -> Self {
        Self::new(R::default(), R::State::default())
    }
}
