//! Epsilon-greedy action selection

use rand::{Rng, seq::IndexedRandom};

use super::value_table::ValueTable;
use crate::{
    error::{Error, Result},
    types::{Action, StateKey},
};

/// ε-greedy selector over a [`ValueTable`].
///
/// Randomness comes from the caller so tests can pass a seeded generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// With probability ε return a uniformly random legal action, otherwise
    /// the legal action with the strictly highest value (first in
    /// `legal_actions` order on ties).
    ///
    /// Draws exactly one uniform sample per call before deciding, plus one
    /// more when exploring.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if `legal_actions` is empty.
    pub fn select_action<R: Rng + ?Sized>(
        &self,
        table: &ValueTable,
        state: &StateKey,
        legal_actions: &[Action],
        rng: &mut R,
    ) -> Result<Action> {
        if legal_actions.is_empty() {
            return Err(Error::NoValidMoves);
        }

        if rng.random::<f64>() < self.epsilon {
            legal_actions.choose(rng).copied().ok_or(Error::NoValidMoves)
        } else {
            table
                .best_action(state, legal_actions)
                .ok_or(Error::NoValidMoves)
        }
    }
}
