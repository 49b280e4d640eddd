//! Tabular learning agent (Q-learning or SARSA)
//!
//! The agent always plays `O`. It owns its value table exclusively, together
//! with the hyperparameters and the reward bookkeeping used for diagnostics.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{policy::EpsilonGreedy, update, value_table::ValueTable};
use crate::{
    error::{Error, Result},
    types::{Action, StateKey},
};

/// Which update rule the agent learns with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    QLearning,
    Sarsa,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::QLearning => "Q-Learning",
            Algorithm::Sarsa => "SARSA",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Learning rate α, discount γ and exploration rate ε.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    alpha: f64,
    gamma: f64,
    epsilon: f64,
}

impl Hyperparameters {
    pub const DEFAULT_ALPHA: f64 = 0.5;
    pub const DEFAULT_GAMMA: f64 = 0.9;
    pub const DEFAULT_EPSILON: f64 = 0.1;

    /// Create validated hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] unless α ∈ (0, 1],
    /// γ ∈ [0, 1] and ε ∈ [0, 1].
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Result<Self> {
        let params = Self {
            alpha,
            gamma,
            epsilon,
        };
        params.validate()?;
        Ok(params)
    }

    /// Re-check the ranges, e.g. after deserializing.
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(Error::InvalidHyperparameter {
                name: "alpha",
                value: self.alpha,
                range: "(0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(Error::InvalidHyperparameter {
                name: "gamma",
                value: self.gamma,
                range: "[0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::InvalidHyperparameter {
                name: "epsilon",
                value: self.epsilon,
                range: "[0, 1]",
            });
        }
        Ok(())
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            alpha: Self::DEFAULT_ALPHA,
            gamma: Self::DEFAULT_GAMMA,
            epsilon: Self::DEFAULT_EPSILON,
        }
    }
}

/// A learner owning a value table, its hyperparameters, a running total
/// reward and the total recorded after every finished episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    algorithm: Algorithm,
    params: Hyperparameters,
    table: ValueTable,
    total_reward: f64,
    rewards: Vec<f64>,
}

impl Agent {
    /// Create a fresh agent with an all-zero table
    pub fn new(algorithm: Algorithm, params: Hyperparameters) -> Self {
        Self {
            algorithm,
            params,
            table: ValueTable::new(),
            total_reward: 0.0,
            rewards: Vec::new(),
        }
    }

    /// Fresh Q-learning agent
    pub fn q_learning(params: Hyperparameters) -> Self {
        Self::new(Algorithm::QLearning, params)
    }

    /// Fresh SARSA agent
    pub fn sarsa(params: Hyperparameters) -> Self {
        Self::new(Algorithm::Sarsa, params)
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn params(&self) -> &Hyperparameters {
        &self.params
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    /// Current estimate for `(action, state)`
    pub fn value(&self, action: Action, state: &StateKey) -> f64 {
        self.table.value(action, state)
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Running total reward after each finished episode, oldest first
    pub fn rewards(&self) -> &[f64] {
        &self.rewards
    }

    /// Number of finished episodes
    pub fn episodes(&self) -> usize {
        self.rewards.len()
    }

    /// ε-greedy choice among the empty cells of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] if the board is full; drivers only
    /// call this on non-terminal boards.
    pub fn get_action<R: Rng + ?Sized>(&self, state: &StateKey, rng: &mut R) -> Result<Action> {
        EpsilonGreedy::new(self.params.epsilon()).select_action(
            &self.table,
            state,
            &state.legal_actions(),
            rng,
        )
    }

    /// Q-learning update; `next_state` is `None` after the final move.
    pub fn q_update(
        &mut self,
        state: &StateKey,
        next_state: Option<&StateKey>,
        action: Action,
        reward: f64,
    ) {
        update::q_learning(
            &mut self.table,
            &self.params,
            state,
            next_state,
            action,
            reward,
        );
    }

    /// SARSA update; `next` is `None` after the final move.
    pub fn sarsa_update(
        &mut self,
        state: &StateKey,
        next: Option<(&StateKey, Action)>,
        action: Action,
        reward: f64,
    ) {
        update::sarsa(&mut self.table, &self.params, state, next, action, reward);
    }

    /// Add an episode's terminal reward to the running total and append the
    /// new total to the history.
    pub fn record_episode(&mut self, reward: f64) {
        self.total_reward += reward;
        self.rewards.push(self.total_reward);
    }
}
