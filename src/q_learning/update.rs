//! Temporal-difference update rules
//!
//! Both rules touch exactly one entry, `(a, s)`, and share the terminal case:
//! with no successor state the target is the reward alone.
//!
//! | Rule | Non-terminal target |
//! |------|---------------------|
//! | Q-learning | r + γ · max over all 9 actions of Q(a', s') |
//! | SARSA | r + γ · Q(a', s') for the action actually chosen |
//!
//! The Q-learning max ranges over the entire action set, including cells
//! already occupied at `s'` (those read as 0.0). That can bias the target
//! upward when every legal continuation is negative; it is kept as is.

use super::{agent::Hyperparameters, value_table::ValueTable};
use crate::types::{Action, StateKey};

/// `(1 - α)·Q + α·target`
fn blend(current: f64, alpha: f64, target: f64) -> f64 {
    (1.0 - alpha) * current + alpha * target
}

/// Q-learning (off-policy) update of `(action, state)`.
///
/// `next_state` is `None` after the game-ending move.
pub fn q_learning(
    table: &mut ValueTable,
    params: &Hyperparameters,
    state: &StateKey,
    next_state: Option<&StateKey>,
    action: Action,
    reward: f64,
) {
    let target = match next_state {
        Some(next) => reward + params.gamma() * table.max_value(next),
        None => reward,
    };
    let updated = blend(table.value(action, state), params.alpha(), target);
    table.set(action, state.clone(), updated);
}

/// SARSA (on-policy) update of `(action, state)`.
///
/// `next` pairs the successor state with the action already chosen there;
/// `None` after the game-ending move.
pub fn sarsa(
    table: &mut ValueTable,
    params: &Hyperparameters,
    state: &StateKey,
    next: Option<(&StateKey, Action)>,
    action: Action,
    reward: f64,
) {
    let target = match next {
        Some((next_state, next_action)) => {
            reward + params.gamma() * table.value(next_action, next_state)
        }
        None => reward,
    };
    let updated = blend(table.value(action, state), params.alpha(), target);
    table.set(action, state.clone(), updated);
}
