//! Tabular state-action value function

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{Action, CELL_COUNT, StateKey};

/// Two-level mapping from action to state key to value estimate.
///
/// The outer level is indexed by [`Action::index`]; the inner maps only hold
/// states that have actually been written, so memory stays bounded by the
/// states visited. Reads of missing entries return 0.0 without inserting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: [HashMap<StateKey, f64>; CELL_COUNT],
}

impl ValueTable {
    /// Value returned for any (action, state) pair never written.
    pub const DEFAULT_VALUE: f64 = 0.0;

    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Current estimate for `(action, state)`, 0.0 if unseen
    pub fn value(&self, action: Action, state: &StateKey) -> f64 {
        self.values[action.index()]
            .get(state)
            .copied()
            .unwrap_or(Self::DEFAULT_VALUE)
    }

    /// Overwrite the estimate for `(action, state)`
    pub fn set(&mut self, action: Action, state: StateKey, value: f64) {
        self.values[action.index()].insert(state, value);
    }

    /// Maximum estimate at `state` over the whole fixed action set,
    /// including actions whose cell is occupied (those read as 0.0 unless
    /// written).
    pub fn max_value(&self, state: &StateKey) -> f64 {
        Action::ALL
            .iter()
            .map(|&action| self.value(action, state))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Legal action with the strictly highest value.
    ///
    /// Ties go to the first action in `legal_actions`, which callers pass in
    /// row-major order. Returns `None` only for an empty slice.
    pub fn best_action(&self, state: &StateKey, legal_actions: &[Action]) -> Option<Action> {
        let mut best: Option<(Action, f64)> = None;
        for &action in legal_actions {
            let value = self.value(action, state);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Total number of stored estimates
    pub fn len(&self) -> usize {
        self.values.iter().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every stored `(action, state, value)` entry
    pub fn entries(&self) -> impl Iterator<Item = (Action, &StateKey, f64)> + '_ {
        Action::ALL.into_iter().flat_map(move |action| {
            self.values[action.index()]
                .iter()
                .map(move |(state, &value)| (action, state, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> StateKey {
        StateKey::parse(s).unwrap()
    }

    #[test]
    fn test_unseen_defaults_to_zero_without_inserting() {
        let table = ValueTable::new();
        assert_eq!(table.value(Action::CENTER, &StateKey::empty()), 0.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_get() {
        let mut table = ValueTable::new();
        let state = key("X--------");
        table.set(Action::CENTER, state.clone(), 1.5);
        assert_eq!(table.value(Action::CENTER, &state), 1.5);
        assert_eq!(table.value(Action::at(0, 1), &state), 0.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_max_value_includes_defaults() {
        let mut table = ValueTable::new();
        let state = key("X--------");
        table.set(Action::at(0, 1), state.clone(), -0.5);
        table.set(Action::at(0, 2), state.clone(), -0.2);
        // Unwritten actions still read 0.0 and dominate the negatives.
        assert_eq!(table.max_value(&state), 0.0);

        table.set(Action::at(2, 2), state.clone(), 0.7);
        assert_eq!(table.max_value(&state), 0.7);
    }

    #[test]
    fn test_best_action_breaks_ties_by_order() {
        let table = ValueTable::new();
        let state = StateKey::empty();
        assert_eq!(
            table.best_action(&state, &Action::ALL),
            Some(Action::at(0, 0))
        );
        assert_eq!(table.best_action(&state, &[]), None);
    }

    #[test]
    fn test_best_action_picks_strict_maximum() {
        let mut table = ValueTable::new();
        let state = StateKey::empty();
        table.set(Action::at(1, 2), state.clone(), 0.3);
        table.set(Action::at(2, 0), state.clone(), 0.3);
        assert_eq!(
            table.best_action(&state, &Action::ALL),
            Some(Action::at(1, 2))
        );
    }

    #[test]
    fn test_entries_lists_everything() {
        let mut table = ValueTable::new();
        table.set(Action::at(0, 0), StateKey::empty(), 1.0);
        table.set(Action::at(2, 2), key("O--------"), -1.0);
        let mut entries: Vec<_> = table
            .entries()
            .map(|(a, s, v)| (a, s.as_str().to_string(), v))
            .collect();
        entries.sort_by_key(|(a, _, _)| a.index());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], (Action::at(2, 2), "O--------".to_string(), -1.0));
    }
}
