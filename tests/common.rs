//! Shared helpers for the integration tests.

#![allow(dead_code)]

use rand::{SeedableRng, rngs::StdRng};
use ttt_rl::{
    Action, Board, Error, Result, StateKey,
    q_learning::{Agent, Algorithm, Hyperparameters},
};

/// α = 0.5, γ = 0.9, ε = 0: deterministic greedy play.
pub fn greedy_params() -> Hyperparameters {
    Hyperparameters::new(0.5, 0.9, 0.0).unwrap()
}

pub fn greedy_agent(algorithm: Algorithm) -> Agent {
    Agent::new(algorithm, greedy_params())
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn key(s: &str) -> StateKey {
    StateKey::parse(s).unwrap()
}

pub fn board(rows: &str) -> Board {
    Board::from_rows(rows).unwrap()
}

pub fn action(row: usize, col: usize) -> Action {
    Action::new(row, col).unwrap()
}

/// Every one of the 3^9 fillings of the grid, legal game position or not.
pub fn all_keys() -> impl Iterator<Item = StateKey> {
    (0..3usize.pow(9)).map(|mut n| {
        let mut s = String::with_capacity(9);
        for _ in 0..9 {
            s.push(['-', 'X', 'O'][n % 3]);
            n /= 3;
        }
        StateKey::parse(&s).unwrap()
    })
}

/// Opponent playing a fixed list of cells.
pub struct Scripted {
    moves: Vec<Action>,
}

impl Scripted {
    pub fn new(cells: &[(usize, usize)]) -> Self {
        Self {
            moves: cells.iter().rev().map(|&(r, c)| action(r, c)).collect(),
        }
    }
}

impl ttt_rl::ports::Opponent for Scripted {
    fn choose_move(&mut self, _board: &Board, _rng: &mut dyn rand::RngCore) -> Result<Action> {
        self.moves.pop().ok_or(Error::NoValidMoves)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
