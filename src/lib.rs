//! Tabular reinforcement learning for tic-tac-toe
//!
//! This crate provides:
//! - A tic-tac-toe board with win/draw detection
//! - Q-learning and SARSA agents with an epsilon-greedy policy
//! - A rule-based teacher that approximates optimal play
//! - Online-learning episodes, teaching sessions and snapshot persistence
//! - A CLI for teaching, interactive play and reward reports

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod teacher;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use q_learning::{Agent, Algorithm, Hyperparameters};
pub use teacher::Teacher;
pub use tictactoe::{Board, GameOutcome, Player};
pub use types::{Action, StateKey};
