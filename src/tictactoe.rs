//! Tic-Tac-Toe board and winning-line analysis

pub mod board;
pub mod lines;

pub use board::{Board, Cell, GameOutcome, GameStatus, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
