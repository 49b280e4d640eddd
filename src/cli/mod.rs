//! Command-line interface: teaching, interactive play and reward reports.

pub mod commands;
pub mod human;
pub mod output;
pub mod prompt;

pub use human::HumanPlayer;
