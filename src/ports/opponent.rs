//! Opponent port - whoever plays `X` against the learning agent.

use rand::RngCore;

use crate::{Result, teacher::Teacher, tictactoe::Board, types::Action};

/// A non-learning side that picks a cell for `X` on each turn.
///
/// Implemented by the rule-based [`Teacher`] for training and by the CLI's
/// human player for interactive games.
///
/// # Examples
///
/// ```
/// use rand::RngCore;
/// use ttt_rl::{ports::Opponent, tictactoe::Board, types::Action};
///
/// struct FirstEmpty;
///
/// impl Opponent for FirstEmpty {
///     fn choose_move(&mut self, board: &Board, _rng: &mut dyn RngCore) -> ttt_rl::Result<Action> {
///         board
///             .legal_actions()
///             .first()
///             .copied()
///             .ok_or(ttt_rl::Error::NoValidMoves)
///     }
///
///     fn name(&self) -> &str {
///         "first-empty"
///     }
/// }
/// ```
pub trait Opponent {
    /// Pick an empty cell on a non-terminal board.
    ///
    /// # Errors
    ///
    /// Returns an error if no move can be produced (full board, closed
    /// input stream).
    fn choose_move(&mut self, board: &Board, rng: &mut dyn RngCore) -> Result<Action>;

    /// Name used in logs and summaries.
    fn name(&self) -> &str;
}

impl Opponent for Teacher {
    fn choose_move(&mut self, board: &Board, rng: &mut dyn RngCore) -> Result<Action> {
        self.make_move(board, rng)
    }

    fn name(&self) -> &str {
        "teacher"
    }
}
