//! Rule-based training opponent
//!
//! The teacher approximates optimal play with a fixed cascade of tactical
//! checks (see [`rules::CASCADE`]). It is not a minimax solver and can miss
//! double threats outside the hard-coded fork patterns. With probability
//! `1 - ability_level` it ignores the cascade and plays a random empty cell.

pub mod rules;

use rand::Rng;
use tracing::trace;

use crate::{
    error::{Error, Result},
    tictactoe::{Board, Player},
    types::Action,
};

pub use rules::{CASCADE, Rule};

/// Stateless aside from its ability level; never learns, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Teacher {
    ability_level: f64,
    mark: Player,
}

impl Teacher {
    pub const DEFAULT_ABILITY: f64 = 0.9;

    /// Create a teacher playing `X`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHyperparameter`] unless `ability_level` is in
    /// [0, 1].
    pub fn new(ability_level: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&ability_level) {
            return Err(Error::InvalidHyperparameter {
                name: "ability_level",
                value: ability_level,
                range: "[0, 1]",
            });
        }
        Ok(Self {
            ability_level,
            mark: Player::X,
        })
    }

    /// A teacher that always follows the cascade.
    pub fn perfect() -> Self {
        Self {
            ability_level: 1.0,
            mark: Player::X,
        }
    }

    /// Play as `mark` instead of `X`.
    pub fn with_mark(mut self, mark: Player) -> Self {
        self.mark = mark;
        self
    }

    pub fn ability_level(&self) -> f64 {
        self.ability_level
    }

    pub fn mark(&self) -> Player {
        self.mark
    }

    /// Pick a cell for the teacher's next move.
    ///
    /// One uniform draw decides between the cascade and a random move, so
    /// ability 1.0 always follows the cascade and ability 0.0 never does.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidMoves`] on a full board.
    pub fn make_move<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Result<Action> {
        if board.legal_actions().is_empty() {
            return Err(Error::NoValidMoves);
        }

        if rng.random::<f64>() >= self.ability_level {
            trace!("teacher plays a random move");
            return rules::random_move(board, rng).ok_or(Error::NoValidMoves);
        }

        for rule in CASCADE {
            if let Some(action) = rule.apply(board, self.mark, rng) {
                trace!(?rule, %action, "teacher rule fired");
                return Ok(action);
            }
        }

        Err(Error::NoValidMoves)
    }

    /// The rule that would fire on `board`, ignoring the imperfect-play roll.
    pub fn rule_for<R: Rng + ?Sized>(&self, board: &Board, rng: &mut R) -> Option<(Rule, Action)> {
        CASCADE
            .into_iter()
            .find_map(|rule| rule.apply(board, self.mark, rng).map(|a| (rule, a)))
    }
}

impl Default for Teacher {
    fn default() -> Self {
        Self {
            ability_level: Self::DEFAULT_ABILITY,
            mark: Player::X,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_ability_range() {
        assert!(Teacher::new(0.0).is_ok());
        assert!(Teacher::new(1.0).is_ok());
        assert!(Teacher::new(1.5).is_err());
        assert!(Teacher::new(-0.1).is_err());
        assert_eq!(Teacher::default().ability_level(), 0.9);
    }

    #[test]
    fn test_perfect_teacher_takes_center() {
        let mut rng = StdRng::seed_from_u64(0);
        let action = Teacher::perfect().make_move(&Board::new(), &mut rng).unwrap();
        assert_eq!(action, Action::CENTER);
    }

    #[test]
    fn test_perfect_teacher_completes_diagonal() {
        // X - O
        // O X -
        // - - -
        let board = Board::from_rows("X-O/OX-/---").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let action = Teacher::perfect().make_move(&board, &mut rng).unwrap();
        assert_eq!(action, Action::at(2, 2));
    }

    #[test]
    fn test_win_beats_block() {
        // X X -
        // O O -
        // - - -
        let board = Board::from_rows("XX-/OO-/---").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Teacher::perfect().rule_for(&board, &mut rng),
            Some((Rule::Win, Action::at(0, 2)))
        );
    }

    #[test]
    fn test_with_mark_swaps_perspective() {
        // O O -
        // X X -
        // - - -
        let board = Board::from_rows("OO-/XX-/---").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let teacher = Teacher::perfect().with_mark(Player::O);
        assert_eq!(teacher.make_move(&board, &mut rng).unwrap(), Action::at(0, 2));
    }

    #[test]
    fn test_zero_ability_still_plays_legal_moves() {
        let board = Board::from_rows("XO-/-X-/O--").unwrap();
        let teacher = Teacher::new(0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let action = teacher.make_move(&board, &mut rng).unwrap();
            assert!(board.is_empty(action));
        }
    }

    #[test]
    fn test_full_board_is_error() {
        let board = Board::from_rows("XOX/XOO/OXX").unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            Teacher::perfect().make_move(&board, &mut rng),
            Err(Error::NoValidMoves)
        ));
    }
}
