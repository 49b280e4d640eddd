//! Winning line analysis for Tic-Tac-Toe

use super::{Cell, Player};
use crate::types::{Action, CELL_COUNT};

/// The 8 winning lines, in the order the teacher scans them for
/// two-in-a-row: both diagonals first, then column `i` before row `i`.
pub const WINNING_LINES: [[Action; 3]; 8] = [
    [Action::at(0, 0), Action::at(1, 1), Action::at(2, 2)],
    [Action::at(0, 2), Action::at(1, 1), Action::at(2, 0)],
    [Action::at(0, 0), Action::at(1, 0), Action::at(2, 0)], // column 0
    [Action::at(0, 0), Action::at(0, 1), Action::at(0, 2)], // row 0
    [Action::at(0, 1), Action::at(1, 1), Action::at(2, 1)], // column 1
    [Action::at(1, 0), Action::at(1, 1), Action::at(1, 2)], // row 1
    [Action::at(0, 2), Action::at(1, 2), Action::at(2, 2)], // column 2
    [Action::at(2, 0), Action::at(2, 1), Action::at(2, 2)], // row 2
];

/// Utility for analyzing winning lines in Tic-Tac-Toe
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player fully occupies any row, column or diagonal
    pub fn has_won(cells: &[Cell; CELL_COUNT], player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|a| cells[a.index()] == target))
    }

    /// First cell that completes three in a row for `player`, scanning
    /// [`WINNING_LINES`] in order.
    pub fn completing_move(cells: &[Cell; CELL_COUNT], player: Player) -> Option<Action> {
        WINNING_LINES
            .iter()
            .find_map(|line| Self::completing_move_in_line(cells, player, line))
    }

    /// The empty cell of a line holding exactly two of `player`'s marks
    fn completing_move_in_line(
        cells: &[Cell; CELL_COUNT],
        player: Player,
        line: &[Action; 3],
    ) -> Option<Action> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty = None;

        for &action in line {
            match cells[action.index()] {
                Cell::Empty => {
                    if empty.is_some() {
                        return None;
                    }
                    empty = Some(action);
                }
                c if c == target => count += 1,
                _ => return None,
            }
        }

        if count == 2 { empty } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells_with(marks: &[(usize, Cell)]) -> [Cell; CELL_COUNT] {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for &(idx, cell) in marks {
            cells[idx] = cell;
        }
        cells
    }

    #[test]
    fn test_every_line_wins() {
        for line in WINNING_LINES {
            let cells = cells_with(&line.map(|a| (a.index(), Cell::O)));
            assert!(LineAnalyzer::has_won(&cells, Player::O));
            assert!(!LineAnalyzer::has_won(&cells, Player::X));
        }
    }

    #[test]
    fn test_lines_cover_rows_columns_diagonals_once() {
        let mut seen: Vec<[usize; 3]> = WINNING_LINES
            .iter()
            .map(|line| {
                let mut idx = line.map(|a| a.index());
                idx.sort_unstable();
                idx
            })
            .collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_completing_move_prefers_diagonal() {
        // X X .
        // . X .
        // . . .
        let cells = cells_with(&[(0, Cell::X), (1, Cell::X), (4, Cell::X)]);
        assert_eq!(
            LineAnalyzer::completing_move(&cells, Player::X),
            Some(Action::at(2, 2))
        );
    }

    #[test]
    fn test_completing_move_column_before_row() {
        // X X .
        // X . .
        // . . .
        let cells = cells_with(&[(0, Cell::X), (1, Cell::X), (3, Cell::X)]);
        assert_eq!(
            LineAnalyzer::completing_move(&cells, Player::X),
            Some(Action::at(2, 0))
        );
    }

    #[test]
    fn test_blocked_line_is_not_completable() {
        let cells = cells_with(&[(0, Cell::X), (1, Cell::X), (2, Cell::O)]);
        assert_eq!(LineAnalyzer::completing_move(&cells, Player::X), None);
    }
}
