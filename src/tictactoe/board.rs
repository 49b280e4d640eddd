//! Board representation and terminal-condition checks

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::types::{Action, CELL_COUNT, StateKey};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '-' => Some(Cell::Empty),
            'X' => Some(Cell::X),
            'O' => Some(Cell::O),
            _ => None,
        }
    }
}

/// A side in the game. The learning agent always plays `O`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// Result of checking the board right after a side has moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    Draw,
    Win,
}

/// Final result of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

impl GameOutcome {
    /// +1 if `player` won, -1 if the other side won, 0 for a draw.
    pub fn reward_for(self, player: Player) -> f64 {
        match self {
            GameOutcome::Win(winner) if winner == player => 1.0,
            GameOutcome::Win(_) => -1.0,
            GameOutcome::Draw => 0.0,
        }
    }
}

/// The 3x3 grid, mutated in place by each move.
///
/// Turn alternation is the driver's job; the board only guards against
/// writing outside the grid or over an existing mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Build a board from a state key.
    pub fn from_key(key: &StateKey) -> Self {
        let mut board = Board::new();
        for action in Action::ALL {
            board.cells[action.index()] = key.cell(action);
        }
        board
    }

    /// Build a board from rows written as `"X-O/OX-/---"`.
    ///
    /// Whitespace and `/` separators are ignored.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`StateKey::parse`].
    pub fn from_rows(rows: &str) -> Result<Self, crate::Error> {
        let flat: String = rows
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        Ok(Board::from_key(&StateKey::parse(&flat)?))
    }

    /// Get the cell addressed by an action
    pub fn get(&self, action: Action) -> Cell {
        self.cells[action.index()]
    }

    /// Check if a cell is empty
    pub fn is_empty(&self, action: Action) -> bool {
        self.get(action) == Cell::Empty
    }

    /// Cells as a flat row-major array (read-only view for renderers)
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Place `player`'s mark on an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CellOccupied`] if the cell already holds a
    /// mark; the board is left unchanged.
    pub fn place(&mut self, action: Action, player: Player) -> Result<(), crate::Error> {
        if !self.is_empty(action) {
            return Err(crate::Error::CellOccupied {
                row: action.row(),
                col: action.col(),
            });
        }
        self.cells[action.index()] = player.to_cell();
        Ok(())
    }

    /// Place a mark from raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] for coordinates outside the grid
    /// and [`crate::Error::CellOccupied`] for a taken cell.
    pub fn place_at(&mut self, row: usize, col: usize, player: Player) -> Result<(), crate::Error> {
        self.place(Action::new(row, col)?, player)
    }

    /// Actions whose cell is empty, in row-major order
    pub fn legal_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.is_empty(action))
            .collect()
    }

    /// True iff `player` holds a full row, column or diagonal
    pub fn check_win(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, player)
    }

    /// True iff no empty cell remains
    pub fn check_draw(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Evaluate the board after `player` has just moved.
    ///
    /// Win is tested before draw, so a move that fills the last cell and
    /// completes a line is a win for the mover.
    pub fn check_for_end(&self, player: Player) -> GameStatus {
        if self.check_win(player) {
            GameStatus::Win
        } else if self.check_draw() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }

    /// Canonical lookup key: cells flattened row-major
    pub fn state_key(&self) -> StateKey {
        StateKey::from_cells(&self.cells)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    0   1   2")?;
        writeln!(f)?;
        for row in 0..3 {
            write!(f, "{row}  ")?;
            for col in 0..3 {
                write!(f, " {}  ", self.cells[row * 3 + col].to_char())?;
            }
            writeln!(f)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
