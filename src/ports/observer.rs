//! Observer port - abstraction for watching a teaching session
//!
//! Observers are told when a session starts, when each episode finishes and
//! when the session ends, so progress reporting stays out of the loop itself.

use std::{cell::RefCell, rc::Rc};

use crate::{Result, tictactoe::GameOutcome};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - once
/// 2. `on_game_end(game_num, outcome)` - after each episode
/// 3. `on_training_end()` - once
///
/// All methods default to doing nothing.
pub trait Observer {
    /// Called before the first episode.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after episode `game_num` (0-based) has been learned from.
    fn on_game_end(&mut self, _game_num: usize, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Called after the last episode.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Shared handle, so a caller can keep reading an observer after handing
/// it to a session.
impl<T: Observer> Observer for Rc<RefCell<T>> {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        self.borrow_mut().on_training_start(total_games)
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.borrow_mut().on_game_end(game_num, outcome)
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.borrow_mut().on_training_end()
    }
}
