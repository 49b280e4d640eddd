//! Observers for teaching sessions
//!
//! Observers collect progress without coupling the session loop to any
//! particular output.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::{
    Result,
    pipeline::episode::AGENT_MARK,
    ports::Observer,
    tictactoe::GameOutcome,
};

/// Win/draw/loss tally from the agent's side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    wins: usize,
    draws: usize,
    losses: usize,
}

impl Tally {
    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(winner) if winner == AGENT_MARK => self.wins += 1,
            GameOutcome::Win(_) => self.losses += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

/// Progress bar observer - Shows teaching progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    tally: Tally,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            tally: Tally::default(),
        }
    }

    fn message(&self) -> String {
        format!(
            "{} D:{} L:{}",
            self.tally.wins, self.tally.draws, self.tally.losses
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.tally.record(outcome);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Logs a "games played" line every `every` episodes.
pub struct LoggingObserver {
    every: usize,
    tally: Tally,
}

impl LoggingObserver {
    pub const DEFAULT_EVERY: usize = 1000;

    /// `every` of zero disables the periodic line.
    pub fn new(every: usize) -> Self {
        Self {
            every,
            tally: Tally::default(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EVERY)
    }
}

impl Observer for LoggingObserver {
    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.tally.record(outcome);
        let played = game_num + 1;
        if self.every > 0 && played % self.every == 0 {
            info!(
                games_played = played,
                wins = self.tally.wins,
                draws = self.tally.draws,
                losses = self.tally.losses,
                "games played: {played}"
            );
        }
        Ok(())
    }
}

/// Tracks learning milestones against a strong opponent: the first draw
/// and the most recent loss.
#[derive(Debug, Clone, Default)]
pub struct MilestoneObserver {
    first_draw: Option<usize>,
    last_loss: Option<usize>,
    games: usize,
}

impl MilestoneObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// First episode (0-based) that ended in a draw.
    pub fn first_draw(&self) -> Option<usize> {
        self.first_draw
    }

    /// Last episode (0-based) the agent lost.
    pub fn last_loss(&self) -> Option<usize> {
        self.last_loss
    }

    pub fn games(&self) -> usize {
        self.games
    }

    /// Episodes played since the last loss, or all of them if there was none.
    pub fn games_since_last_loss(&self) -> usize {
        match self.last_loss {
            Some(game) => self.games - game - 1,
            None => self.games,
        }
    }
}

impl Observer for MilestoneObserver {
    fn on_game_end(&mut self, game_num: usize, outcome: GameOutcome) -> Result<()> {
        self.games = game_num + 1;
        match outcome {
            GameOutcome::Draw => {
                if self.first_draw.is_none() {
                    self.first_draw = Some(game_num);
                }
            }
            GameOutcome::Win(winner) if winner != AGENT_MARK => {
                self.last_loss = Some(game_num);
            }
            GameOutcome::Win(_) => {}
        }
        Ok(())
    }
}
