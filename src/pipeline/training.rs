//! Teaching session: the agent plays N episodes against an opponent

use std::path::Path;

use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::episode::{AGENT_MARK, FirstMover, play_episode};
use crate::{
    Error, Result,
    ports::{AgentRepository, Observer, Opponent},
    q_learning::Agent,
    tictactoe::GameOutcome,
};

/// Teaching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeachingConfig {
    /// Number of episodes to play
    pub episodes: usize,

    /// Random seed
    pub seed: Option<u64>,

    /// Save an intermediate snapshot every this many episodes
    pub checkpoint_every: Option<usize>,
}

impl TeachingConfig {
    /// Reject a zero checkpoint interval.
    pub fn validate(&self) -> Result<()> {
        if self.checkpoint_every == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "checkpoint_every must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TeachingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            seed: None,
            checkpoint_every: None,
        }
    }
}

/// Result of a teaching session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    /// Number of agent wins
    pub wins: usize,

    /// Number of draws
    pub draws: usize,

    /// Number of agent losses
    pub losses: usize,

    /// Win rate
    pub win_rate: f64,

    /// Draw rate
    pub draw_rate: f64,

    /// Loss rate
    pub loss_rate: f64,

    /// Agent's cumulative reward after the session, history included
    pub total_reward: f64,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(
        total_games: usize,
        wins: usize,
        draws: usize,
        losses: usize,
        total_reward: f64,
    ) -> Self {
        let rate = |count: usize| {
            if total_games > 0 {
                count as f64 / total_games as f64
            } else {
                0.0
            }
        };

        Self {
            total_games,
            wins,
            draws,
            losses,
            win_rate: rate(wins),
            draw_rate: rate(draws),
            loss_rate: rate(losses),
            total_reward,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Runs a fixed number of episodes against one opponent and persists the
/// agent when done.
pub struct TeachingSession {
    config: TeachingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TeachingSession {
    /// Create a new teaching session
    pub fn new(config: TeachingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TeachingConfig {
        &self.config
    }

    fn is_checkpoint(&self, played: usize) -> bool {
        self.config
            .checkpoint_every
            .is_some_and(|every| played % every == 0 && played < self.config.episodes)
    }

    /// Run with an rng seeded from the configuration (or the OS when no
    /// seed is set).
    pub fn run(
        &mut self,
        agent: &mut Agent,
        opponent: &mut dyn Opponent,
        repository: &dyn AgentRepository,
        path: &Path,
    ) -> Result<TrainingResult> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.run_with_rng(agent, opponent, repository, path, &mut rng)
    }

    /// Play every episode, then save the agent to `path`.
    ///
    /// Who moves first is a fair coin flip per episode. With
    /// `checkpoint_every` set, the agent is also saved after every
    /// multiple of that many episodes.
    pub fn run_with_rng(
        &mut self,
        agent: &mut Agent,
        opponent: &mut dyn Opponent,
        repository: &dyn AgentRepository,
        path: &Path,
        rng: &mut dyn RngCore,
    ) -> Result<TrainingResult> {
        self.config.validate()?;
        let episodes = self.config.episodes;
        info!(
            episodes,
            algorithm = %agent.algorithm(),
            opponent = opponent.name(),
            prior_episodes = agent.episodes(),
            "teaching session started"
        );

        for observer in &mut self.observers {
            observer.on_training_start(episodes)?;
        }

        let (mut wins, mut draws, mut losses) = (0, 0, 0);
        for game_num in 0..episodes {
            let first_mover = FirstMover::random(rng);
            let report = play_episode(agent, opponent, first_mover, rng)?;

            match report.outcome {
                GameOutcome::Win(winner) if winner == AGENT_MARK => wins += 1,
                GameOutcome::Win(_) => losses += 1,
                GameOutcome::Draw => draws += 1,
            }

            for observer in &mut self.observers {
                observer.on_game_end(game_num, report.outcome)?;
            }

            let played = game_num + 1;
            if self.is_checkpoint(played) {
                repository.save(agent, path)?;
                info!(played, path = %path.display(), "checkpoint saved");
            }
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        repository.save(agent, path)?;

        let result = TrainingResult::new(episodes, wins, draws, losses, agent.total_reward());
        info!(
            wins,
            draws,
            losses,
            total_reward = result.total_reward,
            path = %path.display(),
            "teaching session finished"
        );
        Ok(result)
    }
}
