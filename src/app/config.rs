//! Configuration types for agent creation.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    q_learning::{Agent, Algorithm, Hyperparameters},
    teacher::Teacher,
};

/// Configuration for creating an agent and the teacher it trains against.
///
/// Every field can come from a JSON file; missing fields take the defaults
/// below, and the builder methods override whatever was loaded.
///
/// # Examples
///
/// ```
/// use ttt_rl::app::AgentConfig;
/// use ttt_rl::q_learning::Algorithm;
///
/// let agent = AgentConfig::new(Algorithm::Sarsa)
///     .with_alpha(0.3)
///     .with_epsilon(0.05)
///     .build()?;
/// assert_eq!(agent.params().alpha(), 0.3);
/// # Ok::<(), ttt_rl::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Update rule
    pub algorithm: Algorithm,
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Exploration rate ε
    pub epsilon: f64,
    /// Probability that the teacher follows its rule cascade
    pub teacher_ability: f64,
}

impl AgentConfig {
    /// Create a configuration for `algorithm`.
    ///
    /// Uses default values for other parameters:
    /// - α = 0.5, γ = 0.9, ε = 0.1
    /// - Teacher ability: 0.9
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            alpha: Hyperparameters::DEFAULT_ALPHA,
            gamma: Hyperparameters::DEFAULT_GAMMA,
            epsilon: Hyperparameters::DEFAULT_EPSILON,
            teacher_ability: Teacher::DEFAULT_ABILITY,
        }
    }

    /// Read a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {path:?}"),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_teacher_ability(mut self, ability: f64) -> Self {
        self.teacher_ability = ability;
        self
    }

    /// Validated hyperparameters.
    pub fn hyperparameters(&self) -> Result<Hyperparameters> {
        Hyperparameters::new(self.alpha, self.gamma, self.epsilon)
    }

    /// Validated teacher.
    pub fn teacher(&self) -> Result<Teacher> {
        Teacher::new(self.teacher_ability)
    }

    /// Create a fresh agent with an empty value table.
    pub fn build(&self) -> Result<Agent> {
        Ok(Agent::new(self.algorithm, self.hyperparameters()?))
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(Algorithm::QLearning)
    }
}
