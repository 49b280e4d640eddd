//! CLI subcommands and the argument groups they share.

pub mod play;
pub mod rewards;
pub mod teach;

use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};

use crate::{
    app::{AgentConfig, App},
    cli::prompt::ask_yes_no,
    q_learning::{Agent, Algorithm},
};

/// Learning algorithm, as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentKind {
    /// Q-learning
    Q,
    /// SARSA
    S,
}

impl AgentKind {
    pub fn algorithm(self) -> Algorithm {
        match self {
            AgentKind::Q => Algorithm::QLearning,
            AgentKind::S => Algorithm::Sarsa,
        }
    }

    /// Snapshot file used when `--path` is not given.
    pub fn default_path(self) -> PathBuf {
        match self {
            AgentKind::Q => PathBuf::from("q_agent.msgpack"),
            AgentKind::S => PathBuf::from("sarsa_agent.msgpack"),
        }
    }
}

/// Which agent to use and where its snapshot lives.
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Learning algorithm: 'q' for Q-learning, 's' for SARSA
    #[arg(value_enum)]
    pub agent: AgentKind,

    /// Snapshot file (default: q_agent.msgpack or sarsa_agent.msgpack)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,
}

impl SnapshotArgs {
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| self.agent.default_path())
    }
}

/// Options for obtaining an agent: load it, or create it fresh.
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Load the saved agent and continue from it
    #[arg(long, short = 'l')]
    pub load: bool,

    /// Overwrite an existing snapshot without asking
    #[arg(long, short = 'f')]
    pub force: bool,

    /// JSON file with algorithm, alpha, gamma, epsilon and teacher_ability
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Learning rate (0, 1]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor [0, 1]
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Exploration rate [0, 1]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AgentArgs {
    /// Config file values, then the positional algorithm, then flags.
    pub fn agent_config(&self) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::from_json_file(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?,
            None => AgentConfig::default(),
        };
        config = config.with_algorithm(self.snapshot.agent.algorithm());
        if let Some(alpha) = self.alpha {
            config = config.with_alpha(alpha);
        }
        if let Some(gamma) = self.gamma {
            config = config.with_gamma(gamma);
        }
        if let Some(epsilon) = self.epsilon {
            config = config.with_epsilon(epsilon);
        }
        Ok(config)
    }
}

/// Load the saved agent or create a fresh one.
///
/// Starting fresh over an existing snapshot asks for confirmation unless
/// `--force` is set; `Ok(None)` means the user declined.
pub(crate) fn prepare_agent<R: BufRead, W: Write>(
    args: &AgentArgs,
    config: &AgentConfig,
    app: &App,
    input: &mut R,
    output: &mut W,
) -> Result<Option<Agent>> {
    let path = args.snapshot.resolved_path();

    if args.load {
        return load_agent(app, &path, args.snapshot.agent).map(Some);
    }

    if app.snapshot_exists(&path) && !args.force {
        writeln!(output, "An agent is already saved at {}.", path.display())?;
        let overwrite = ask_yes_no(input, output, "Are you sure you want to overwrite?")?;
        if overwrite != Some(true) {
            writeln!(output, "OK. Quitting.")?;
            return Ok(None);
        }
    }

    let agent = app.create_agent(config)?;
    Ok(Some(agent))
}

/// Load a snapshot and check it holds the expected kind of agent.
pub(crate) fn load_agent(app: &App, path: &Path, kind: AgentKind) -> Result<Agent> {
    if !app.snapshot_exists(path) {
        bail!("Cannot load agent: file {} does not exist", path.display());
    }
    let agent = app
        .load_agent(path)
        .with_context(|| format!("Failed to load agent from {}", path.display()))?;
    if agent.algorithm() != kind.algorithm() {
        bail!(
            "{} holds a {} agent, not {}",
            path.display(),
            agent.algorithm(),
            kind.algorithm()
        );
    }
    Ok(agent)
}
