//! Dependency container for the application.
//!
//! The container owns the snapshot repository and the default seed, and
//! hands out agents, rngs and persistence to the CLI commands.

use std::path::Path;

use rand::{SeedableRng, rngs::StdRng};

use super::config::AgentConfig;
use crate::{Result, adapters::MsgPackRepository, ports::AgentRepository, q_learning::Agent};

/// Application with injected persistence.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use ttt_rl::app::{AgentConfig, App};
///
/// let app = App::new();
/// let agent = app.create_agent(&AgentConfig::default())?;
/// assert_eq!(agent.episodes(), 0);
/// # Ok::<(), ttt_rl::Error>(())
/// ```
///
/// ## Testing with an in-memory repository
///
/// ```
/// use ttt_rl::app::App;
/// use ttt_rl::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for agent snapshots
    repository: Box<dyn AgentRepository>,
    /// Default random seed (None = seeded from the OS)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses:
    /// - `MsgPackRepository` for snapshots
    /// - No default seed
    pub fn new() -> Self {
        Self {
            repository: Box::new(MsgPackRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing an app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    pub fn repository(&self) -> &dyn AgentRepository {
        self.repository.as_ref()
    }

    /// Random source seeded with `seed`, the app default, or the OS, in
    /// that order.
    pub fn rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.default_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Create a fresh agent from `config`.
    pub fn create_agent(&self, config: &AgentConfig) -> Result<Agent> {
        config.build()
    }

    /// Load an agent from persistent storage.
    ///
    /// ```no_run
    /// use ttt_rl::app::App;
    /// use std::path::Path;
    ///
    /// let app = App::new();
    /// let agent = app.load_agent(Path::new("q_agent.msgpack"))?;
    /// # Ok::<(), ttt_rl::Error>(())
    /// ```
    pub fn load_agent(&self, path: &Path) -> Result<Agent> {
        self.repository.load(path)
    }

    /// Save an agent to persistent storage.
    pub fn save_agent(&self, agent: &Agent, path: &Path) -> Result<()> {
        self.repository.save(agent, path)
    }

    /// Whether a snapshot is already stored at `path`.
    pub fn snapshot_exists(&self, path: &Path) -> bool {
        self.repository.exists(path)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing an app with custom dependencies.
pub struct AppBuilder {
    repository: Option<Box<dyn AgentRepository>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            repository: None,
            default_seed: None,
        }
    }

    /// Set a custom snapshot repository.
    pub fn with_repository<R: AgentRepository + 'static>(mut self, repo: R) -> Self {
        self.repository = Some(Box::new(repo));
        self
    }

    /// Seed used whenever a caller does not supply one.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no repository was specified, uses `MsgPackRepository` by default.
    pub fn build(self) -> App {
        App {
            repository: self
                .repository
                .unwrap_or_else(|| Box::new(MsgPackRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
