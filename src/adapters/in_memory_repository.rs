//! In-memory agent repository for testing.

use std::{cell::RefCell, collections::HashMap, path::Path, rc::Rc};

use tracing::debug;

use crate::{
    Result,
    error::Error,
    ports::AgentRepository,
    q_learning::{Agent, SavedAgent},
};

/// Stores encoded snapshots in a shared map keyed by path, avoiding file
/// system I/O entirely. Clones share the same storage.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use ttt_rl::{
///     adapters::InMemoryRepository,
///     ports::AgentRepository,
///     q_learning::{Agent, Hyperparameters},
/// };
///
/// let repo = InMemoryRepository::new();
/// let agent = Agent::sarsa(Hyperparameters::default());
/// repo.save(&agent, Path::new("sarsa"))?;
/// assert_eq!(repo.load(Path::new("sarsa"))?, agent);
/// # Ok::<(), ttt_rl::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    storage: Rc<RefCell<HashMap<String, Vec<u8>>>>,
    saves: Rc<RefCell<usize>>,
}

impl InMemoryRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct paths currently stored.
    pub fn count(&self) -> usize {
        self.storage.borrow().len()
    }

    /// Total number of successful `save` calls, overwrites included.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }

    /// Check if a snapshot exists at the given path.
    pub fn contains(&self, path: &Path) -> bool {
        self.storage.borrow().contains_key(&Self::key(path))
    }

    fn key(path: &Path) -> String {
        path.to_string_lossy().to_string()
    }
}

impl AgentRepository for InMemoryRepository {
    fn save(&self, agent: &Agent, path: &Path) -> Result<()> {
        let bytes = SavedAgent::from_agent(agent).to_bytes()?;
        self.storage.borrow_mut().insert(Self::key(path), bytes);
        *self.saves.borrow_mut() += 1;
        debug!(path = %path.display(), episodes = agent.episodes(), "stored agent in memory");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Agent> {
        let storage = self.storage.borrow();
        let bytes = storage.get(&Self::key(path)).ok_or_else(|| Error::Io {
            operation: format!("load agent from in-memory storage at {path:?}"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "key not found in memory"),
        })?;
        SavedAgent::from_bytes(bytes)?.into_agent()
    }

    fn exists(&self, path: &Path) -> bool {
        self.contains(path)
    }
}
