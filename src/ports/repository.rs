//! Repository port for agent snapshots.

use std::path::Path;

use crate::{Result, q_learning::Agent};

/// Port for persisting and loading agents.
///
/// Implementations write whole snapshots; a reader never observes a
/// partially written agent.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use ttt_rl::{
///     adapters::MsgPackRepository,
///     ports::AgentRepository,
///     q_learning::{Agent, Hyperparameters},
/// };
///
/// let repo = MsgPackRepository::new();
/// let agent = Agent::q_learning(Hyperparameters::default());
/// repo.save(&agent, Path::new("q_agent.msgpack"))?;
/// let restored = repo.load(Path::new("q_agent.msgpack"))?;
/// assert_eq!(restored, agent);
/// # Ok::<(), ttt_rl::Error>(())
/// ```
pub trait AgentRepository {
    /// Save a snapshot of `agent` at `path`, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    fn save(&self, agent: &Agent, path: &Path) -> Result<()>;

    /// Load the agent stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored there or the snapshot is
    /// corrupted or of an unsupported version.
    fn load(&self, path: &Path) -> Result<Agent>;

    /// Whether a snapshot exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}
