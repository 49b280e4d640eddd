//! Versioned snapshot format for agents.

use serde::{Deserialize, Serialize};

use super::agent::Agent;
use crate::error::{Error, Result};

/// Whole-object snapshot of one [`Agent`]: algorithm, hyperparameters,
/// value table and reward history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    agent: Agent,
}

impl SavedAgent {
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            version: Self::VERSION,
            agent: agent.clone(),
        }
    }

    /// Unwrap the agent after checking the format version and ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSnapshotVersion`] for other versions and
    /// [`Error::InvalidHyperparameter`] if the stored parameters are out of
    /// range.
    pub fn into_agent(self) -> Result<Agent> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        self.agent.params().validate()?;
        Ok(self.agent)
    }

    /// Encode as MessagePack.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).map_err(|e| Error::SerializationContext {
            operation: "serialize agent to MessagePack".to_string(),
            message: e.to_string(),
        })
    }

    /// Decode from MessagePack.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).map_err(|e| Error::SerializationContext {
            operation: "deserialize agent from MessagePack".to_string(),
            message: e.to_string(),
        })
    }
}
