//! MessagePack implementation of the agent repository.
//!
//! Snapshots are encoded with rmp_serde and written through a sibling
//! temporary file that is renamed over the target, so an interrupted save
//! never leaves a truncated snapshot behind.

use std::{
    ffi::OsString,
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    Result,
    error::Error,
    ports::AgentRepository,
    q_learning::{Agent, SavedAgent},
};

/// MessagePack-based agent repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    /// Create a new MessagePack repository.
    pub fn new() -> Self {
        Self
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("agent"));
        name.push(".tmp");
        path.with_file_name(name)
    }

    /// Run `write` against `<path>.tmp`, then rename it over `path`.
    ///
    /// The temporary file is removed if writing, flushing or renaming fails.
    fn write_atomically<F>(path: &Path, write: F) -> Result<()>
    where
        F: FnOnce(&mut BufWriter<File>) -> Result<()>,
    {
        let temp = Self::temp_path(path);
        let file = File::create(&temp).map_err(|source| Error::Io {
            operation: format!("create file {temp:?}"),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        let written = write(&mut writer).and_then(|()| {
            writer.flush().map_err(|source| Error::Io {
                operation: format!("flush {temp:?}"),
                source,
            })
        });
        drop(writer);

        let outcome = written.and_then(|()| {
            fs::rename(&temp, path).map_err(|source| Error::Io {
                operation: format!("move {temp:?} to {path:?}"),
                source,
            })
        });
        if outcome.is_err()
            && let Err(e) = fs::remove_file(&temp)
        {
            debug!(path = %temp.display(), error = %e, "could not remove temporary snapshot");
        }
        outcome
    }
}

impl AgentRepository for MsgPackRepository {
    fn save(&self, agent: &Agent, path: &Path) -> Result<()> {
        Self::write_atomically(path, |writer| {
            rmp_serde::encode::write(writer, &SavedAgent::from_agent(agent)).map_err(|e| {
                Error::SerializationContext {
                    operation: "serialize agent to MessagePack".to_string(),
                    message: e.to_string(),
                }
            })
        })?;

        debug!(
            path = %path.display(),
            algorithm = %agent.algorithm(),
            entries = agent.table().len(),
            episodes = agent.episodes(),
            "saved agent snapshot"
        );
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Agent> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedAgent = rmp_serde::decode::from_read(BufReader::new(file)).map_err(
            |e| Error::SerializationContext {
                operation: "deserialize agent from MessagePack".to_string(),
                message: e.to_string(),
            },
        )?;
        let agent = saved.into_agent()?;

        debug!(
            path = %path.display(),
            algorithm = %agent.algorithm(),
            episodes = agent.episodes(),
            "loaded agent snapshot"
        );
        Ok(agent)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::{
        q_learning::Hyperparameters,
        types::{Action, StateKey},
    };

    #[test]
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("q_agent.msgpack");

        let mut agent = Agent::q_learning(Hyperparameters::default());
        agent.q_update(&StateKey::empty(), None, Action::CENTER, 1.0);
        agent.record_episode(1.0);

        let repo = MsgPackRepository::new();
        repo.save(&agent, &file_path).expect("Failed to save");
        assert!(repo.exists(&file_path));
        assert!(!MsgPackRepository::temp_path(&file_path).exists());

        let loaded = repo.load(&file_path).expect("Failed to load");
        assert_eq!(loaded, agent);
    }

    #[test]
    fn test_save_overwrites_existing_snapshot() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("sarsa_agent.msgpack");
        let repo = MsgPackRepository::new();

        let mut agent = Agent::sarsa(Hyperparameters::default());
        repo.save(&agent, &file_path).unwrap();
        agent.record_episode(-1.0);
        repo.save(&agent, &file_path).unwrap();

        assert_eq!(repo.load(&file_path).unwrap().rewards(), &[-1.0]);
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let repo = MsgPackRepository::new();
        let result = repo.load(Path::new("/tmp/nonexistent_ttt_rl_12345.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_corrupted_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("broken.msgpack");
        fs::write(&file_path, b"not a snapshot").unwrap();
        let result = MsgPackRepository::new().load(&file_path);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let repo = MsgPackRepository::new();
        let agent = Agent::q_learning(Hyperparameters::default());
        let result = repo.save(&agent, Path::new("/invalid_dir_12345/file.msgpack"));
        assert!(result.is_err());
    }

    #[test]
    fn test_failed_write_removes_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("q_agent.msgpack");
        let repo = MsgPackRepository::new();
        let agent = Agent::q_learning(Hyperparameters::default());
        repo.save(&agent, &file_path).unwrap();

        let result = MsgPackRepository::write_atomically(&file_path, |writer| {
            writer.write_all(b"partial")?;
            Err(Error::SerializationContext {
                operation: "serialize agent to MessagePack".to_string(),
                message: "interrupted".to_string(),
            })
        });

        assert!(matches!(result, Err(Error::SerializationContext { .. })));
        assert!(!MsgPackRepository::temp_path(&file_path).exists());
        assert_eq!(repo.load(&file_path).unwrap(), agent);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }
}
