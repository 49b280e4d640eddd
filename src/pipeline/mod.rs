//! Episode loop and teaching sessions
//!
//! This module provides:
//! - One online-learning game between the agent and an opponent
//! - Teaching sessions of many episodes with checkpointing
//! - Observers reporting session progress

pub mod episode;
pub mod observers;
pub mod training;

pub use episode::{AGENT_MARK, EpisodeReport, FirstMover, OPPONENT_MARK, play_episode};
pub use observers::{LoggingObserver, MilestoneObserver, ProgressObserver};
pub use training::{TeachingConfig, TeachingSession, TrainingResult};

pub use crate::ports::Observer;
