//! Ports (trait boundaries) for external collaborators.
//!
//! The episode loop and teaching session only talk to opponents, observers
//! and snapshot storage through these traits; concrete implementations live
//! in [`crate::teacher`], [`crate::pipeline::observers`], [`crate::adapters`]
//! and [`crate::cli`].

pub mod observer;
pub mod opponent;
pub mod repository;

pub use observer::Observer;
pub use opponent::Opponent;
pub use repository::AgentRepository;
