//! Application layer: configuration and dependency wiring.
//!
//! ```text
//! CLI commands
//!     │ use
//!     ▼
//! App (owns Box<dyn AgentRepository>, default seed)
//!     │ builds
//!     ▼
//! Agent, Teacher (from AgentConfig)
//! ```

pub mod config;
pub mod container;

pub use config::AgentConfig;
pub use container::{App, AppBuilder};
