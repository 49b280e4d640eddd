//! Q-learning and SARSA temporal difference learning
//!
//! Tabular agents that learn a state-action value function for the `O` side.
//!
//! ## Algorithms
//!
//! - **Q-learning**: off-policy, bootstraps from the best value at the next state
//! - **SARSA**: on-policy, bootstraps from the action actually chosen next
//!
//! ## Usage Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use ttt_rl::{
//!     q_learning::{Agent, Hyperparameters},
//!     types::{Action, StateKey},
//! };
//!
//! let params = Hyperparameters::new(0.5, 0.9, 0.0)?;
//! let mut agent = Agent::q_learning(params);
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let start = StateKey::empty();
//! assert_eq!(agent.get_action(&start, &mut rng)?, Action::new(0, 0)?);
//!
//! agent.q_update(&start, None, Action::new(1, 1)?, 1.0);
//! assert_eq!(agent.value(Action::new(1, 1)?, &start), 0.5);
//! # Ok::<(), ttt_rl::Error>(())
//! ```

pub mod agent;
pub mod policy;
pub mod serialization;
pub mod update;
pub mod value_table;

pub use agent::{Agent, Algorithm, Hyperparameters};
pub use policy::EpsilonGreedy;
pub use serialization::SavedAgent;
pub use value_table::ValueTable;
