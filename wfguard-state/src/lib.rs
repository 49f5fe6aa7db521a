//! Deployment-state snapshots and the JSON files they live in.
//!
//! A deployment state is built from a config at deploy time and read back by
//! later diffs to correlate modules with infrastructure resources. The contract
//! baseline file shares the same load/save rules.

mod build;
mod store;

pub use build::{StateInput, build_state_from_config};
pub use store::{StateError, load_contract, load_state, save_contract, save_state};
