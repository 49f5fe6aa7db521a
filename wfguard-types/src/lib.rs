//! Shared DTOs (schemas-as-code) for the wfguard workspace.
//!
//! # Design constraints
//! - Deployment-state and contract types are written to disk and read back by later runs.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.
//! - Every collection that reaches the wire is either a sorted `Vec` or a `BTreeMap`.

pub mod compat;
pub mod config;
pub mod contract;
pub mod diff;
pub mod resource;
pub mod state;

use serde::{Deserialize, Deserializer};

/// Schema identifiers and format versions.
pub mod schema {
    /// `DeploymentState::version` written by the state builder.
    pub const DEPLOYMENT_STATE_VERSION: &str = "1";
    /// `DeploymentState::schema_version` written by the state builder.
    pub const DEPLOYMENT_STATE_SCHEMA_VERSION: u32 = 1;
    /// `Contract::version` written by the contract generator.
    pub const CONTRACT_VERSION: &str = "1.0";
}

/// Deserialize `null` as the type's default; pair with `#[serde(default)]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
