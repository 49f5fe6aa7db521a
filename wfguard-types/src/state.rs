use crate::config::ConfigMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of a config's resources taken at deploy time.
///
/// Later diffs use it to correlate modules with the infrastructure resources
/// they were deployed as. Never mutated in place; regenerated on each deploy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentState {
    pub version: String,

    /// `sha256:<hex>` of the config file, or empty when it could not be read.
    #[serde(default)]
    pub config_hash: String,

    pub deployed_at: DateTime<Utc>,

    #[serde(default)]
    pub config_file: String,

    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub resources: DeployedResources,

    #[serde(default)]
    pub schema_version: u32,

    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub migrations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeployedResources {
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub modules: BTreeMap<String, DeployedModuleState>,

    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub pipelines: BTreeMap<String, DeployedPipelineState>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployedModuleState {
    #[serde(rename = "type")]
    pub module_type: String,

    pub stateful: bool,

    /// Only set for stateful modules.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_id: String,

    /// Owned copy of the module config at deploy time.
    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub config: ConfigMap,
}

/// Best-effort trigger summary; fields are empty when the pipeline tree lacks them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedPipelineState {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trigger: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub method: String,
}
