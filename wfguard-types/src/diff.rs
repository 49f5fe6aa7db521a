use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What happened to a named element between two configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl DiffStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DiffStatus::Added => "added",
            DiffStatus::Removed => "removed",
            DiffStatus::Changed => "changed",
            DiffStatus::Unchanged => "unchanged",
        }
    }
}

/// A difference between two snapshots of the same module that risks data loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChange {
    pub field: String,

    #[serde(default)]
    pub old_value: Value,

    #[serde(default)]
    pub new_value: Value,

    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDiff {
    pub name: String,
    pub status: DiffStatus,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub module_type: String,

    pub stateful: bool,

    /// Human-readable description of what changed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,

    /// Infrastructure resource correlated from a deployment state, display only.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaking_changes: Vec<BreakingChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDiff {
    pub name: String,
    pub status: DiffStatus,

    /// Short trigger description, e.g. `http POST /api/v1/orders`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trigger: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

/// Breaking changes of one module, lifted to the top of the diff for review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChangeSummary {
    pub module_name: String,
    pub changes: Vec<BreakingChange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    #[serde(default)]
    pub old_config: String,

    #[serde(default)]
    pub new_config: String,

    #[serde(default)]
    pub modules: Vec<ModuleDiff>,

    #[serde(default)]
    pub pipelines: Vec<PipelineDiff>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breaking_changes: Vec<BreakingChangeSummary>,
}

impl DiffResult {
    pub fn has_breaking_changes(&self) -> bool {
        !self.breaking_changes.is_empty()
    }

    /// Number of modules and pipelines whose status is not `Unchanged`.
    pub fn change_count(&self) -> usize {
        self.modules
            .iter()
            .filter(|m| m.status != DiffStatus::Unchanged)
            .count()
            + self
                .pipelines
                .iter()
                .filter(|p| p.status != DiffStatus::Unchanged)
                .count()
    }
}
