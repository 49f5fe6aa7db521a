use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic snapshot of what an application config exposes.
///
/// Written next to a release and read back as the baseline for the next one.
/// Collections tolerate `null` so baselines produced by older writers still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub version: String,

    /// Truncated SHA-256 of the config; a fingerprint, not an integrity check.
    #[serde(default)]
    pub config_hash: String,

    #[serde(default)]
    pub generated_at: String,

    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub endpoints: Vec<EndpointContract>,

    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub modules: Vec<ModuleContract>,

    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub steps: Vec<String>,

    #[serde(default, deserialize_with = "crate::null_as_default")]
    pub events: Vec<EventContract>,
}

impl Contract {
    pub fn new(config_hash: String, generated_at: String) -> Self {
        Self {
            version: crate::schema::CONTRACT_VERSION.to_string(),
            config_hash,
            generated_at,
            endpoints: vec![],
            modules: vec![],
            steps: vec![],
            events: vec![],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointContract {
    pub method: String,
    pub path: String,

    #[serde(default)]
    pub auth_required: bool,

    #[serde(default)]
    pub pipeline: String,
}

impl EndpointContract {
    /// Identity used to match endpoints across contracts, e.g. `GET /items`.
    pub fn key(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContract {
    pub name: String,

    #[serde(rename = "type")]
    pub module_type: String,

    #[serde(default)]
    pub stateful: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventDirection {
    Publish,
    Subscribe,
}

impl EventDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            EventDirection::Publish => "publish",
            EventDirection::Subscribe => "subscribe",
        }
    }
}

impl fmt::Display for EventDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContract {
    pub topic: String,
    pub direction: EventDirection,

    #[serde(default)]
    pub pipeline: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Added => "ADDED",
            ChangeKind::Removed => "REMOVED",
            ChangeKind::Changed => "CHANGED",
            ChangeKind::Unchanged => "UNCHANGED",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointChange {
    pub method: String,
    pub path: String,
    pub pipeline: String,
    pub change: ChangeKind,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,

    pub is_breaking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleChange {
    pub name: String,

    #[serde(rename = "type")]
    pub module_type: String,

    pub change: ChangeKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventChange {
    pub topic: String,
    pub direction: EventDirection,
    pub pipeline: String,
    pub change: ChangeKind,
}

/// Result of comparing a baseline contract with the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractComparison {
    pub base_version: String,
    pub current_version: String,
    pub endpoints: Vec<EndpointChange>,
    pub modules: Vec<ModuleChange>,
    pub events: Vec<EventChange>,
    pub breaking_count: u32,
}

impl ContractComparison {
    pub fn breaking_endpoints(&self) -> impl Iterator<Item = &EndpointChange> {
        self.endpoints.iter().filter(|e| e.is_breaking)
    }
}
