use serde::{Deserialize, Serialize};

/// Availability of one module, step, or trigger type in the target engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAvailability {
    #[serde(rename = "type")]
    pub type_name: String,
    pub available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatCheckResult {
    pub engine_version: String,

    /// Distinct module types used by the config, sorted.
    #[serde(default)]
    pub required_modules: Vec<TypeAvailability>,

    /// Distinct step types used across all pipelines, sorted.
    #[serde(default)]
    pub required_steps: Vec<TypeAvailability>,

    /// Distinct trigger types used across all pipelines, sorted.
    #[serde(default)]
    pub required_triggers: Vec<TypeAvailability>,

    pub compatible: bool,

    #[serde(default)]
    pub issues: Vec<String>,
}

impl CompatCheckResult {
    pub fn unavailable(&self) -> impl Iterator<Item = &TypeAvailability> {
        self.required_modules
            .iter()
            .chain(&self.required_steps)
            .chain(&self.required_triggers)
            .filter(|t| !t.available)
    }
}
