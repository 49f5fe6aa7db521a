use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Module-level configuration: an arbitrary, loosely typed key/value map.
pub type ConfigMap = serde_json::Map<String, Value>;

/// The slice of an application config that wfguard analyses.
///
/// Produced by an external loader. Unknown top-level sections are ignored so
/// that full application configs deserialize without a dedicated schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowConfig {
    #[serde(default)]
    pub modules: Vec<ModuleDescriptor>,

    /// Pipeline name -> raw pipeline tree (trigger, steps, ...).
    ///
    /// Values are kept untyped; the analysis layer reads them through tolerant
    /// accessors and treats any shape mismatch as absent data.
    #[serde(default)]
    pub pipelines: BTreeMap<String, Value>,
}

impl WorkflowConfig {
    pub fn module(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub module_type: String,

    #[serde(default)]
    pub config: ConfigMap,

    #[serde(default, rename = "dependsOn", skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, module_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module_type: module_type.into(),
            config: ConfigMap::new(),
            depends_on: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ConfigMap) -> Self {
        self.config = config;
        self
    }
}
