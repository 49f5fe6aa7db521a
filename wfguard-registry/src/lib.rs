//! Engine capability registry.
//!
//! Maps module, step, and trigger type strings to what the target engine knows
//! about them. A registry is immutable once built: construct it once (or use
//! [`TypeRegistry::shared`]) and pass it by reference into the analysers.

mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// Engine version the built-in tables describe.
pub const BUILTIN_ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleTypeInfo {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub plugin: String,

    /// Whether the module manages persistent state, as declared by its plugin.
    #[serde(default)]
    pub stateful: bool,

    #[serde(default)]
    pub config_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTypeInfo {
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub plugin: String,

    #[serde(default)]
    pub config_keys: Vec<String>,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry json parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate module type in registry: {0}")]
    DuplicateModuleType(String),

    #[error("duplicate step type in registry: {0}")]
    DuplicateStepType(String),
}

/// On-disk form of a registry: flat lists, so duplicates can be reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDocument {
    pub engine_version: String,

    #[serde(default)]
    pub modules: Vec<ModuleTypeInfo>,

    #[serde(default)]
    pub steps: Vec<StepTypeInfo>,

    #[serde(default)]
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    engine_version: String,
    modules: BTreeMap<String, ModuleTypeInfo>,
    steps: BTreeMap<String, StepTypeInfo>,
    triggers: BTreeSet<String>,
}

static SHARED: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::builtin);

impl TypeRegistry {
    /// Build the registry of types shipped with the engine.
    pub fn builtin() -> Self {
        let modules = builtin::MODULE_TYPES
            .iter()
            .map(|(type_name, plugin, stateful, keys)| {
                (
                    type_name.to_string(),
                    ModuleTypeInfo {
                        type_name: type_name.to_string(),
                        plugin: plugin.to_string(),
                        stateful: *stateful,
                        config_keys: keys.iter().map(|k| k.to_string()).collect(),
                    },
                )
            })
            .collect();

        let steps = builtin::STEP_TYPES
            .iter()
            .map(|(type_name, plugin, keys)| {
                (
                    type_name.to_string(),
                    StepTypeInfo {
                        type_name: type_name.to_string(),
                        plugin: plugin.to_string(),
                        config_keys: keys.iter().map(|k| k.to_string()).collect(),
                    },
                )
            })
            .collect();

        let triggers = builtin::TRIGGER_TYPES
            .iter()
            .map(|t| t.to_string())
            .collect();

        Self {
            engine_version: BUILTIN_ENGINE_VERSION.to_string(),
            modules,
            steps,
            triggers,
        }
    }

    /// Process-wide built-in registry, built on first use.
    pub fn shared() -> &'static TypeRegistry {
        &SHARED
    }

    /// Build a registry from an externally supplied document.
    pub fn from_document(doc: RegistryDocument) -> Result<Self, RegistryError> {
        let mut modules = BTreeMap::new();
        for m in doc.modules {
            if modules.contains_key(&m.type_name) {
                return Err(RegistryError::DuplicateModuleType(m.type_name));
            }
            modules.insert(m.type_name.clone(), m);
        }

        let mut steps = BTreeMap::new();
        for s in doc.steps {
            if steps.contains_key(&s.type_name) {
                return Err(RegistryError::DuplicateStepType(s.type_name));
            }
            steps.insert(s.type_name.clone(), s);
        }

        debug!(
            engine_version = %doc.engine_version,
            modules = modules.len(),
            steps = steps.len(),
            "loaded type registry"
        );

        Ok(Self {
            engine_version: doc.engine_version,
            modules,
            steps,
            triggers: doc.triggers.into_iter().collect(),
        })
    }

    /// Parse a registry from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let doc: RegistryDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Flatten back into the document form, sorted by type.
    pub fn to_document(&self) -> RegistryDocument {
        RegistryDocument {
            engine_version: self.engine_version.clone(),
            modules: self.modules.values().cloned().collect(),
            steps: self.steps.values().cloned().collect(),
            triggers: self.triggers.iter().cloned().collect(),
        }
    }

    pub fn engine_version(&self) -> &str {
        &self.engine_version
    }

    pub fn module(&self, type_name: &str) -> Option<&ModuleTypeInfo> {
        self.modules.get(type_name)
    }

    pub fn step(&self, type_name: &str) -> Option<&StepTypeInfo> {
        self.steps.get(type_name)
    }

    pub fn has_module(&self, type_name: &str) -> bool {
        self.modules.contains_key(type_name)
    }

    pub fn has_step(&self, type_name: &str) -> bool {
        self.steps.contains_key(type_name)
    }

    pub fn has_trigger(&self, type_name: &str) -> bool {
        self.triggers.contains(type_name)
    }

    /// Plugin-declared statefulness; unknown types are not stateful.
    pub fn is_module_stateful(&self, type_name: &str) -> bool {
        self.module(type_name).is_some_and(|m| m.stateful)
    }

    pub fn module_types(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn step_types(&self) -> impl Iterator<Item = &str> {
        self.steps.keys().map(String::as_str)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_core_types() {
        let reg = TypeRegistry::builtin();
        assert!(reg.has_module("storage.sqlite"));
        assert!(reg.has_module("http.server"));
        assert!(reg.has_step("step.auth_required"));
        assert!(reg.has_step("step.publish"));
        assert!(reg.has_trigger("http"));
        assert!(reg.has_trigger("event"));
        assert_eq!(reg.engine_version(), BUILTIN_ENGINE_VERSION);
    }

    #[test]
    fn builtin_tables_have_no_duplicates() {
        let reg = TypeRegistry::builtin();
        assert_eq!(reg.modules.len(), builtin::MODULE_TYPES.len());
        assert_eq!(reg.steps.len(), builtin::STEP_TYPES.len());
    }

    #[test]
    fn registry_statefulness_defaults_false() {
        let reg = TypeRegistry::builtin();
        assert!(reg.is_module_stateful("storage.sqlite"));
        assert!(!reg.is_module_stateful("cache.redis"));
        assert!(!reg.is_module_stateful("custom.unknown"));
    }

    #[test]
    fn shared_is_built_once() {
        let a = TypeRegistry::shared() as *const TypeRegistry;
        let b = TypeRegistry::shared() as *const TypeRegistry;
        assert_eq!(a, b);
    }
}
