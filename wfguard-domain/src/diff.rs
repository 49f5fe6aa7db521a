//! Structural diff of two workflow configs.
//!
//! Modules and pipelines are matched by name and emitted in name order. A
//! deployment state, when supplied, only contributes display-level resource
//! ids; it never changes a status.

use crate::classify::{detect_breaking_changes, is_stateful};
use crate::value::{as_map, describe, steps_of, str_at, stringify, trigger_of};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use wfguard_types::config::{ConfigMap, ModuleDescriptor, WorkflowConfig};
use wfguard_types::diff::{BreakingChangeSummary, DiffResult, DiffStatus, ModuleDiff, PipelineDiff};
use wfguard_types::state::DeploymentState;

pub fn diff_configs(
    old: &WorkflowConfig,
    new: &WorkflowConfig,
    state: Option<&DeploymentState>,
) -> DiffResult {
    let old_modules = index_modules(old);
    let new_modules = index_modules(new);
    let module_names: BTreeSet<&str> = old_modules
        .keys()
        .chain(new_modules.keys())
        .copied()
        .collect();

    let mut result = DiffResult::default();

    for name in module_names {
        let diff = diff_module(
            name,
            old_modules.get(name).copied(),
            new_modules.get(name).copied(),
            state,
        );
        if !diff.breaking_changes.is_empty() {
            result.breaking_changes.push(BreakingChangeSummary {
                module_name: name.to_string(),
                changes: diff.breaking_changes.clone(),
            });
        }
        result.modules.push(diff);
    }

    let pipeline_names: BTreeSet<&str> = old
        .pipelines
        .keys()
        .chain(new.pipelines.keys())
        .map(String::as_str)
        .collect();

    for name in pipeline_names {
        result.pipelines.push(diff_pipeline(
            name,
            old.pipelines.get(name),
            new.pipelines.get(name),
        ));
    }

    debug!(
        modules = result.modules.len(),
        pipelines = result.pipelines.len(),
        breaking = result.breaking_changes.len(),
        "diffed configs"
    );

    result
}

// Later duplicates win, matching how a loader would overwrite by name.
fn index_modules(cfg: &WorkflowConfig) -> BTreeMap<&str, &ModuleDescriptor> {
    cfg.modules.iter().map(|m| (m.name.as_str(), m)).collect()
}

pub fn diff_module(
    name: &str,
    old: Option<&ModuleDescriptor>,
    new: Option<&ModuleDescriptor>,
    state: Option<&DeploymentState>,
) -> ModuleDiff {
    let resource_id = state
        .and_then(|s| s.resources.modules.get(name))
        .map(|m| m.resource_id.clone())
        .unwrap_or_default();

    let mut diff = ModuleDiff {
        name: name.to_string(),
        status: DiffStatus::Unchanged,
        module_type: String::new(),
        stateful: false,
        detail: String::new(),
        resource_id,
        breaking_changes: vec![],
    };

    match (old, new) {
        (None, None) => {}
        (None, Some(new)) => {
            diff.status = DiffStatus::Added;
            diff.module_type = new.module_type.clone();
            diff.stateful = is_stateful(&new.module_type);
            diff.detail = "NEW".to_string();
        }
        (Some(old), None) => {
            diff.status = DiffStatus::Removed;
            diff.module_type = old.module_type.clone();
            diff.stateful = is_stateful(&old.module_type);
            diff.detail = if diff.stateful {
                "REMOVED - WARNING: stateful resource may still hold data".to_string()
            } else {
                "REMOVED (stateless, safe to remove)".to_string()
            };
        }
        (Some(old), Some(new)) => {
            diff.module_type = new.module_type.clone();
            diff.stateful = is_stateful(&new.module_type);

            let breaking = detect_breaking_changes(Some(old), Some(new));
            if old.module_type != new.module_type {
                diff.status = DiffStatus::Changed;
                diff.detail = format!("TYPE CHANGED: {} → {}", old.module_type, new.module_type);
                diff.breaking_changes = breaking;
            } else if !breaking.is_empty() {
                let parts: Vec<String> = breaking
                    .iter()
                    .map(|bc| {
                        format!(
                            "{}: {} → {}",
                            bc.field,
                            describe(&bc.old_value),
                            describe(&bc.new_value)
                        )
                    })
                    .collect();
                diff.status = DiffStatus::Changed;
                diff.detail = format!("CONFIG CHANGED: {}", parts.join("; "));
                diff.breaking_changes = breaking;
            } else if is_config_changed(&old.config, &new.config) {
                diff.status = DiffStatus::Changed;
                diff.detail = "CONFIG CHANGED".to_string();
            } else {
                diff.detail = "UNCHANGED".to_string();
            }
        }
    }

    diff
}

pub fn diff_pipeline(name: &str, old: Option<&Value>, new: Option<&Value>) -> PipelineDiff {
    let mut diff = PipelineDiff {
        name: name.to_string(),
        status: DiffStatus::Unchanged,
        trigger: String::new(),
        detail: String::new(),
    };

    match (old, new) {
        (None, None) => {}
        (None, Some(new)) => {
            diff.status = DiffStatus::Added;
            diff.trigger = describe_pipeline_trigger(new);
            diff.detail = "NEW".to_string();
        }
        (Some(old), None) => {
            diff.status = DiffStatus::Removed;
            diff.trigger = describe_pipeline_trigger(old);
            diff.detail = "REMOVED".to_string();
        }
        (Some(old), Some(new)) => {
            let old_trigger = describe_pipeline_trigger(old);
            let new_trigger = describe_pipeline_trigger(new);
            let old_steps = count_steps(old);
            let new_steps = count_steps(new);

            if old_trigger != new_trigger {
                diff.status = DiffStatus::Changed;
                diff.detail = format!("TRIGGER CHANGED: {old_trigger} → {new_trigger}");
            } else if old_steps != new_steps {
                diff.status = DiffStatus::Changed;
                diff.detail = format!("STEPS CHANGED: {old_steps} → {new_steps} steps");
            } else {
                diff.detail = "UNCHANGED".to_string();
            }
            diff.trigger = new_trigger;
        }
    }

    diff
}

/// Short trigger summary: `<type> <METHOD> <path>`, `<type> <path>`, `<type>`,
/// or `unknown` when the pipeline has no trigger map.
pub fn describe_pipeline_trigger(pipeline: &Value) -> String {
    let Some(trigger) = trigger_of(pipeline) else {
        return "unknown".to_string();
    };
    let trigger_type = trigger.get("type").and_then(Value::as_str).unwrap_or("");

    let Some(cfg) = trigger.get("config").and_then(as_map) else {
        return trigger_type.to_string();
    };

    match (str_at(cfg, "method"), str_at(cfg, "path")) {
        (Some(method), Some(path)) => format!("{trigger_type} {method} {path}"),
        (None, Some(path)) => format!("{trigger_type} {path}"),
        _ => trigger_type.to_string(),
    }
}

pub fn count_steps(pipeline: &Value) -> usize {
    steps_of(pipeline).map_or(0, Vec::len)
}

/// Whether two module configs differ in any key or in any value's rendered text.
///
/// Values compare the way breaking-change detection renders them, so `5432`
/// and `"5432"` are the same value.
pub fn is_config_changed(old: &ConfigMap, new: &ConfigMap) -> bool {
    old.len() != new.len()
        || old.iter().any(|(key, value)| match new.get(key) {
            Some(other) => stringify(Some(value)) != stringify(Some(other)),
            None => true,
        })
}
