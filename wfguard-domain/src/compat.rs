use crate::value::{step_maps, step_type, trigger_type};
use std::collections::BTreeSet;
use tracing::debug;
use wfguard_registry::TypeRegistry;
use wfguard_types::compat::{CompatCheckResult, TypeAvailability};
use wfguard_types::config::WorkflowConfig;

/// Check every module, step, and trigger type a config uses against an engine registry.
///
/// Types are deduplicated and sorted. Each unknown type adds one issue.
pub fn check_compatibility(cfg: &WorkflowConfig, registry: &TypeRegistry) -> CompatCheckResult {
    let module_types: BTreeSet<&str> = cfg.modules.iter().map(|m| m.module_type.as_str()).collect();

    let mut step_types = BTreeSet::new();
    let mut trigger_types = BTreeSet::new();
    for pipeline in cfg.pipelines.values() {
        step_types.extend(step_maps(pipeline).filter_map(step_type));
        trigger_types.extend(trigger_type(pipeline));
    }

    let mut issues = Vec::new();

    let required_modules = check_all(module_types, |t| registry.has_module(t), |t| {
        issues.push(format!("unknown module type: {t}"));
    });
    let required_steps = check_all(step_types, |t| registry.has_step(t), |t| {
        issues.push(format!("unknown step type: {t}"));
    });
    let required_triggers = check_all(trigger_types, |t| registry.has_trigger(t), |t| {
        issues.push(format!("unknown trigger type: {t}"));
    });

    debug!(
        modules = required_modules.len(),
        steps = required_steps.len(),
        triggers = required_triggers.len(),
        issues = issues.len(),
        "checked type compatibility"
    );

    CompatCheckResult {
        engine_version: registry.engine_version().to_string(),
        required_modules,
        required_steps,
        required_triggers,
        compatible: issues.is_empty(),
        issues,
    }
}

fn check_all<'a>(
    types: BTreeSet<&'a str>,
    known: impl Fn(&str) -> bool,
    mut on_unknown: impl FnMut(&str),
) -> Vec<TypeAvailability> {
    types
        .into_iter()
        .map(|t| {
            let available = known(t);
            if !available {
                on_unknown(t);
            }
            TypeAvailability {
                type_name: t.to_string(),
                available,
            }
        })
        .collect()
}
