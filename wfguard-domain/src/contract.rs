//! API contract snapshots and their comparison.
//!
//! A contract captures what a config exposes to the outside: HTTP endpoints,
//! modules, step types, and pub/sub topics. Comparing a baseline contract with
//! the current one flags removed endpoints and newly authenticated endpoints as
//! breaking for existing clients.

use crate::value::{step_maps, step_type, str_at, trigger_config, trigger_type};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};
use wfguard_registry::TypeRegistry;
use wfguard_types::config::WorkflowConfig;
use wfguard_types::contract::{
    ChangeKind, Contract, ContractComparison, EndpointChange, EndpointContract, EventChange,
    EventContract, EventDirection, ModuleChange, ModuleContract,
};

/// Length of the hex fingerprint stored in `Contract::config_hash`.
pub const CONTRACT_HASH_LEN: usize = 16;

const AUTH_STEP: &str = "step.auth_required";
const PUBLISH_STEP: &str = "step.publish";

pub fn generate_contract(cfg: &WorkflowConfig, registry: &TypeRegistry) -> Contract {
    generate_contract_at(cfg, registry, Utc::now())
}

/// Same as [`generate_contract`] with an explicit generation timestamp.
pub fn generate_contract_at(
    cfg: &WorkflowConfig,
    registry: &TypeRegistry,
    generated_at: DateTime<Utc>,
) -> Contract {
    let mut contract = Contract::new(
        config_fingerprint(cfg),
        generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    );

    contract.modules = cfg
        .modules
        .iter()
        .map(|m| ModuleContract {
            name: m.name.clone(),
            module_type: m.module_type.clone(),
            stateful: registry.is_module_stateful(&m.module_type),
        })
        .collect();
    contract.modules.sort_by(|a, b| a.name.cmp(&b.name));

    let mut steps = BTreeSet::new();

    for (pipeline_name, pipeline) in &cfg.pipelines {
        if pipeline.as_object().is_none() {
            debug!(pipeline = %pipeline_name, "skipping non-map pipeline");
            continue;
        }

        let trigger = trigger_type(pipeline);
        let trigger_cfg = trigger_config(pipeline);

        if trigger == Some("http")
            && let Some(http_cfg) = trigger_cfg
            && let (Some(path), Some(method)) = (str_at(http_cfg, "path"), str_at(http_cfg, "method"))
        {
            contract.endpoints.push(EndpointContract {
                method: method.to_uppercase(),
                path: path.to_string(),
                auth_required: step_maps(pipeline).any(|s| step_type(s) == Some(AUTH_STEP)),
                pipeline: pipeline_name.clone(),
            });
        }

        for step in step_maps(pipeline) {
            let Some(ty) = step_type(step) else { continue };
            steps.insert(ty.to_string());

            if ty == PUBLISH_STEP
                && let Some(topic) = step
                    .get("config")
                    .and_then(|c| c.as_object())
                    .and_then(|c| str_at(c, "topic"))
            {
                contract.events.push(EventContract {
                    topic: topic.to_string(),
                    direction: EventDirection::Publish,
                    pipeline: pipeline_name.clone(),
                });
            }
        }

        if trigger == Some("event")
            && let Some(topic) = trigger_cfg.and_then(|c| str_at(c, "topic"))
        {
            contract.events.push(EventContract {
                topic: topic.to_string(),
                direction: EventDirection::Subscribe,
                pipeline: pipeline_name.clone(),
            });
        }
    }

    contract.endpoints.sort_by(|a, b| {
        (&a.path, &a.method, &a.pipeline).cmp(&(&b.path, &b.method, &b.pipeline))
    });
    contract.steps = steps.into_iter().collect();
    contract.events.sort_by(|a, b| {
        (&a.topic, a.direction, &a.pipeline).cmp(&(&b.topic, b.direction, &b.pipeline))
    });

    debug!(
        endpoints = contract.endpoints.len(),
        modules = contract.modules.len(),
        steps = contract.steps.len(),
        events = contract.events.len(),
        "generated contract"
    );

    contract
}

/// Truncated SHA-256 over the config's JSON encoding.
fn config_fingerprint(cfg: &WorkflowConfig) -> String {
    match serde_json::to_vec(cfg) {
        Ok(bytes) => wfguard_hash::short_fingerprint(&bytes, CONTRACT_HASH_LEN),
        Err(err) => {
            warn!(error = %err, "failed to encode config for fingerprint");
            String::new()
        }
    }
}

pub fn compare_contracts(base: &Contract, current: &Contract) -> ContractComparison {
    let mut comparison = ContractComparison {
        base_version: base.version.clone(),
        current_version: current.version.clone(),
        ..ContractComparison::default()
    };

    let base_endpoints: BTreeMap<String, &EndpointContract> =
        base.endpoints.iter().map(|e| (e.key(), e)).collect();
    let mut current_endpoints: BTreeMap<String, &EndpointContract> =
        current.endpoints.iter().map(|e| (e.key(), e)).collect();

    for (key, base_ep) in &base_endpoints {
        let change = match current_endpoints.remove(key) {
            Some(current_ep) if !base_ep.auth_required && current_ep.auth_required => {
                EndpointChange {
                    method: base_ep.method.clone(),
                    path: base_ep.path.clone(),
                    pipeline: current_ep.pipeline.clone(),
                    change: ChangeKind::Changed,
                    detail: "auth requirement added (clients without tokens will get 401)"
                        .to_string(),
                    is_breaking: true,
                }
            }
            Some(current_ep) => EndpointChange {
                method: base_ep.method.clone(),
                path: base_ep.path.clone(),
                pipeline: current_ep.pipeline.clone(),
                change: ChangeKind::Unchanged,
                detail: String::new(),
                is_breaking: false,
            },
            None => EndpointChange {
                method: base_ep.method.clone(),
                path: base_ep.path.clone(),
                pipeline: base_ep.pipeline.clone(),
                change: ChangeKind::Removed,
                detail: "endpoint removed (clients calling this will get 404)".to_string(),
                is_breaking: true,
            },
        };
        if change.is_breaking {
            comparison.breaking_count += 1;
        }
        comparison.endpoints.push(change);
    }

    for current_ep in current_endpoints.values() {
        comparison.endpoints.push(EndpointChange {
            method: current_ep.method.clone(),
            path: current_ep.path.clone(),
            pipeline: current_ep.pipeline.clone(),
            change: ChangeKind::Added,
            detail: String::new(),
            is_breaking: false,
        });
    }

    comparison
        .endpoints
        .sort_by(|a, b| (&a.path, &a.method).cmp(&(&b.path, &b.method)));

    let base_modules: BTreeMap<&str, &ModuleContract> =
        base.modules.iter().map(|m| (m.name.as_str(), m)).collect();
    let mut current_modules: BTreeMap<&str, &ModuleContract> =
        current.modules.iter().map(|m| (m.name.as_str(), m)).collect();

    for (name, base_mod) in &base_modules {
        let change = if current_modules.remove(name).is_some() {
            ChangeKind::Unchanged
        } else {
            ChangeKind::Removed
        };
        comparison.modules.push(ModuleChange {
            name: name.to_string(),
            module_type: base_mod.module_type.clone(),
            change,
        });
    }
    for (name, current_mod) in current_modules {
        comparison.modules.push(ModuleChange {
            name: name.to_string(),
            module_type: current_mod.module_type.clone(),
            change: ChangeKind::Added,
        });
    }
    comparison.modules.sort_by(|a, b| a.name.cmp(&b.name));

    let base_events: BTreeMap<(&str, EventDirection), &EventContract> = base
        .events
        .iter()
        .map(|e| ((e.topic.as_str(), e.direction), e))
        .collect();
    let mut current_events: BTreeMap<(&str, EventDirection), &EventContract> = current
        .events
        .iter()
        .map(|e| ((e.topic.as_str(), e.direction), e))
        .collect();

    for (key, base_ev) in &base_events {
        let change = if current_events.remove(key).is_some() {
            ChangeKind::Unchanged
        } else {
            ChangeKind::Removed
        };
        comparison.events.push(EventChange {
            topic: base_ev.topic.clone(),
            direction: base_ev.direction,
            pipeline: base_ev.pipeline.clone(),
            change,
        });
    }
    for current_ev in current_events.values() {
        comparison.events.push(EventChange {
            topic: current_ev.topic.clone(),
            direction: current_ev.direction,
            pipeline: current_ev.pipeline.clone(),
            change: ChangeKind::Added,
        });
    }
    comparison
        .events
        .sort_by(|a, b| (&a.topic, a.direction).cmp(&(&b.topic, b.direction)));

    debug!(
        endpoints = comparison.endpoints.len(),
        breaking = comparison.breaking_count,
        "compared contracts"
    );

    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cfg(value: serde_json::Value) -> WorkflowConfig {
        serde_json::from_value(value).expect("config")
    }

    fn endpoint(method: &str, path: &str, auth: bool) -> EndpointContract {
        EndpointContract {
            method: method.to_string(),
            path: path.to_string(),
            auth_required: auth,
            pipeline: format!("{} {}", method, path),
        }
    }

    fn contract_with(endpoints: Vec<EndpointContract>) -> Contract {
        let mut c = Contract::new("0000000000000000".to_string(), String::new());
        c.endpoints = endpoints;
        c
    }

    #[test]
    fn http_endpoint_needs_path_and_method() {
        let c = cfg(json!({ "pipelines": {
            "ok": { "trigger": { "type": "http", "config": { "path": "/items", "method": "get" } } },
            "no-method": { "trigger": { "type": "http", "config": { "path": "/x" } } },
            "no-config": { "trigger": { "type": "http" } }
        }}));

        let contract = generate_contract(&c, TypeRegistry::shared());
        assert_eq!(contract.endpoints.len(), 1);
        assert_eq!(contract.endpoints[0].method, "GET");
        assert_eq!(contract.endpoints[0].pipeline, "ok");
        assert!(!contract.endpoints[0].auth_required);
    }

    #[test]
    fn auth_step_marks_endpoint() {
        let c = cfg(json!({ "pipelines": {
            "secure": {
                "trigger": { "type": "http", "config": { "path": "/me", "method": "GET" } },
                "steps": [ { "type": "step.auth_required" }, { "type": "step.json_response" } ]
            }
        }}));

        let contract = generate_contract(&c, TypeRegistry::shared());
        assert!(contract.endpoints[0].auth_required);
        assert_eq!(contract.steps, vec!["step.auth_required", "step.json_response"]);
    }

    #[test]
    fn events_are_not_deduplicated() {
        let c = cfg(json!({ "pipelines": {
            "create": {
                "trigger": { "type": "http", "config": { "path": "/orders", "method": "POST" } },
                "steps": [ { "type": "step.publish", "config": { "topic": "orders" } } ]
            },
            "consume": { "trigger": { "type": "event", "config": { "topic": "orders" } } },
            "blank": { "steps": [ { "type": "step.publish", "config": { "topic": "" } } ] }
        }}));

        let contract = generate_contract(&c, TypeRegistry::shared());
        assert_eq!(
            contract.events,
            vec![
                EventContract {
                    topic: "orders".to_string(),
                    direction: EventDirection::Publish,
                    pipeline: "create".to_string(),
                },
                EventContract {
                    topic: "orders".to_string(),
                    direction: EventDirection::Subscribe,
                    pipeline: "consume".to_string(),
                },
            ]
        );
    }

    #[test]
    fn module_statefulness_comes_from_registry() {
        let c = cfg(json!({ "modules": [
            { "name": "b", "type": "messaging.broker" },
            { "name": "a", "type": "storage.sqlite" },
            { "name": "c", "type": "custom.unknown" }
        ]}));

        let contract = generate_contract(&c, TypeRegistry::shared());
        let flags: Vec<_> = contract.modules.iter().map(|m| (m.name.as_str(), m.stateful)).collect();
        assert_eq!(flags, vec![("a", true), ("b", false), ("c", false)]);
    }

    #[test]
    fn fingerprint_is_short_hex() {
        let contract = generate_contract(&WorkflowConfig::default(), TypeRegistry::shared());
        assert_eq!(contract.config_hash.len(), CONTRACT_HASH_LEN);
        assert!(contract.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(contract.version, "1.0");
    }

    #[test]
    fn added_endpoint_is_not_breaking() {
        let base = contract_with(vec![endpoint("GET", "/items", false)]);
        let current = contract_with(vec![endpoint("GET", "/items", false), endpoint("POST", "/items", false)]);

        let cmp = compare_contracts(&base, &current);
        assert_eq!(cmp.breaking_count, 0);
        let post = cmp.endpoints.iter().find(|e| e.method == "POST").expect("POST entry");
        assert_eq!(post.change, ChangeKind::Added);
        assert!(!post.is_breaking);
    }

    #[test]
    fn removed_endpoint_is_breaking() {
        let base = contract_with(vec![endpoint("GET", "/items", false), endpoint("GET", "/legacy", false)]);
        let current = contract_with(vec![endpoint("GET", "/items", false)]);

        let cmp = compare_contracts(&base, &current);
        assert_eq!(cmp.breaking_count, 1);
        let legacy = cmp.endpoints.iter().find(|e| e.path == "/legacy").expect("legacy entry");
        assert_eq!(legacy.change, ChangeKind::Removed);
        assert!(legacy.is_breaking);
        assert!(legacy.detail.contains("404"));
    }

    #[test]
    fn auth_added_is_breaking_auth_dropped_is_not() {
        let base = contract_with(vec![endpoint("GET", "/a", false), endpoint("GET", "/b", true)]);
        let current = contract_with(vec![endpoint("GET", "/a", true), endpoint("GET", "/b", false)]);

        let cmp = compare_contracts(&base, &current);
        assert_eq!(cmp.breaking_count, 1);
        assert_eq!(cmp.endpoints[0].change, ChangeKind::Changed);
        assert!(cmp.endpoints[0].detail.contains("auth"));
        assert_eq!(cmp.endpoints[1].change, ChangeKind::Unchanged);
        assert!(!cmp.endpoints[1].is_breaking);
    }

    #[test]
    fn modules_and_events_never_break() {
        let mut base = contract_with(vec![]);
        base.modules.push(ModuleContract {
            name: "old".to_string(),
            module_type: "storage.sqlite".to_string(),
            stateful: true,
        });
        base.events.push(EventContract {
            topic: "t".to_string(),
            direction: EventDirection::Publish,
            pipeline: "p".to_string(),
        });
        let mut current = contract_with(vec![]);
        current.events.push(EventContract {
            topic: "t".to_string(),
            direction: EventDirection::Subscribe,
            pipeline: "q".to_string(),
        });

        let cmp = compare_contracts(&base, &current);
        assert_eq!(cmp.breaking_count, 0);
        assert_eq!(cmp.modules[0].change, ChangeKind::Removed);
        let changes: Vec<_> = cmp.events.iter().map(|e| (e.direction, e.change)).collect();
        assert_eq!(
            changes,
            vec![
                (EventDirection::Publish, ChangeKind::Removed),
                (EventDirection::Subscribe, ChangeKind::Added),
            ]
        );
    }
}
