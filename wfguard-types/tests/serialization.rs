use pretty_assertions::assert_eq;
use wfguard_types::config::WorkflowConfig;
use wfguard_types::contract::{ChangeKind, Contract, EventDirection};
use wfguard_types::diff::{DiffResult, DiffStatus, ModuleDiff};
use wfguard_types::resource::ResourceKind;
use wfguard_types::state::{DeployedModuleState, DeployedPipelineState, DeploymentState};

#[test]
fn diff_status_serializes_snake_case() {
    assert_eq!(
        serde_json::to_value(DiffStatus::Added).unwrap(),
        serde_json::json!("added")
    );
    assert_eq!(
        serde_json::to_value(DiffStatus::Unchanged).unwrap(),
        serde_json::json!("unchanged")
    );
}

#[test]
fn change_kind_serializes_upper_case() {
    assert_eq!(
        serde_json::to_value(ChangeKind::Added).unwrap(),
        serde_json::json!("ADDED")
    );
    assert_eq!(
        serde_json::to_value(ChangeKind::Removed).unwrap(),
        serde_json::json!("REMOVED")
    );
    assert_eq!(ChangeKind::Changed.as_str(), "CHANGED");
}

#[test]
fn resource_kind_strings_are_lowercase() {
    assert_eq!(ResourceKind::Database.as_str(), "database");
    assert_eq!(ResourceKind::Volume.to_string(), "volume");
    assert_eq!(
        serde_json::to_value(ResourceKind::Broker).unwrap(),
        serde_json::json!("broker")
    );
}

#[test]
fn cache_kind_is_not_stateful() {
    assert!(ResourceKind::Database.is_stateful());
    assert!(ResourceKind::Broker.is_stateful());
    assert!(ResourceKind::Volume.is_stateful());
    assert!(!ResourceKind::Cache.is_stateful());
    assert!(!ResourceKind::Stateless.is_stateful());
}

#[test]
fn event_direction_orders_publish_before_subscribe() {
    assert!(EventDirection::Publish < EventDirection::Subscribe);
    assert_eq!(
        serde_json::to_value(EventDirection::Subscribe).unwrap(),
        serde_json::json!("subscribe")
    );
}

#[test]
fn workflow_config_ignores_unknown_sections() {
    let cfg: WorkflowConfig = serde_json::from_value(serde_json::json!({
        "modules": [
            { "name": "db", "type": "storage.sqlite", "config": { "dbPath": "/data/a.db" }, "dependsOn": ["fs"] }
        ],
        "workflows": { "http": {} },
        "pipelines": { "p": { "trigger": { "type": "http" } } }
    }))
    .expect("deserialize config");

    assert_eq!(cfg.modules.len(), 1);
    assert_eq!(cfg.modules[0].module_type, "storage.sqlite");
    assert_eq!(cfg.modules[0].depends_on, vec!["fs".to_string()]);
    assert!(cfg.pipelines.contains_key("p"));
    assert!(cfg.module("db").is_some());
    assert!(cfg.module("missing").is_none());
}

#[test]
fn module_without_config_gets_empty_map() {
    let cfg: WorkflowConfig = serde_json::from_value(serde_json::json!({
        "modules": [{ "name": "bus", "type": "messaging.broker" }]
    }))
    .expect("deserialize config");

    assert!(cfg.modules[0].config.is_empty());
    assert!(cfg.pipelines.is_empty());
}

#[test]
fn module_diff_omits_empty_optional_fields() {
    let diff = ModuleDiff {
        name: "api".to_string(),
        status: DiffStatus::Unchanged,
        module_type: "http.server".to_string(),
        stateful: false,
        detail: String::new(),
        resource_id: String::new(),
        breaking_changes: vec![],
    };

    let value = serde_json::to_value(&diff).expect("serialize diff");
    assert!(value.get("detail").is_none());
    assert!(value.get("resourceId").is_none());
    assert!(value.get("breakingChanges").is_none());
    assert_eq!(value["type"], serde_json::json!("http.server"));
}

#[test]
fn diff_result_counts_changes() {
    let mut result = DiffResult::default();
    assert!(!result.has_breaking_changes());
    result.modules.push(ModuleDiff {
        name: "a".to_string(),
        status: DiffStatus::Added,
        module_type: "http.server".to_string(),
        stateful: false,
        detail: "NEW".to_string(),
        resource_id: String::new(),
        breaking_changes: vec![],
    });
    result.modules.push(ModuleDiff {
        name: "b".to_string(),
        status: DiffStatus::Unchanged,
        module_type: "http.server".to_string(),
        stateful: false,
        detail: "UNCHANGED".to_string(),
        resource_id: String::new(),
        breaking_changes: vec![],
    });
    assert_eq!(result.change_count(), 1);
}

#[test]
fn contract_tolerates_null_collections() {
    let contract: Contract = serde_json::from_value(serde_json::json!({
        "version": "1.0",
        "configHash": "0123456789abcdef",
        "generatedAt": "2026-01-01T00:00:00Z",
        "endpoints": null,
        "modules": [{ "name": "db", "type": "storage.sqlite", "stateful": true }],
        "steps": null,
        "events": null
    }))
    .expect("deserialize contract");

    assert!(contract.endpoints.is_empty());
    assert!(contract.steps.is_empty());
    assert!(contract.events.is_empty());
    assert_eq!(contract.modules.len(), 1);
}

#[test]
fn contract_new_sets_version() {
    let contract = Contract::new("abc".to_string(), "now".to_string());
    assert_eq!(contract.version, wfguard_types::schema::CONTRACT_VERSION);
    assert!(contract.endpoints.is_empty());
}

#[test]
fn deployed_state_uses_camel_case_and_skips_empty_ids() {
    let stateless = DeployedModuleState {
        module_type: "http.server".to_string(),
        stateful: false,
        resource_id: String::new(),
        config: Default::default(),
    };
    let value = serde_json::to_value(&stateless).unwrap();
    assert!(value.get("resourceId").is_none());
    assert_eq!(value["type"], serde_json::json!("http.server"));

    let stateful = DeployedModuleState {
        module_type: "storage.sqlite".to_string(),
        stateful: true,
        resource_id: "database/db".to_string(),
        config: Default::default(),
    };
    let value = serde_json::to_value(&stateful).unwrap();
    assert_eq!(value["resourceId"], serde_json::json!("database/db"));

    let pipeline = DeployedPipelineState::default();
    let value = serde_json::to_value(&pipeline).unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[test]
fn state_file_tolerates_null_collections() {
    let json = r#"{
        "version": "1",
        "deployedAt": "2026-01-01T00:00:00Z",
        "migrations": null,
        "resources": {
            "modules": {
                "orders-db": { "type": "storage.sqlite", "stateful": true, "config": null }
            },
            "pipelines": null
        }
    }"#;

    let state: DeploymentState = serde_json::from_str(json).expect("state");
    assert!(state.migrations.is_empty());
    assert!(state.resources.pipelines.is_empty());
    assert!(state.resources.modules["orders-db"].config.is_empty());
}
