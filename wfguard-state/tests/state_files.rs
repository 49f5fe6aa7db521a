use camino::Utf8PathBuf;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;
use wfguard_state::{
    StateError, StateInput, build_state_from_config, load_contract, load_state, save_contract,
    save_state,
};
use wfguard_types::config::WorkflowConfig;
use wfguard_types::contract::{Contract, EndpointContract};

fn temp_root() -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
    (temp, root)
}

fn sample_config() -> WorkflowConfig {
    serde_json::from_value(json!({
        "modules": [
            { "name": "orders-db", "type": "storage.sqlite", "config": { "dbPath": "/data/orders.db", "walMode": true } },
            { "name": "event-broker", "type": "messaging.broker" },
            { "name": "api", "type": "http.server", "config": { "address": ":8080" } }
        ],
        "pipelines": {
            "create-order": {
                "trigger": { "type": "http", "config": { "method": "POST", "path": "/api/v1/orders" } },
                "steps": [ { "type": "step.db_exec" } ]
            }
        }
    }))
    .expect("config")
}

#[test]
fn save_then_load_round_trips() {
    let (_temp, root) = temp_root();
    let config_path = root.join("app.yaml");
    std::fs::write(&config_path, "modules: []\n").expect("write config");

    let input = StateInput {
        config_file: Some(config_path.clone()),
        namespace: "prod".to_string(),
        migrations: vec!["001_init".to_string(), "002_orders".to_string()],
    };
    let state = build_state_from_config(&sample_config(), &input);

    let state_path = root.join("nested/dir/state.json");
    save_state(&state, &state_path).expect("save");
    let loaded = load_state(&state_path).expect("load");

    assert_eq!(loaded, state);
    assert_eq!(loaded.config_file, config_path.as_str());
    assert_eq!(
        loaded.resources.modules["event-broker"].resource_id,
        "broker/prod-event-broker"
    );
}

#[test]
fn config_hash_is_tagged_sha256_of_file() {
    let (_temp, root) = temp_root();
    let config_path = root.join("app.yaml");
    std::fs::write(&config_path, "").expect("write config");

    let input = StateInput {
        config_file: Some(config_path),
        ..StateInput::default()
    };
    let state = build_state_from_config(&WorkflowConfig::default(), &input);

    assert_eq!(
        state.config_hash,
        "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn missing_config_file_leaves_hash_empty() {
    let (_temp, root) = temp_root();
    let input = StateInput {
        config_file: Some(root.join("does-not-exist.yaml")),
        ..StateInput::default()
    };

    let state = build_state_from_config(&sample_config(), &input);
    assert_eq!(state.config_hash, "");
    assert_eq!(state.resources.modules.len(), 3);
}

#[test]
fn snapshot_does_not_alias_caller_config() {
    let mut cfg = sample_config();
    let state = build_state_from_config(&cfg, &StateInput::default());

    cfg.modules[0]
        .config
        .insert("dbPath".to_string(), json!("/elsewhere.db"));
    cfg.modules[0].config.remove("walMode");

    let stored = &state.resources.modules["orders-db"].config;
    assert_eq!(stored["dbPath"], json!("/data/orders.db"));
    assert_eq!(stored["walMode"], json!(true));
}

#[test]
fn load_missing_state_is_io_error() {
    let (_temp, root) = temp_root();
    let path = root.join("absent.json");

    let err = load_state(&path).expect_err("missing file");
    assert!(matches!(err, StateError::Io { ref path, .. } if path.ends_with("absent.json")));
    assert_eq!(err.to_string().matches("absent.json").count(), 1);
}

#[test]
fn load_malformed_state_is_json_error() {
    let (_temp, root) = temp_root();
    let path = root.join("state.json");
    std::fs::write(&path, "{ not json").expect("write");

    let err = load_state(&path).expect_err("malformed");
    assert!(matches!(err, StateError::Json { .. }));
}

#[test]
fn contract_file_round_trips() {
    let (_temp, root) = temp_root();
    let mut contract = Contract::new("0123456789abcdef".to_string(), "2026-01-01T00:00:00Z".to_string());
    contract.endpoints.push(EndpointContract {
        method: "GET".to_string(),
        path: "/items".to_string(),
        auth_required: true,
        pipeline: "list-items".to_string(),
    });
    contract.steps.push("step.auth_required".to_string());

    let path = root.join("contract.json");
    save_contract(&contract, &path).expect("save");
    assert_eq!(load_contract(&path).expect("load"), contract);
}
