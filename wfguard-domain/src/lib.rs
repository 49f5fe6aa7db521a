//! Domain logic: turn workflow config snapshots into deterministic analysis results.
//!
//! This crate owns *what* changed and whether it is risky. It does no I/O;
//! reading and writing state and contract files lives in `wfguard-state`, and
//! policy decisions live in `wfguard-core`.

mod classify;
mod compat;
mod contract;
mod diff;
mod value;

pub use classify::{
    classify_module, detect_breaking_changes, generate_resource_id, is_stateful, sensitive_keys,
};
pub use compat::check_compatibility;
pub use contract::{CONTRACT_HASH_LEN, compare_contracts, generate_contract, generate_contract_at};
pub use diff::{
    count_steps, describe_pipeline_trigger, diff_configs, diff_module, diff_pipeline,
    is_config_changed,
};

/// Best-effort trigger fields of a raw pipeline tree: `(type, path, method)`.
///
/// Missing or mistyped fields come back as empty strings.
pub fn pipeline_trigger_fields(pipeline: &serde_json::Value) -> (String, String, String) {
    let trigger = value::trigger_of(pipeline);
    let cfg = value::trigger_config(pipeline);
    (
        owned_str(trigger, "type"),
        owned_str(cfg, "path"),
        owned_str(cfg, "method"),
    )
}

fn owned_str(map: Option<&serde_json::Map<String, serde_json::Value>>, key: &str) -> String {
    map.and_then(|m| value::str_at(m, key))
        .unwrap_or_default()
        .to_string()
}
