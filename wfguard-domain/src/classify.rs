use crate::value::{describe, stringify};
use serde_json::Value;
use wfguard_types::config::ModuleDescriptor;
use wfguard_types::diff::BreakingChange;
use wfguard_types::resource::ResourceKind;

/// Map a module type to its infrastructure bucket. Unknown types are stateless.
pub fn classify_module(module_type: &str) -> ResourceKind {
    match module_type {
        "storage.sqlite" | "database.workflow" | "persistence.store" | "nosql.dynamodb"
        | "nosql.mongodb" | "eventstore.service" => ResourceKind::Database,
        "messaging.broker" | "messaging.nats" | "messaging.kafka" => ResourceKind::Broker,
        "cache.redis" | "cache.modular" | "nosql.memory" => ResourceKind::Cache,
        "static.fileserver" | "storage.local" | "storage.artifact" => ResourceKind::Volume,
        _ => ResourceKind::Stateless,
    }
}

pub fn is_stateful(module_type: &str) -> bool {
    classify_module(module_type).is_stateful()
}

/// Config keys whose change on a stateful module points the module at different data.
pub fn sensitive_keys(module_type: &str) -> &'static [&'static str] {
    match module_type {
        "storage.sqlite" => &["dbPath", "path"],
        "database.workflow" => &["dsn", "driver", "host", "port", "database", "dbname"],
        "persistence.store" => &["database"],
        "messaging.kafka" => &["brokers", "topic"],
        "messaging.nats" => &["url"],
        "static.fileserver" => &["rootDir", "dir"],
        "storage.local" => &["rootDir"],
        _ => &[],
    }
}

/// Report changes between two snapshots of the same module that risk data loss.
///
/// A type change is reported alone. Config edits only count for stateful
/// types with a sensitive key list.
pub fn detect_breaking_changes(
    old: Option<&ModuleDescriptor>,
    new: Option<&ModuleDescriptor>,
) -> Vec<BreakingChange> {
    let (Some(old), Some(new)) = (old, new) else {
        return vec![];
    };

    if old.module_type != new.module_type {
        return vec![BreakingChange {
            field: "type".to_string(),
            old_value: Value::String(old.module_type.clone()),
            new_value: Value::String(new.module_type.clone()),
            message: format!(
                "module type changed from {} to {}",
                old.module_type, new.module_type
            ),
        }];
    }

    if !is_stateful(&old.module_type) {
        return vec![];
    }

    sensitive_keys(&old.module_type)
        .iter()
        .filter_map(|key| {
            let old_value = old.config.get(*key);
            let new_value = new.config.get(*key);
            if stringify(old_value) == stringify(new_value) {
                return None;
            }
            let old_value = old_value.cloned().unwrap_or(Value::Null);
            let new_value = new_value.cloned().unwrap_or(Value::Null);
            Some(BreakingChange {
                field: key.to_string(),
                message: format!(
                    "{key} changed from {} to {}",
                    describe(&old_value),
                    describe(&new_value)
                ),
                old_value,
                new_value,
            })
        })
        .collect()
}

/// `<kind>/[<namespace>-]<name>`, stable across redeploys of the same module.
pub fn generate_resource_id(name: &str, module_type: &str, namespace: &str) -> String {
    let kind = classify_module(module_type);
    if namespace.is_empty() {
        format!("{kind}/{name}")
    } else {
        format!("{kind}/{namespace}-{name}")
    }
}
