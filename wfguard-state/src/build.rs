use camino::Utf8PathBuf;
use chrono::Utc;
use fs_err as fs;
use tracing::{debug, warn};
use wfguard_domain::{generate_resource_id, is_stateful, pipeline_trigger_fields};
use wfguard_types::config::WorkflowConfig;
use wfguard_types::schema::{DEPLOYMENT_STATE_SCHEMA_VERSION, DEPLOYMENT_STATE_VERSION};
use wfguard_types::state::{
    DeployedModuleState, DeployedPipelineState, DeployedResources, DeploymentState,
};

/// Deploy-time inputs that are not part of the config itself.
#[derive(Debug, Clone, Default)]
pub struct StateInput {
    /// Config file to fingerprint. `None` leaves the hash empty.
    pub config_file: Option<Utf8PathBuf>,
    /// Prefix for resource ids, e.g. `prod`.
    pub namespace: String,
    pub migrations: Vec<String>,
}

/// Snapshot `cfg` as it is being deployed.
///
/// Never fails: an unreadable config file only leaves `config_hash` empty.
/// Module configs are cloned, so later edits to `cfg` do not reach the snapshot.
pub fn build_state_from_config(cfg: &WorkflowConfig, input: &StateInput) -> DeploymentState {
    let config_hash = input
        .config_file
        .as_deref()
        .map(|path| match fs::read(path.as_std_path()) {
            Ok(bytes) => wfguard_hash::tagged_sha256(&bytes),
            Err(err) => {
                warn!(path = %path, error = %err, "could not hash config file");
                String::new()
            }
        })
        .unwrap_or_default();

    let mut resources = DeployedResources::default();

    for module in &cfg.modules {
        let stateful = is_stateful(&module.module_type);
        let resource_id = if stateful {
            generate_resource_id(&module.name, &module.module_type, &input.namespace)
        } else {
            String::new()
        };
        resources.modules.insert(
            module.name.clone(),
            DeployedModuleState {
                module_type: module.module_type.clone(),
                stateful,
                resource_id,
                config: module.config.clone(),
            },
        );
    }

    for (name, pipeline) in &cfg.pipelines {
        let (trigger, path, method) = pipeline_trigger_fields(pipeline);
        resources.pipelines.insert(
            name.clone(),
            DeployedPipelineState {
                trigger,
                path,
                method,
            },
        );
    }

    debug!(
        modules = resources.modules.len(),
        pipelines = resources.pipelines.len(),
        namespace = %input.namespace,
        "built deployment state"
    );

    DeploymentState {
        version: DEPLOYMENT_STATE_VERSION.to_string(),
        config_hash,
        deployed_at: Utc::now(),
        config_file: input
            .config_file
            .as_ref()
            .map(|p| p.to_string())
            .unwrap_or_default(),
        resources,
        schema_version: DEPLOYMENT_STATE_SCHEMA_VERSION,
        migrations: input.migrations.clone(),
    }
}
