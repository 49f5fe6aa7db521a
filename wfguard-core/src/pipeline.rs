//! Diff, contract, compatibility, and snapshot pipelines.
//!
//! Configs are read through [`ConfigSource`]; state and contract files go
//! through `wfguard-state`. Findings never fail a pipeline on their own. Each
//! outcome records whether policy blocks it, and [`Outcome::enforce`] turns
//! that into [`ToolError::PolicyBlock`].

use crate::ports::ConfigSource;
use crate::settings::AnalysisSettings;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};
use wfguard_domain::{check_compatibility, compare_contracts, diff_configs, generate_contract};
use wfguard_registry::TypeRegistry;
use wfguard_state::{StateInput, build_state_from_config, load_contract, load_state};
use wfguard_types::compat::CompatCheckResult;
use wfguard_types::contract::{Contract, ContractComparison};
use wfguard_types::diff::DiffResult;
use wfguard_types::state::DeploymentState;

/// Error type for pipeline results. Exit code 2 = policy block, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("policy block: {message}")]
    PolicyBlock { message: String },
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolError::PolicyBlock { .. } => 2,
            ToolError::Internal(_) => 1,
        }
    }
}

/// Shared policy surface of pipeline outcomes.
pub trait Outcome: Sized {
    /// Why policy blocks this outcome, if it does.
    fn policy_block(&self) -> Option<&str>;

    /// Return `self`, or `PolicyBlock` when policy blocks it.
    fn enforce(self) -> Result<Self, ToolError> {
        match self.policy_block() {
            Some(message) => Err(ToolError::PolicyBlock {
                message: message.to_string(),
            }),
            None => Ok(self),
        }
    }
}

/// Outcome of `run_diff`.
#[derive(Debug, Clone)]
pub struct DiffOutcome {
    pub result: DiffResult,
    pub policy_block: Option<String>,
}

impl Outcome for DiffOutcome {
    fn policy_block(&self) -> Option<&str> {
        self.policy_block.as_deref()
    }
}

/// Outcome of `run_contract`.
#[derive(Debug, Clone)]
pub struct ContractOutcome {
    pub contract: Contract,
    /// Present when a baseline was configured.
    pub comparison: Option<ContractComparison>,
    /// Where the contract was written, when an output was configured.
    pub written_to: Option<Utf8PathBuf>,
    pub policy_block: Option<String>,
}

impl Outcome for ContractOutcome {
    fn policy_block(&self) -> Option<&str> {
        self.policy_block.as_deref()
    }
}

/// Outcome of `run_compat`.
#[derive(Debug, Clone)]
pub struct CompatOutcome {
    pub result: CompatCheckResult,
    pub policy_block: Option<String>,
}

impl Outcome for CompatOutcome {
    fn policy_block(&self) -> Option<&str> {
        self.policy_block.as_deref()
    }
}

/// Outcome of `run_snapshot`.
#[derive(Debug, Clone)]
pub struct SnapshotOutcome {
    pub state: DeploymentState,
    pub written_to: Utf8PathBuf,
}

/// Diff two configs, correlating resource ids from the state file when one is configured.
pub fn run_diff(
    settings: &AnalysisSettings,
    source: &dyn ConfigSource,
    old_path: &Utf8Path,
    new_path: &Utf8Path,
) -> Result<DiffOutcome, ToolError> {
    let old = source
        .load_config(old_path)
        .with_context(|| format!("load old config {}", old_path))?;
    let new = source
        .load_config(new_path)
        .with_context(|| format!("load new config {}", new_path))?;

    let state = match &settings.state_file {
        Some(path) => {
            Some(load_state(path).with_context(|| format!("load state file {}", path))?)
        }
        None => None,
    };

    let mut result = diff_configs(&old, &new, state.as_ref());
    result.old_config = old_path.to_string();
    result.new_config = new_path.to_string();

    let breaking = result.breaking_changes.len();
    info!(
        changes = result.change_count(),
        breaking, "config diff complete"
    );

    let policy_block = (settings.fail_on_breaking && breaking > 0)
        .then(|| format!("{breaking} module(s) with breaking changes"));

    Ok(DiffOutcome {
        result,
        policy_block,
    })
}

/// Generate a contract, optionally write it, and compare it to the baseline.
pub fn run_contract(
    settings: &AnalysisSettings,
    source: &dyn ConfigSource,
    registry: &TypeRegistry,
    config_path: &Utf8Path,
) -> Result<ContractOutcome, ToolError> {
    let config = source
        .load_config(config_path)
        .with_context(|| format!("load config {}", config_path))?;

    let contract = generate_contract(&config, registry);

    let written_to = match &settings.contract_output {
        Some(path) => {
            wfguard_state::save_contract(&contract, path)
                .with_context(|| format!("write contract {}", path))?;
            debug!(path = %path, "contract written");
            Some(path.clone())
        }
        None => None,
    };

    let comparison = match &settings.contract_baseline {
        Some(path) => {
            let baseline =
                load_contract(path).with_context(|| format!("load baseline contract {}", path))?;
            Some(compare_contracts(&baseline, &contract))
        }
        None => None,
    };

    let policy_block = comparison
        .as_ref()
        .filter(|c| c.breaking_count > 0)
        .map(|c| format!("{} breaking API change(s) against baseline", c.breaking_count));

    info!(
        endpoints = contract.endpoints.len(),
        compared = comparison.is_some(),
        "contract generated"
    );

    Ok(ContractOutcome {
        contract,
        comparison,
        written_to,
        policy_block,
    })
}

/// Check a config's types against an engine registry.
pub fn run_compat(
    settings: &AnalysisSettings,
    source: &dyn ConfigSource,
    registry: &TypeRegistry,
    config_path: &Utf8Path,
) -> Result<CompatOutcome, ToolError> {
    let config = source
        .load_config(config_path)
        .with_context(|| format!("load config {}", config_path))?;

    let result = check_compatibility(&config, registry);
    info!(
        engine_version = %result.engine_version,
        compatible = result.compatible,
        issues = result.issues.len(),
        "compatibility check complete"
    );

    let policy_block = (settings.fail_on_incompatible && !result.compatible).then(|| {
        format!(
            "{} type(s) unavailable in engine {}",
            result.issues.len(),
            result.engine_version
        )
    });

    Ok(CompatOutcome {
        result,
        policy_block,
    })
}

/// Snapshot a config as deployed and write the state file.
pub fn run_snapshot(
    settings: &AnalysisSettings,
    source: &dyn ConfigSource,
    config_path: &Utf8Path,
) -> Result<SnapshotOutcome, ToolError> {
    let config = source
        .load_config(config_path)
        .with_context(|| format!("load config {}", config_path))?;

    let input = StateInput {
        config_file: Some(config_path.to_path_buf()),
        namespace: settings.namespace.clone(),
        migrations: settings.migrations.clone(),
    };
    let state = build_state_from_config(&config, &input);

    let path = settings.snapshot_path();
    wfguard_state::save_state(&state, &path)
        .with_context(|| format!("write state file {}", path))?;
    info!(path = %path, modules = state.resources.modules.len(), "deployment state saved");

    Ok(SnapshotOutcome {
        state,
        written_to: path,
    })
}
