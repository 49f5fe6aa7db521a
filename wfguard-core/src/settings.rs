//! Clap-free settings for the analysis pipelines.

use crate::config::WfguardConfig;
use camino::{Utf8Path, Utf8PathBuf};

/// Default location of the deployment-state file written by `run_snapshot`.
pub const DEFAULT_STATE_FILE: &str = ".wfguard/deploy-state.json";

/// Settings shared by all pipelines.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub project_root: Utf8PathBuf,

    // State
    pub state_file: Option<Utf8PathBuf>,
    pub namespace: String,
    pub migrations: Vec<String>,

    // Contract
    pub contract_baseline: Option<Utf8PathBuf>,
    pub contract_output: Option<Utf8PathBuf>,

    // Policy
    pub fail_on_breaking: bool,
    pub fail_on_incompatible: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            project_root: Utf8PathBuf::from("."),
            state_file: None,
            namespace: String::new(),
            migrations: Vec::new(),
            contract_baseline: None,
            contract_output: None,
            fail_on_breaking: false,
            fail_on_incompatible: false,
        }
    }
}

/// Caller-supplied values that win over `wfguard.toml`.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub state_file: Option<Utf8PathBuf>,
    pub namespace: Option<String>,
    /// Appended to the configured migrations, skipping duplicates.
    pub migrations: Vec<String>,
    pub contract_baseline: Option<Utf8PathBuf>,
    pub contract_output: Option<Utf8PathBuf>,
    pub fail_on_breaking: Option<bool>,
    pub fail_on_incompatible: Option<bool>,
}

impl AnalysisSettings {
    /// Settings from a loaded config file. Relative paths resolve against `project_root`.
    pub fn from_config(project_root: &Utf8Path, config: &WfguardConfig) -> Self {
        let resolve = |p: &Option<Utf8PathBuf>| p.as_deref().map(|p| resolve_path(project_root, p));
        Self {
            project_root: project_root.to_path_buf(),
            state_file: resolve(&config.state.file),
            namespace: config.state.namespace.clone(),
            migrations: config.state.migrations.clone(),
            contract_baseline: resolve(&config.contract.baseline),
            contract_output: resolve(&config.contract.output),
            fail_on_breaking: config.policy.fail_on_breaking,
            fail_on_incompatible: config.policy.fail_on_incompatible,
        }
    }

    /// Apply explicit overrides; paths are taken as given.
    pub fn with_overrides(mut self, overrides: SettingsOverrides) -> Self {
        if let Some(file) = overrides.state_file {
            self.state_file = Some(file);
        }
        if let Some(namespace) = overrides.namespace {
            self.namespace = namespace;
        }
        for migration in overrides.migrations {
            if !self.migrations.contains(&migration) {
                self.migrations.push(migration);
            }
        }
        if let Some(baseline) = overrides.contract_baseline {
            self.contract_baseline = Some(baseline);
        }
        if let Some(output) = overrides.contract_output {
            self.contract_output = Some(output);
        }
        if let Some(v) = overrides.fail_on_breaking {
            self.fail_on_breaking = v;
        }
        if let Some(v) = overrides.fail_on_incompatible {
            self.fail_on_incompatible = v;
        }
        self
    }

    /// State file to write snapshots to.
    pub fn snapshot_path(&self) -> Utf8PathBuf {
        self.state_file
            .clone()
            .unwrap_or_else(|| self.project_root.join(DEFAULT_STATE_FILE))
    }
}

fn resolve_path(root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
