//! Default config source implementations.

use crate::ports::ConfigSource;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::BTreeMap;
use tracing::debug;
use wfguard_types::config::WorkflowConfig;

/// Reads YAML (or JSON, which YAML accepts) workflow configs from disk.
#[derive(Debug, Clone, Default)]
pub struct FsConfigSource;

impl ConfigSource for FsConfigSource {
    fn load_config(&self, path: &Utf8Path) -> anyhow::Result<WorkflowConfig> {
        let text = fs::read_to_string(path).with_context(|| format!("read config {}", path))?;
        let config: WorkflowConfig =
            serde_yaml::from_str(&text).with_context(|| format!("parse config {}", path))?;
        debug!(
            path = %path,
            modules = config.modules.len(),
            pipelines = config.pipelines.len(),
            "loaded workflow config"
        );
        Ok(config)
    }
}

/// In-memory config source for embedding and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigSource {
    configs: BTreeMap<Utf8PathBuf, WorkflowConfig>,
}

impl InMemoryConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, path: impl Into<Utf8PathBuf>, config: WorkflowConfig) -> Self {
        self.configs.insert(path.into(), config);
        self
    }
}

impl ConfigSource for InMemoryConfigSource {
    fn load_config(&self, path: &Utf8Path) -> anyhow::Result<WorkflowConfig> {
        self.configs
            .get(path)
            .cloned()
            .with_context(|| format!("no config registered for {}", path))
    }
}
