//! Port traits abstracting config loading away from the pipelines.

use camino::Utf8Path;
use wfguard_types::config::WorkflowConfig;

/// Source of parsed workflow configs.
pub trait ConfigSource {
    fn load_config(&self, path: &Utf8Path) -> anyhow::Result<WorkflowConfig>;
}
