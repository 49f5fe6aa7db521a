//! Configuration file loading for wfguard.
//!
//! Discovers and loads `wfguard.toml` from the project root. Every section is
//! optional; missing keys fall back to defaults.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "wfguard.toml";

/// Top-level configuration from wfguard.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WfguardConfig {
    pub state: StateConfig,
    pub contract: ContractConfig,
    pub policy: PolicyConfig,
}

/// Deployment-state section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Deployment-state file, relative to the project root.
    pub file: Option<Utf8PathBuf>,

    /// Namespace prefix for generated resource ids.
    pub namespace: String,

    /// Migrations recorded in new snapshots.
    pub migrations: Vec<String>,
}

/// Contract section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Previous release's contract to compare against.
    pub baseline: Option<Utf8PathBuf>,

    /// Where to write the freshly generated contract.
    pub output: Option<Utf8PathBuf>,
}

/// Policy section: which findings block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Block when a config diff has breaking changes.
    pub fail_on_breaking: bool,

    /// Block when the engine lacks a type the config uses.
    pub fail_on_incompatible: bool,
}

/// Discover the wfguard.toml config file.
///
/// Returns `None` if no config file is found.
pub fn discover_config(project_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a wfguard.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<WfguardConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<WfguardConfig> {
    let config: WfguardConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the project root, or return default if not found.
pub fn load_or_default(project_root: &Utf8Path) -> anyhow::Result<WfguardConfig> {
    match discover_config(project_root) {
        Some(path) => load_config(&path),
        None => Ok(WfguardConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").expect("parse");
        assert!(config.state.file.is_none());
        assert_eq!(config.state.namespace, "");
        assert!(config.contract.baseline.is_none());
        assert!(!config.policy.fail_on_breaking);
        assert!(!config.policy.fail_on_incompatible);
    }

    #[test]
    fn full_file_parses() {
        let config = parse_config(
            r#"
[state]
file = "deploy/state.json"
namespace = "prod"
migrations = ["001_init"]

[contract]
baseline = "contracts/v1.json"
output = "contracts/current.json"

[policy]
fail_on_breaking = true
fail_on_incompatible = true
"#,
        )
        .expect("parse");

        assert_eq!(config.state.file.as_deref(), Some(Utf8Path::new("deploy/state.json")));
        assert_eq!(config.state.namespace, "prod");
        assert_eq!(config.state.migrations, vec!["001_init".to_string()]);
        assert_eq!(
            config.contract.output.as_deref(),
            Some(Utf8Path::new("contracts/current.json"))
        );
        assert!(config.policy.fail_on_breaking);
        assert!(config.policy.fail_on_incompatible);
    }

    #[test]
    fn partial_sections_default_the_rest() {
        let config = parse_config("[policy]\nfail_on_breaking = true\n").expect("parse");
        assert!(config.policy.fail_on_breaking);
        assert!(!config.policy.fail_on_incompatible);
        assert!(config.state.migrations.is_empty());
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("[state\nfile = ").is_err());
    }

    #[test]
    fn load_or_default_without_file() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());
        let config = load_or_default(&root).expect("default");
        assert!(config.contract.baseline.is_none());
    }

    #[test]
    fn load_or_default_reads_file() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        std::fs::write(root.join(CONFIG_FILE_NAME), "[state]\nnamespace = \"staging\"\n")
            .expect("write");

        let config = load_or_default(&root).expect("load");
        assert_eq!(config.state.namespace, "staging");
    }
}
