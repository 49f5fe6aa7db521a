use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use wfguard_types::contract::Contract;
use wfguard_types::state::DeploymentState;

#[derive(Debug, Error)]
pub enum StateError {
    /// `fs_err` already names the path in `source`.
    #[error("io error: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error in {path}: {source}")]
    Json {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn save_state(state: &DeploymentState, path: &Utf8Path) -> Result<(), StateError> {
    write_json(state, path)
}

pub fn load_state(path: &Utf8Path) -> Result<DeploymentState, StateError> {
    read_json(path)
}

pub fn save_contract(contract: &Contract, path: &Utf8Path) -> Result<(), StateError> {
    write_json(contract, path)
}

pub fn load_contract(path: &Utf8Path) -> Result<Contract, StateError> {
    read_json(path)
}

fn write_json<T: Serialize>(value: &T, path: &Utf8Path) -> Result<(), StateError> {
    let mut json = serde_json::to_string_pretty(value).map_err(|source| StateError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_str().is_empty()) {
        fs::create_dir_all(parent.as_std_path()).map_err(|source| StateError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path.as_std_path(), json).map_err(|source| StateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path, "wrote json file");
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, StateError> {
    let text = fs::read_to_string(path.as_std_path()).map_err(|source| StateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| StateError::Json {
        path: path.to_path_buf(),
        source,
    })
}
