//! Loading contract interfaces from build artifacts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use alloy::json_abi::JsonAbi;
use serde::Deserialize;
use thiserror::Error;

use crate::contracts::ContractKind;

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_BUILD_DIR: &str = "build/contracts";

/// Errors raised while reading build artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no ABI loaded for {0}")]
    Missing(ContractKind),
}

/// Only the `abi` field of a truffle artifact is used.
#[derive(Debug, Deserialize)]
struct Artifact {
    abi: JsonAbi,
}

/// ABI of every contract kind, held for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct InterfaceSet {
    abis: HashMap<ContractKind, JsonAbi>,
}

impl InterfaceSet {
    /// Read all seven artifacts from `build_dir`; any absent or malformed file
    /// fails the whole load.
    pub fn load(build_dir: &Path) -> Result<Self, ArtifactError> {
        let mut abis = HashMap::new();
        for kind in ContractKind::INIT_ORDER {
            let abi = load_artifact(&build_dir.join(kind.artifact_file()))?;
            tracing::debug!(contract = %kind, functions = abi.functions.len(), "Loaded ABI");
            abis.insert(kind, abi);
        }
        Ok(Self { abis })
    }

    /// Register an ABI directly.
    pub fn insert(&mut self, kind: ContractKind, abi: JsonAbi) {
        self.abis.insert(kind, abi);
    }

    pub fn get(&self, kind: ContractKind) -> Result<&JsonAbi, ArtifactError> {
        self.abis.get(&kind).ok_or(ArtifactError::Missing(kind))
    }
}

fn load_artifact(path: &Path) -> Result<JsonAbi, ArtifactError> {
    let content = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: Artifact =
        serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(artifact.abi)
}
