//! Recoverable validation errors.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An import that cannot be satisfied by the registry.
///
/// These are collected across a whole registry and reported together.
/// `Display` yields the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// The imported module is neither analysed nor whitelisted.
    #[error("Cannot find module \"{from}\"")]
    UnresolvedModule {
        module: String,
        file_path: PathBuf,
        from: String,
    },

    /// The module exists but does not export the requested name.
    #[error("Cannot find \"{export}\" export for \"{from}\"")]
    UnresolvedExport {
        module: String,
        file_path: PathBuf,
        export: String,
        from: String,
    },
}

impl ValidationError {
    /// Name of the importing module.
    pub fn module(&self) -> &str {
        match self {
            Self::UnresolvedModule { module, .. } | Self::UnresolvedExport { module, .. } => module,
        }
    }

    /// File of the importing module.
    pub fn file_path(&self) -> &Path {
        match self {
            Self::UnresolvedModule { file_path, .. }
            | Self::UnresolvedExport { file_path, .. } => file_path,
        }
    }

    /// The referenced module name.
    pub fn target(&self) -> &str {
        match self {
            Self::UnresolvedModule { from, .. } | Self::UnresolvedExport { from, .. } => from,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
