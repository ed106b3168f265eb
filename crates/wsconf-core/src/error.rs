//! Error types for wsconf-core

use std::path::{Path, PathBuf};

/// Result type for wsconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or persisting a workspace configuration.
///
/// Every variant is terminal for the current invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The start directory lies inside a build or devel space of an enclosing workspace
    #[error(
        "nested-workspace: {path} is inside the build or devel space of workspace {workspace}"
    )]
    NestedWorkspace { path: PathBuf, workspace: PathBuf },

    /// A persisted profile record could not be read or parsed
    #[error("corrupt-record: profile '{profile}' at {path}: {message}")]
    CorruptRecord {
        profile: String,
        path: PathBuf,
        message: String,
    },

    /// An extended workspace or prefix is missing or unreadable
    #[error("broken-extension: cannot extend {path}: {reason}")]
    BrokenExtension { path: PathBuf, reason: String },

    /// The extension chain leads back to a workspace already in the chain
    #[error("cyclic-extension: workspace {path} appears twice in the extension chain")]
    CyclicExtension { path: PathBuf },

    /// Writing a record failed; any prior record is left untouched
    #[error("persist-failed: could not write profile '{profile}' to {path}: {source}")]
    PersistFailed {
        profile: String,
        path: PathBuf,
        #[source]
        source: wsconf_fs::Error,
    },

    /// Profile name is malformed or does not exist
    #[error("invalid-profile: '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    /// Filesystem error from wsconf-fs
    #[error(transparent)]
    Fs(#[from] wsconf_fs::Error),
}

impl Error {
    /// Stable slug naming the error family, e.g. `cyclic-extension`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NestedWorkspace { .. } => "nested-workspace",
            Self::CorruptRecord { .. } => "corrupt-record",
            Self::BrokenExtension { .. } => "broken-extension",
            Self::CyclicExtension { .. } => "cyclic-extension",
            Self::PersistFailed { .. } => "persist-failed",
            Self::InvalidProfile { .. } => "invalid-profile",
            Self::Fs(_) => "io",
        }
    }

    /// The offending path, when the error has one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NestedWorkspace { path, .. }
            | Self::CorruptRecord { path, .. }
            | Self::BrokenExtension { path, .. }
            | Self::CyclicExtension { path }
            | Self::PersistFailed { path, .. } => Some(path),
            Self::InvalidProfile { .. } => None,
            Self::Fs(e) => e.path().map(PathBuf::as_path),
        }
    }
}
