//! Constants and enums for workspace metadata paths.

use std::path::Path;

/// Standard workspace metadata markers and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspacePath {
    /// The `.wsconf` directory (workspace metadata marker)
    MetadataDir,
    /// The `profiles` directory inside the metadata directory
    ProfilesDir,
    /// The per-profile record file
    ProfileConfig,
    /// Per-profile record written by older tooling
    LegacyProfileConfig,
    /// The profile index holding the active profile name
    ProfilesIndex,
}

impl WorkspacePath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MetadataDir => ".wsconf",
            Self::ProfilesDir => "profiles",
            Self::ProfileConfig => "config.toml",
            Self::LegacyProfileConfig => "config.yaml",
            Self::ProfilesIndex => "profiles.toml",
        }
    }
}

impl AsRef<Path> for WorkspacePath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for WorkspacePath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for WorkspacePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
