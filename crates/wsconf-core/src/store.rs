//! Persistence of profile records under the workspace metadata directory
//!
//! Layout:
//!
//! ```text
//! <root>/.wsconf/
//!   profiles/
//!     profiles.toml          # active = "<name>"
//!     <profile>/config.toml  # ProfileRecord
//! ```

use serde::{Deserialize, Serialize};
use std::fs;

use wsconf_fs::{DocumentStore, NormalizedPath, WorkspacePath, io};

use crate::record::{DEFAULT_PROFILE, ProfileRecord};
use crate::{Error, Result};

#[derive(Debug, Default, Serialize, Deserialize)]
struct ProfilesIndex {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active: Option<String>,
}

/// Reject names that could escape the profiles directory.
pub fn validate_profile_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("profile name is empty")
    } else if name == "." || name == ".." {
        Some("profile name cannot be a relative directory")
    } else if name.contains(['/', '\\']) {
        Some("profile name cannot contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidProfile {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// Reads and writes the per-profile records of one workspace.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: NormalizedPath,
    documents: DocumentStore,
}

impl ConfigStore {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            documents: DocumentStore::new(),
        }
    }

    pub fn metadata_dir(&self) -> NormalizedPath {
        self.root.join(WorkspacePath::MetadataDir.as_str())
    }

    fn profiles_dir(&self) -> NormalizedPath {
        self.metadata_dir().join(WorkspacePath::ProfilesDir.as_str())
    }

    fn index_path(&self) -> NormalizedPath {
        self.profiles_dir().join(WorkspacePath::ProfilesIndex.as_str())
    }

    /// Path of the record file written for `profile`.
    pub fn record_path(&self, profile: &str) -> NormalizedPath {
        self.profiles_dir()
            .join(profile)
            .join(WorkspacePath::ProfileConfig.as_str())
    }

    fn legacy_record_path(&self, profile: &str) -> NormalizedPath {
        self.profiles_dir()
            .join(profile)
            .join(WorkspacePath::LegacyProfileConfig.as_str())
    }

    /// Whether the metadata marker is present (workspace initialized).
    pub fn exists(&self) -> bool {
        self.metadata_dir().is_dir()
    }

    /// Load the record of `profile`. A missing record is `Ok(None)`.
    pub fn load(&self, profile: &str) -> Result<Option<ProfileRecord>> {
        validate_profile_name(profile)?;

        let path = self.record_path(profile);
        let path = if path.is_file() {
            path
        } else {
            let legacy = self.legacy_record_path(profile);
            if !legacy.is_file() {
                tracing::debug!(profile, root = %self.root, "No record for profile");
                return Ok(None);
            }
            tracing::debug!(profile, path = %legacy, "Reading legacy YAML record");
            legacy
        };

        self.documents
            .load::<ProfileRecord>(&path)
            .map(Some)
            .map_err(|e| Error::CorruptRecord {
                profile: profile.to_string(),
                path: path.to_native(),
                message: e.to_string(),
            })
    }

    /// Persist `record` for `profile` atomically.
    ///
    /// On failure the previous record (if any) is unchanged.
    pub fn save(&self, profile: &str, record: &ProfileRecord) -> Result<()> {
        validate_profile_name(profile)?;

        let path = self.record_path(profile);
        self.documents
            .save(&path, record)
            .map_err(|source| Error::PersistFailed {
                profile: profile.to_string(),
                path: path.to_native(),
                source,
            })?;
        tracing::info!(profile, path = %path, "Saved profile record");
        Ok(())
    }

    /// Names of all profiles that have a record, sorted.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let dir = self.profiles_dir();
        let entries = match fs::read_dir(dir.to_native()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(wsconf_fs::Error::io(dir.to_native(), e).into()),
        };

        let mut profiles: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| {
                self.record_path(name).is_file() || self.legacy_record_path(name).is_file()
            })
            .collect();
        profiles.sort();
        Ok(profiles)
    }

    /// Profile used when the caller does not name one.
    pub fn active_profile(&self) -> Result<String> {
        let path = self.index_path();
        let index: Option<ProfilesIndex> =
            self.documents
                .load_optional(&path)
                .map_err(|e| Error::CorruptRecord {
                    profile: WorkspacePath::ProfilesIndex.to_string(),
                    path: path.to_native(),
                    message: e.to_string(),
                })?;

        Ok(index
            .and_then(|index| index.active)
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string()))
    }

    /// Whether an active profile has been recorded explicitly.
    pub fn has_active_profile(&self) -> bool {
        self.index_path().is_file()
    }

    pub fn set_active_profile(&self, profile: &str) -> Result<()> {
        validate_profile_name(profile)?;

        let path = self.index_path();
        let index = ProfilesIndex {
            active: Some(profile.to_string()),
        };
        self.documents
            .save(&path, &index)
            .map_err(|source| Error::PersistFailed {
                profile: profile.to_string(),
                path: path.to_native(),
                source,
            })?;
        tracing::info!(profile, "Active profile changed");
        Ok(())
    }

    /// Delete a profile's record.
    ///
    /// When the removed profile was active, the first remaining profile
    /// becomes active; with none left the active marker is dropped.
    pub fn remove_profile(&self, profile: &str) -> Result<()> {
        validate_profile_name(profile)?;

        let profiles = self.list_profiles()?;
        if !profiles.iter().any(|p| p == profile) {
            return Err(Error::InvalidProfile {
                name: profile.to_string(),
                reason: "no such profile".to_string(),
            });
        }

        let was_active = self.active_profile()? == profile;
        io::remove_dir_all(&self.profiles_dir().join(profile))?;
        tracing::info!(profile, "Removed profile");

        if was_active {
            match profiles.iter().find(|p| p.as_str() != profile) {
                Some(next) => self.set_active_profile(next)?,
                None => {
                    let index = self.index_path();
                    if index.is_file() {
                        fs::remove_file(index.to_native())
                            .map_err(|e| wsconf_fs::Error::io(index.to_native(), e))?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_names_with_separators_are_rejected() {
        for name in ["", ".", "..", "a/b", "a\\b"] {
            let err = validate_profile_name(name).unwrap_err();
            assert_eq!(err.kind(), "invalid-profile", "name {name:?}");
        }
        validate_profile_name("release").unwrap();
    }
}
