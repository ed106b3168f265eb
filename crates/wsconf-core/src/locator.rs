//! Workspace discovery by walking up from a start directory

use std::path::Path;

use wsconf_fs::{NormalizedPath, WorkspacePath, canonicalize_or_clean};

use crate::record::ProfileRecord;
use crate::space::{Space, SpaceResolver};
use crate::store::ConfigStore;
use crate::{Error, Result};

/// Finds the workspace that encloses a directory.
pub struct WorkspaceLocator;

impl WorkspaceLocator {
    /// Nearest ancestor of `start` (inclusive) holding the metadata marker.
    ///
    /// No validation beyond the marker check.
    pub fn find_marker(start: &NormalizedPath) -> Option<NormalizedPath> {
        let mut current = Some(start.clone());
        while let Some(dir) = current {
            if dir.join(WorkspacePath::MetadataDir.as_str()).is_dir() {
                return Some(dir);
            }
            current = dir.parent();
        }
        None
    }

    /// Locate the workspace enclosing `start_dir`.
    ///
    /// Returns `Ok(None)` when no marker exists up to the filesystem root.
    /// Fails with `nested-workspace` when `start_dir` sits inside the build
    /// or devel space of the workspace that was found. Spaces configured at
    /// or above the root itself are not considered.
    pub fn locate(start_dir: &Path) -> Result<Option<NormalizedPath>> {
        let start = canonicalize_or_clean(start_dir);
        let Some(root) = Self::find_marker(&start) else {
            tracing::debug!(start = %start, "No workspace marker found");
            return Ok(None);
        };
        tracing::debug!(start = %start, root = %root, "Found workspace marker");

        let store = ConfigStore::new(root.clone());
        let mut records = Vec::new();
        for profile in store.list_profiles()? {
            if let Some(record) = store.load(&profile)? {
                records.push(record);
            }
        }
        if records.is_empty() {
            records.push(ProfileRecord::default());
        }

        for record in &records {
            let resolver = SpaceResolver::new(&root, record.space_suffix.as_deref().unwrap_or(""));
            let generated = [
                resolver.resolve(Space::Build, record.build_space.as_deref()),
                resolver.resolve(Space::Devel, record.devel_space.as_deref()),
            ];
            // a space at or above the root cannot hold a nested workspace
            let nested = generated
                .iter()
                .filter(|space| !root.starts_with(space))
                .find(|space| start.starts_with(space));
            if let Some(space) = nested {
                tracing::warn!(start = %start, space = %space, "Start directory is generated output");
                return Err(Error::NestedWorkspace {
                    path: start.to_native(),
                    workspace: root.to_native(),
                });
            }
        }

        Ok(Some(root))
    }
}
