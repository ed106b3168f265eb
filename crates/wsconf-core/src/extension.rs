//! Extension chain resolution
//!
//! A workspace may extend the result space of another workspace, which may in
//! turn extend a third one. The chain is followed iteratively, nearest prefix
//! first, until a prefix is reached that does not belong to a workspace or
//! whose workspace does not extend anything.

use std::collections::HashSet;

use wsconf_fs::{NormalizedPath, canonicalize_or_clean};

use crate::locator::WorkspaceLocator;
use crate::record::{ExtendPath, ProfileRecord};
use crate::space::{Space, SpaceResolver};
use crate::store::ConfigStore;
use crate::{Error, Result};

/// Walks workspace extension chains.
pub struct ExtensionChainResolver;

impl ExtensionChainResolver {
    /// Resolve the prefixes extended by the workspace at `origin_root`.
    ///
    /// Unset and cleared extensions both yield an empty chain. Relative
    /// extend paths are taken from the root of the workspace that declares
    /// them.
    pub fn resolve(
        extend: Option<&ExtendPath>,
        origin_root: &NormalizedPath,
    ) -> Result<Vec<NormalizedPath>> {
        let Some(start) = extend.and_then(ExtendPath::as_path) else {
            return Ok(Vec::new());
        };

        let mut chain: Vec<NormalizedPath> = Vec::new();
        let mut visited: HashSet<NormalizedPath> = HashSet::new();
        visited.insert(origin_root.clone());

        let mut next = NormalizedPath::new(start).absolutize(origin_root);
        loop {
            if !next.exists() {
                return Err(Error::BrokenExtension {
                    path: next.to_native(),
                    reason: "path does not exist".to_string(),
                });
            }
            let prefix = canonicalize_or_clean(&next.to_native());
            tracing::debug!(prefix = %prefix, depth = chain.len(), "Extending prefix");
            chain.push(prefix.clone());

            let Some(owner) = WorkspaceLocator::find_marker(&prefix) else {
                break;
            };
            let record = Self::active_record(&owner)?;
            if !Self::is_result_space(&owner, &record, &prefix) {
                // a plain directory that merely sits under some workspace
                break;
            }
            if !visited.insert(owner.clone()) {
                return Err(Error::CyclicExtension {
                    path: owner.to_native(),
                });
            }

            match record.extend_path {
                Some(ExtendPath::Path(path)) => {
                    next = NormalizedPath::new(&path).absolutize(&owner);
                }
                _ => break,
            }
        }

        Ok(chain)
    }

    fn active_record(owner: &NormalizedPath) -> Result<ProfileRecord> {
        let broken = |e: Error| Error::BrokenExtension {
            path: owner.to_native(),
            reason: e.to_string(),
        };
        let store = ConfigStore::new(owner.clone());
        let profile = store.active_profile().map_err(broken)?;
        let record = store.load(&profile).map_err(broken)?;
        Ok(record.unwrap_or_default())
    }

    fn is_result_space(
        owner: &NormalizedPath,
        record: &ProfileRecord,
        prefix: &NormalizedPath,
    ) -> bool {
        let resolver = SpaceResolver::new(owner, record.space_suffix.as_deref().unwrap_or(""));
        [
            resolver.resolve(Space::Devel, record.devel_space.as_deref()),
            resolver.resolve(Space::Install, record.install_space.as_deref()),
        ]
        .iter()
        .any(|space| prefix.starts_with(space))
    }
}
