//! Persisted profile record and the overrides bundle merged on top of it
//!
//! A [`ProfileRecord`] is partial: every field may be unset, meaning "use the
//! built-in default". It is what gets written to disk. [`Overrides`] carries
//! per-field presence so an omitted flag never clobbers a persisted value.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Profile used when none is named and none is marked active.
pub const DEFAULT_PROFILE: &str = "default";

/// Extension setting of a workspace.
///
/// Persisted as a string; the empty string is [`ExtendPath::Cleared`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExtendPath {
    /// Explicitly no extension, even if the environment carries a prefix path
    Cleared,
    /// Result space of another workspace (or any install prefix)
    Path(String),
}

impl ExtendPath {
    pub fn as_path(&self) -> Option<&str> {
        match self {
            Self::Cleared => None,
            Self::Path(path) => Some(path),
        }
    }
}

impl From<String> for ExtendPath {
    fn from(value: String) -> Self {
        if value.is_empty() {
            Self::Cleared
        } else {
            Self::Path(value)
        }
    }
}

impl From<ExtendPath> for String {
    fn from(value: ExtendPath) -> Self {
        match value {
            ExtendPath::Cleared => String::new(),
            ExtendPath::Path(path) => path,
        }
    }
}

/// Space override as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpaceOverride {
    /// Use this path (relative paths are taken from the workspace root)
    Explicit(String),
    /// Forget any persisted path and fall back to the default location
    Default,
}

/// Configuration snapshot persisted per profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devel_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_suffix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extend_path: Option<ExtendPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolate_devel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolate_install: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cmake_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make_args: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catkin_make_args: Option<Vec<String>>,
}

/// Per-invocation overrides. `None` means the flag was not given.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Directory to start the workspace search from (current directory if unset)
    pub workspace_hint: Option<PathBuf>,
    /// Profile to load and save (active profile if unset)
    pub profile: Option<String>,
    /// Persist even if the workspace is not initialized yet
    pub init: bool,
    /// Create the source space if it is missing
    pub mkdirs: bool,
    pub source_space: Option<SpaceOverride>,
    pub build_space: Option<SpaceOverride>,
    pub devel_space: Option<SpaceOverride>,
    pub install_space: Option<SpaceOverride>,
    pub space_suffix: Option<String>,
    pub extend_path: Option<ExtendPath>,
    pub isolate_devel: Option<bool>,
    pub isolate_install: Option<bool>,
    pub install: Option<bool>,
    pub cmake_args: Option<Vec<String>>,
    pub make_args: Option<Vec<String>>,
    pub catkin_make_args: Option<Vec<String>>,
    /// Prefix path inherited from the environment, reported when no extension is set
    pub inherited_prefix_path: Option<String>,
}

impl ProfileRecord {
    /// Produce a new record with every field given in `overrides` replacing
    /// the persisted one.
    pub fn merge(&self, overrides: &Overrides) -> ProfileRecord {
        fn space(persisted: &Option<String>, over: &Option<SpaceOverride>) -> Option<String> {
            match over {
                Some(SpaceOverride::Explicit(path)) if !path.is_empty() => Some(path.clone()),
                Some(_) => None,
                None => persisted.clone(),
            }
        }

        ProfileRecord {
            source_space: space(&self.source_space, &overrides.source_space),
            build_space: space(&self.build_space, &overrides.build_space),
            devel_space: space(&self.devel_space, &overrides.devel_space),
            install_space: space(&self.install_space, &overrides.install_space),
            space_suffix: overrides
                .space_suffix
                .clone()
                .or_else(|| self.space_suffix.clone()),
            extend_path: overrides
                .extend_path
                .clone()
                .or_else(|| self.extend_path.clone()),
            isolate_devel: overrides.isolate_devel.or(self.isolate_devel),
            isolate_install: overrides.isolate_install.or(self.isolate_install),
            install: overrides.install.or(self.install),
            cmake_args: overrides
                .cmake_args
                .clone()
                .or_else(|| self.cmake_args.clone()),
            make_args: overrides.make_args.clone().or_else(|| self.make_args.clone()),
            catkin_make_args: overrides
                .catkin_make_args
                .clone()
                .or_else(|| self.catkin_make_args.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omitted_overrides_keep_persisted_values() {
        let persisted = ProfileRecord {
            build_space: Some("/custom/build".into()),
            isolate_devel: Some(true),
            extend_path: Some(ExtendPath::Path("/opt/upstream".into())),
            ..Default::default()
        };

        let merged = persisted.merge(&Overrides::default());

        assert_eq!(merged, persisted);
    }

    #[test]
    fn explicit_false_beats_persisted_true() {
        let persisted = ProfileRecord {
            install: Some(true),
            ..Default::default()
        };
        let overrides = Overrides {
            install: Some(false),
            ..Default::default()
        };

        assert_eq!(persisted.merge(&overrides).install, Some(false));
    }

    #[test]
    fn default_space_override_unsets_persisted_path() {
        let persisted = ProfileRecord {
            devel_space: Some("out/devel".into()),
            ..Default::default()
        };
        let overrides = Overrides {
            devel_space: Some(SpaceOverride::Default),
            ..Default::default()
        };

        assert_eq!(persisted.merge(&overrides).devel_space, None);
    }

    #[test]
    fn cleared_extend_replaces_persisted_path() {
        let persisted = ProfileRecord {
            extend_path: Some(ExtendPath::Path("/opt/upstream".into())),
            ..Default::default()
        };
        let overrides = Overrides {
            extend_path: Some(ExtendPath::Cleared),
            ..Default::default()
        };

        assert_eq!(
            persisted.merge(&overrides).extend_path,
            Some(ExtendPath::Cleared)
        );
    }

    #[test]
    fn extend_path_string_form() {
        assert_eq!(ExtendPath::from(String::new()), ExtendPath::Cleared);
        assert_eq!(String::from(ExtendPath::Cleared), "");
        assert_eq!(
            ExtendPath::from("/ws/devel".to_string()).as_path(),
            Some("/ws/devel")
        );
    }
}
