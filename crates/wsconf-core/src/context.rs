//! Workspace context: locate, load, merge, resolve, persist, report

use serde::Serialize;

use wsconf_fs::{NormalizedPath, canonicalize_or_clean, io};

use crate::extension::ExtensionChainResolver;
use crate::locator::WorkspaceLocator;
use crate::record::{DEFAULT_PROFILE, ExtendPath, Overrides, ProfileRecord};
use crate::space::{Space, SpaceResolver};
use crate::store::{ConfigStore, validate_profile_name};
use crate::Result;

/// Fully resolved configuration of one workspace profile.
///
/// Unlike [`ProfileRecord`], nothing here is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    pub profile: String,
    pub workspace: NormalizedPath,
    pub source_space: NormalizedPath,
    pub build_space: NormalizedPath,
    pub devel_space: NormalizedPath,
    pub install_space: NormalizedPath,
    pub space_suffix: String,
    /// Explicitly extended prefix; `None` means no explicit extension
    pub extend_path: Option<NormalizedPath>,
    /// Extended prefixes, nearest first
    pub extension_chain: Vec<NormalizedPath>,
    /// Environment prefix path, kept only when extension is left unset
    pub inherited_prefix_path: Option<String>,
    pub isolate_devel: bool,
    pub install: bool,
    pub isolate_install: bool,
    pub cmake_args: Vec<String>,
    pub make_args: Vec<String>,
    pub catkin_make_args: Vec<String>,
}

impl ResolvedConfig {
    /// Resolve `record` against the workspace at `root`.
    pub fn resolve(
        root: &NormalizedPath,
        profile: &str,
        record: &ProfileRecord,
        inherited_prefix_path: Option<&str>,
    ) -> Result<Self> {
        let space_suffix = record.space_suffix.clone().unwrap_or_default();
        let spaces = SpaceResolver::new(root, &space_suffix);

        let extension_chain = ExtensionChainResolver::resolve(record.extend_path.as_ref(), root)?;
        let extend_path = record
            .extend_path
            .as_ref()
            .and_then(ExtendPath::as_path)
            .map(|path| NormalizedPath::new(path).absolutize(root));
        // a cleared extension replaces the environment as well
        let inherited_prefix_path = match record.extend_path {
            None => inherited_prefix_path
                .filter(|value| !value.is_empty())
                .map(str::to_string),
            Some(_) => None,
        };

        Ok(Self {
            profile: profile.to_string(),
            workspace: root.clone(),
            source_space: spaces.resolve(Space::Source, record.source_space.as_deref()),
            build_space: spaces.resolve(Space::Build, record.build_space.as_deref()),
            devel_space: spaces.resolve(Space::Devel, record.devel_space.as_deref()),
            install_space: spaces.resolve(Space::Install, record.install_space.as_deref()),
            extend_path,
            extension_chain,
            inherited_prefix_path,
            isolate_devel: record.isolate_devel.unwrap_or(false),
            install: record.install.unwrap_or(false),
            isolate_install: record.isolate_install.unwrap_or(false),
            cmake_args: record.cmake_args.clone().unwrap_or_default(),
            make_args: record.make_args.clone().unwrap_or_default(),
            catkin_make_args: record.catkin_make_args.clone().unwrap_or_default(),
            space_suffix,
        })
    }

    /// Prefixes visible to the build tools of this workspace.
    pub fn prefix_path(&self) -> Vec<String> {
        if self.extend_path.is_some() {
            return self.extension_chain.iter().map(ToString::to_string).collect();
        }
        self.inherited_prefix_path
            .as_deref()
            .map(|value| {
                value
                    .split(':')
                    .filter(|entry| !entry.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// One line per field, fixed order.
    pub fn summary(&self) -> String {
        fn args(values: &[String]) -> String {
            if values.is_empty() {
                "None".to_string()
            } else {
                values.join(" ")
            }
        }

        let extending = match (&self.extend_path, &self.inherited_prefix_path) {
            (Some(path), _) => format!("[explicit] {path}"),
            (None, Some(env)) => format!("[env] {env}"),
            (None, None) => "None".to_string(),
        };
        let chain = if self.extension_chain.is_empty() {
            "None".to_string()
        } else {
            self.extension_chain
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(":")
        };
        let suffix = if self.space_suffix.is_empty() {
            "None".to_string()
        } else {
            self.space_suffix.clone()
        };

        let fields = [
            ("Profile:", self.profile.clone()),
            ("Workspace:", self.workspace.to_string()),
            ("Source Space:", self.source_space.to_string()),
            ("Build Space:", self.build_space.to_string()),
            ("Devel Space:", self.devel_space.to_string()),
            ("Install Space:", self.install_space.to_string()),
            ("Space Suffix:", suffix),
            ("Extending:", extending),
            ("Extension Chain:", chain),
            ("Isolate Develspaces:", self.isolate_devel.to_string()),
            ("Install Packages:", self.install.to_string()),
            ("Isolate Installs:", self.isolate_install.to_string()),
            ("Additional CMake Args:", args(&self.cmake_args)),
            ("Additional Make Args:", args(&self.make_args)),
            ("Additional catkin_make Args:", args(&self.catkin_make_args)),
        ];

        fields
            .iter()
            .map(|(label, value)| format!("{label:<30}{value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Configuration context of one workspace profile for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    store: ConfigStore,
    profile: String,
    record: ProfileRecord,
    resolved: ResolvedConfig,
}

impl Context {
    /// Locate the workspace, load the profile and merge `overrides` on top.
    ///
    /// When no workspace is found the hint directory (or the current
    /// directory) becomes the prospective root; nothing is written.
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let hint = match &overrides.workspace_hint {
            Some(hint) => hint.clone(),
            None => std::env::current_dir().map_err(|e| wsconf_fs::Error::io(".", e))?,
        };

        let located = WorkspaceLocator::locate(&hint)?;
        let found = located.is_some();
        let workspace = located.unwrap_or_else(|| canonicalize_or_clean(&hint));
        let store = ConfigStore::new(workspace.clone());

        let profile = match &overrides.profile {
            Some(profile) => {
                validate_profile_name(profile)?;
                profile.clone()
            }
            None if found => store.active_profile()?,
            None => DEFAULT_PROFILE.to_string(),
        };

        let persisted = if found { store.load(&profile)? } else { None };
        tracing::debug!(
            workspace = %workspace,
            profile = %profile,
            found,
            persisted = persisted.is_some(),
            "Loading workspace context"
        );

        let record = persisted.unwrap_or_default().merge(overrides);
        let resolved = ResolvedConfig::resolve(
            &workspace,
            &profile,
            &record,
            overrides.inherited_prefix_path.as_deref(),
        )?;

        Ok(Self {
            store,
            profile,
            record,
            resolved,
        })
    }

    /// Load, then persist if the workspace is initialized or `init` was
    /// requested, then create the source space if `mkdirs` was requested.
    pub fn configure(overrides: &Overrides) -> Result<Self> {
        let context = Self::load(overrides)?;

        if context.initialized() || overrides.init {
            context.save()?;
        } else {
            tracing::debug!(workspace = %context.workspace(), "Workspace not initialized, not saving");
        }

        if overrides.mkdirs && !context.source_space_exists() {
            context.materialize_source_space()?;
        }

        Ok(context)
    }

    /// Whether the workspace metadata marker exists.
    pub fn initialized(&self) -> bool {
        self.store.exists()
    }

    pub fn workspace(&self) -> &NormalizedPath {
        &self.resolved.workspace
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Merged, still partial record; this is what [`save`](Self::save) writes.
    pub fn record(&self) -> &ProfileRecord {
        &self.record
    }

    pub fn resolved(&self) -> &ResolvedConfig {
        &self.resolved
    }

    pub fn source_space_abs(&self) -> &NormalizedPath {
        &self.resolved.source_space
    }

    pub fn source_space_exists(&self) -> bool {
        self.resolved.source_space.is_dir()
    }

    /// Persist the merged record for this profile.
    ///
    /// The first profile saved in a workspace becomes its active profile.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.profile, &self.record)?;
        if !self.store.has_active_profile() {
            self.store.set_active_profile(&self.profile)?;
        }
        Ok(())
    }

    /// Create the source space directory (and parents) if it is missing.
    pub fn materialize_source_space(&self) -> Result<()> {
        tracing::info!(path = %self.resolved.source_space, "Creating source space");
        io::ensure_dir(&self.resolved.source_space)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        self.resolved.summary()
    }
}
