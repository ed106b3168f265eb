//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wsconf_core::{ExtendPath, Overrides, SpaceOverride};

/// wsconf - Configure build workspaces and their profiles
#[derive(Parser, Debug)]
#[command(name = "wsconf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show or change the configuration of a workspace profile
    ///
    /// With no options, prints the current configuration and changes
    /// nothing. Options given are merged into the persisted profile when
    /// the workspace is initialized (or --init is passed).
    ///
    /// Examples:
    ///   wsconf config --init                  # Initialize the current directory
    ///   wsconf config -x _release             # Suffix build/devel/install spaces
    ///   wsconf config --extend /opt/ros/noetic
    ///   wsconf config --profile debug --cmake-args -DCMAKE_BUILD_TYPE=Debug
    Config(ConfigArgs),

    /// Manage configuration profiles
    Profile {
        /// Path to the workspace (or a directory inside it)
        #[arg(short, long, global = true)]
        workspace: Option<PathBuf>,

        #[command(subcommand)]
        action: ProfileAction,
    },
}

/// Profile subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    /// List profiles, marking the active one
    List,
    /// Make an existing profile the active one
    Set {
        /// Profile name
        name: String,
    },
    /// Delete a profile
    Remove {
        /// Profile name
        name: String,
    },
}

/// Options of `wsconf config`
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to the workspace (or a directory inside it)
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Profile to configure (defaults to the active profile)
    #[arg(long)]
    pub profile: Option<String>,

    /// Initialize the workspace if it does not exist yet
    #[arg(long)]
    pub init: bool,

    /// Create the source space if it does not exist
    #[arg(long)]
    pub mkdirs: bool,

    /// Extend the result space of another workspace, overriding $CMAKE_PREFIX_PATH
    #[arg(short, long, conflicts_with = "no_extend")]
    pub extend: Option<String>,

    /// Remove any explicit extension
    #[arg(long)]
    pub no_extend: bool,

    /// Path to the source space
    #[arg(short, long, conflicts_with = "default_source_space")]
    pub source_space: Option<String>,

    /// Use the default source space ("src")
    #[arg(long)]
    pub default_source_space: bool,

    /// Path to the build space
    #[arg(short, long, conflicts_with = "default_build_space")]
    pub build_space: Option<String>,

    /// Use the default build space ("build")
    #[arg(long)]
    pub default_build_space: bool,

    /// Path to the devel space
    #[arg(short, long, conflicts_with = "default_devel_space")]
    pub devel_space: Option<String>,

    /// Use the default devel space ("devel")
    #[arg(long)]
    pub default_devel_space: bool,

    /// Path to the install space
    #[arg(short, long, conflicts_with = "default_install_space")]
    pub install_space: Option<String>,

    /// Use the default install space ("install")
    #[arg(long)]
    pub default_install_space: bool,

    /// Suffix for build, devel and install spaces that are not set explicitly
    #[arg(short = 'x', long)]
    pub space_suffix: Option<String>,

    /// Build each package into its own devel space
    #[arg(long, conflicts_with = "merge_devel")]
    pub isolate_devel: bool,

    /// Build all packages into one merged devel space
    #[arg(long)]
    pub merge_devel: bool,

    /// Install each package into the install space
    #[arg(long, conflicts_with = "no_install")]
    pub install: bool,

    /// Do not install packages
    #[arg(long)]
    pub no_install: bool,

    /// Install each package into its own install space
    #[arg(long, conflicts_with = "merge_install")]
    pub isolate_install: bool,

    /// Install all packages into one merged install space
    #[arg(long)]
    pub merge_install: bool,

    /// Print the resolved configuration as JSON
    #[arg(long)]
    pub json: bool,

    /// Clear the stored CMake arguments
    #[arg(long, conflicts_with = "cmake_args")]
    pub no_cmake_args: bool,

    /// Clear the stored Make arguments
    #[arg(long, conflicts_with = "make_args")]
    pub no_make_args: bool,

    /// Clear the stored catkin_make arguments
    #[arg(long, conflicts_with = "catkin_make_args")]
    pub no_catkin_make_args: bool,

    /// Arbitrary arguments passed to CMake (consumes the following arguments)
    #[arg(long, num_args = 1.., allow_hyphen_values = true)]
    pub cmake_args: Option<Vec<String>>,

    /// Arbitrary arguments passed to Make (consumes the following arguments)
    #[arg(long, num_args = 1.., allow_hyphen_values = true)]
    pub make_args: Option<Vec<String>>,

    /// Arbitrary arguments passed to catkin_make (consumes the following arguments)
    #[arg(long, num_args = 1.., allow_hyphen_values = true)]
    pub catkin_make_args: Option<Vec<String>>,
}

impl ConfigArgs {
    /// Translate flags into the overrides bundle; omitted flags stay `None`.
    pub fn to_overrides(&self, inherited_prefix_path: Option<String>) -> Overrides {
        fn space(explicit: &Option<String>, use_default: bool) -> Option<SpaceOverride> {
            match (explicit, use_default) {
                (Some(path), _) => Some(SpaceOverride::Explicit(path.clone())),
                (None, true) => Some(SpaceOverride::Default),
                (None, false) => None,
            }
        }

        fn pair(on: bool, off: bool) -> Option<bool> {
            match (on, off) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            }
        }

        fn passthrough(values: &Option<Vec<String>>, clear: bool) -> Option<Vec<String>> {
            if clear {
                Some(Vec::new())
            } else {
                values.clone()
            }
        }

        let extend_path = match (&self.extend, self.no_extend) {
            (Some(path), _) => Some(ExtendPath::from(path.clone())),
            (None, true) => Some(ExtendPath::Cleared),
            (None, false) => None,
        };

        Overrides {
            workspace_hint: self.workspace.clone(),
            profile: self.profile.clone(),
            init: self.init,
            mkdirs: self.mkdirs,
            source_space: space(&self.source_space, self.default_source_space),
            build_space: space(&self.build_space, self.default_build_space),
            devel_space: space(&self.devel_space, self.default_devel_space),
            install_space: space(&self.install_space, self.default_install_space),
            space_suffix: self.space_suffix.clone(),
            extend_path,
            isolate_devel: pair(self.isolate_devel, self.merge_devel),
            isolate_install: pair(self.isolate_install, self.merge_install),
            install: pair(self.install, self.no_install),
            cmake_args: passthrough(&self.cmake_args, self.no_cmake_args),
            make_args: passthrough(&self.make_args, self.no_make_args),
            catkin_make_args: passthrough(&self.catkin_make_args, self.no_catkin_make_args),
            inherited_prefix_path,
        }
    }
}
