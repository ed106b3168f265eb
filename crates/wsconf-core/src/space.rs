//! Space path resolution
//!
//! Pure path arithmetic: no filesystem access.

use wsconf_fs::NormalizedPath;

/// One of the four configurable workspace directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    Source,
    Build,
    Devel,
    Install,
}

impl Space {
    pub const ALL: [Space; 4] = [Space::Source, Space::Build, Space::Devel, Space::Install];

    /// Directory name used when no explicit path is configured.
    pub fn default_basename(&self) -> &'static str {
        match self {
            Self::Source => "src",
            Self::Build => "build",
            Self::Devel => "devel",
            Self::Install => "install",
        }
    }

    /// The source space never gets the space suffix.
    pub fn takes_suffix(&self) -> bool {
        !matches!(self, Self::Source)
    }
}

/// Compute the absolute path of one space.
///
/// An explicit path wins and is taken relative to `root` when relative.
/// Otherwise the result is `root/<default_basename><suffix>`.
pub fn resolve_space(
    explicit: Option<&str>,
    default_basename: &str,
    suffix: &str,
    root: &NormalizedPath,
) -> NormalizedPath {
    match explicit {
        Some(path) if !path.is_empty() => NormalizedPath::new(path).absolutize(root),
        _ => root.join(&format!("{default_basename}{suffix}")),
    }
}

/// Resolves spaces for one workspace root and suffix.
#[derive(Debug, Clone, Copy)]
pub struct SpaceResolver<'a> {
    root: &'a NormalizedPath,
    suffix: &'a str,
}

impl<'a> SpaceResolver<'a> {
    pub fn new(root: &'a NormalizedPath, suffix: &'a str) -> Self {
        Self { root, suffix }
    }

    pub fn resolve(&self, space: Space, explicit: Option<&str>) -> NormalizedPath {
        let suffix = if space.takes_suffix() { self.suffix } else { "" };
        resolve_space(explicit, space.default_basename(), suffix, self.root)
    }
}
