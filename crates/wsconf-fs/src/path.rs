//! Normalized path handling for cross-platform compatibility

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Paths are lexically cleaned on construction: empty and `.` components
/// are dropped and `..` pops the previous component where one exists.
/// Symlinks are never consulted; use [`canonicalize_or_clean`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&path_str.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a relative segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if segment_normalized.is_empty() || segment_normalized == "." {
            return self.clone();
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Resolve this path against `base` unless it is already absolute.
    pub fn absolutize(&self, base: &NormalizedPath) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            base.join(&self.inner)
        }
    }

    /// Whether the path is rooted (`/...`, `//server/...` or `X:/...`).
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || drive_prefix_len(&self.inner).is_some()
    }

    /// Component-wise prefix test. A path starts with itself.
    pub fn starts_with(&self, base: &NormalizedPath) -> bool {
        if self.inner == base.inner {
            return true;
        }
        let prefix = if base.inner.ends_with('/') {
            base.inner.clone()
        } else {
            format!("{}/", base.inner)
        };
        self.inner.starts_with(&prefix)
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => {
                let head = &trimmed[..idx];
                // keep the slash of a drive root ("C:/")
                let inner = if drive_prefix_len(&format!("{head}/")) == Some(head.len() + 1) {
                    format!("{head}/")
                } else {
                    head.to_string()
                };
                Some(Self { inner })
            }
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rsplit('/').next() {
            Some("") | Some(".") | Some("..") | None => None,
            Some(name) => Some(name),
        }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Resolve symlinks for the longest existing prefix of `path`, then append
/// the remaining (not yet existing) components lexically.
///
/// Relative input is first made absolute against the current directory.
pub fn canonicalize_or_clean(path: &Path) -> NormalizedPath {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    // clean first so no `..` is left to confuse the walk below
    let absolute = NormalizedPath::new(absolute).to_native();

    let mut existing = absolute.as_path();
    let mut missing: Vec<String> = Vec::new();
    loop {
        if let Ok(canonical) = dunce::canonicalize(existing) {
            let mut result = NormalizedPath::new(canonical);
            for component in missing.iter().rev() {
                result = result.join(component);
            }
            return result;
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_string_lossy().into_owned());
                existing = parent;
            }
            _ => return NormalizedPath::new(&absolute),
        }
    }
}

/// Length of a `X:/` drive prefix, if present.
fn drive_prefix_len(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    if bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/' {
        Some(3)
    } else {
        None
    }
}

fn clean(raw: &str) -> String {
    let (prefix, rest) = if raw.starts_with("//") && !raw.starts_with("///") {
        ("//", &raw[2..])
    } else if raw.starts_with('/') {
        ("/", raw.trim_start_matches('/'))
    } else if let Some(len) = drive_prefix_len(raw) {
        (&raw[..len], &raw[len..])
    } else {
        ("", raw)
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in rest.split('/') {
        match component {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if prefix.is_empty() => parts.push(".."),
                // cannot climb above a root
                _ => {}
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (prefix.is_empty(), body.is_empty()) {
        (true, true) => ".".to_string(),
        (false, true) => prefix.to_string(),
        _ => format!("{prefix}{body}"),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for NormalizedPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl<'de> Deserialize<'de> for NormalizedPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_dots_and_separators() {
        assert_eq!(clean("a//b/./c/"), "a/b/c");
        assert_eq!(clean("/a/b/../c"), "/a/c");
        assert_eq!(clean("../a/.."), "..");
        assert_eq!(clean("/.."), "/");
        assert_eq!(clean(""), ".");
    }

    #[test]
    fn clean_keeps_network_and_drive_prefixes() {
        assert_eq!(clean("//server/share/../x"), "//server/x");
        assert_eq!(clean("C:/ws/../other"), "C:/other");
        assert_eq!(clean("C:/.."), "C:/");
    }

    #[test]
    fn parent_of_drive_child_keeps_root_slash() {
        let path = NormalizedPath::new("C:/ws");
        assert_eq!(path.parent().unwrap().as_str(), "C:/");
        assert!(NormalizedPath::new("C:/").parent().is_none());
    }
}
