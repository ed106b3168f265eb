//! Filesystem layer for wsconf
//!
//! Provides normalized path arithmetic, atomic I/O and a format-aware
//! document store used to persist workspace profile records.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::DocumentStore;
pub use constants::WorkspacePath;
pub use error::{Error, Result};
pub use path::{NormalizedPath, canonicalize_or_clean};
