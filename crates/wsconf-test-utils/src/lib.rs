//! Shared test utilities for the wsconf workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`workspace`] — [`TestWorkspace`](workspace::TestWorkspace) builder for
//!   on-disk workspaces with hand-written profile records

pub mod workspace;

pub use workspace::TestWorkspace;
