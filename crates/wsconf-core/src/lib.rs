//! Workspace and profile configuration resolver
//!
//! Answers "what is this workspace's configuration, and what should it
//! become after this invocation":
//!
//! - **Discovery**: [`WorkspaceLocator`] walks up from a hint directory to the
//!   nearest `.wsconf/` marker and rejects starts inside generated output
//! - **Persistence**: [`ConfigStore`] keeps one TOML record per profile and
//!   writes it atomically
//! - **Merging**: [`ProfileRecord::merge`] layers [`Overrides`] over the
//!   persisted record; unset fields fall back to built-in defaults
//! - **Resolution**: [`SpaceResolver`] and [`ExtensionChainResolver`] turn the
//!   merged record into a [`ResolvedConfig`]
//!
//! [`Context`] composes all of the above for a single invocation.
//!
//! # Example
//!
//! ```ignore
//! use wsconf_core::{Context, Overrides};
//!
//! let overrides = Overrides {
//!     workspace_hint: Some("/path/to/ws".into()),
//!     init: true,
//!     space_suffix: Some("_release".into()),
//!     ..Default::default()
//! };
//! let context = Context::configure(&overrides)?;
//! println!("{}", context.summary());
//! ```

pub mod context;
pub mod error;
pub mod extension;
pub mod locator;
pub mod record;
pub mod space;
pub mod store;

pub use context::{Context, ResolvedConfig};
pub use error::{Error, Result};
pub use extension::ExtensionChainResolver;
pub use locator::WorkspaceLocator;
pub use record::{DEFAULT_PROFILE, ExtendPath, Overrides, ProfileRecord, SpaceOverride};
pub use space::{Space, SpaceResolver, resolve_space};
pub use store::{ConfigStore, validate_profile_name};
