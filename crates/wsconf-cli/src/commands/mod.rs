//! Command implementations for wsconf-cli

pub mod config;
pub mod profile;

pub use config::run_config;
pub use profile::{run_profile_list, run_profile_remove, run_profile_set};
