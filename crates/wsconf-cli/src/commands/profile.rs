//! `wsconf profile`: list, select and delete profiles

use std::path::Path;

use colored::Colorize;
use wsconf_core::{ConfigStore, WorkspaceLocator};

use crate::error::{CliError, Result};

fn workspace_store(hint: &Path) -> Result<ConfigStore> {
    match WorkspaceLocator::locate(hint)? {
        Some(root) => Ok(ConfigStore::new(root)),
        None => Err(CliError::user(format!(
            "No workspace found at or above {}. Use 'wsconf config --init' to initialize one.",
            hint.display()
        ))),
    }
}

/// Print all profiles, marking the active one
pub fn run_profile_list(hint: &Path) -> Result<()> {
    let store = workspace_store(hint)?;
    let profiles = store.list_profiles()?;
    let active = store.active_profile()?;

    if profiles.is_empty() {
        println!("{}", "(no profiles)".dimmed());
        return Ok(());
    }

    for profile in &profiles {
        if *profile == active {
            println!("{} {} {}", "*".green(), profile.bold(), "(active)".dimmed());
        } else {
            println!("  {}", profile);
        }
    }
    Ok(())
}

/// Make `name` the active profile
pub fn run_profile_set(hint: &Path, name: &str) -> Result<()> {
    let store = workspace_store(hint)?;
    if !store.list_profiles()?.iter().any(|p| p == name) {
        return Err(CliError::user(format!(
            "Profile '{}' does not exist. Use 'wsconf profile list' to see profiles.",
            name
        )));
    }

    store.set_active_profile(name)?;
    println!("{} Active profile is now {}", "OK".green().bold(), name.bold());
    Ok(())
}

/// Delete profile `name`
pub fn run_profile_remove(hint: &Path, name: &str) -> Result<()> {
    let store = workspace_store(hint)?;
    store.remove_profile(name)?;
    println!("{} Removed profile {}", "OK".green().bold(), name.bold());
    Ok(())
}
