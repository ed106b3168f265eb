//! `wsconf config`: resolve, persist and display a workspace profile

use colored::Colorize;
use wsconf_core::Context;

use crate::cli::ConfigArgs;
use crate::error::Result;

/// Column where summary values start
const LABEL_WIDTH: usize = 30;

/// Resolve the configuration, save it when appropriate and print it.
///
/// `inherited_prefix_path` is the environment's `CMAKE_PREFIX_PATH`.
pub fn run_config(args: &ConfigArgs, inherited_prefix_path: Option<String>) -> Result<()> {
    let overrides = args.to_overrides(inherited_prefix_path);
    let context = Context::configure(&overrides)?;

    if args.json {
        let output = serde_json::json!({
            "initialized": context.initialized(),
            "config": context.resolved(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Workspace Configuration".bold());
    println!();
    for line in context.summary().lines() {
        let split = LABEL_WIDTH.min(line.len());
        let (label, value) = line.split_at(split);
        println!("  {}{}", label.dimmed(), value);
    }

    if !context.initialized() {
        println!();
        println!(
            "{} Workspace {} is not initialized. Use {} to initialize it.",
            "warning:".yellow().bold(),
            context.workspace(),
            "--init".cyan()
        );
    }

    Ok(())
}
