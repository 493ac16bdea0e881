//! Quick status overview command.

use std::path::Path;

use crate::cli::context::Context;
use crate::cli::output;
use crate::error::Result;

/// Show the subject, declared and recorded counts and the last update.
///
/// Reads local files only; the remote is not contacted.
pub fn execute(config_path: &Path) -> Result<()> {
    let ctx = Context::load(config_path)?;

    output::section("Envsync Status");
    output::kv("subject", &ctx.subject);
    output::kv("declared", ctx.config.variables.len());
    output::kv("recorded", ctx.state.entries.len());
    output::kv("settle", &ctx.config.settle.strategy);
    match ctx.state.updated_at {
        Some(at) => output::kv("updated", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => output::kv("updated", "never"),
    }

    let untracked: Vec<&str> = ctx
        .config
        .variables
        .keys()
        .map(String::as_str)
        .filter(|k| !ctx.state.entries.contains(k))
        .collect();
    if !untracked.is_empty() {
        println!();
        output::hint(&format!("{} not applied yet: {}", untracked.len(), untracked.join(", ")));
    }
    Ok(())
}
