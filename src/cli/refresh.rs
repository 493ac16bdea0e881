//! Refresh command.

use std::path::Path;

use crate::cli::context::Context;
use crate::cli::output;
use crate::error::Result;

/// Rebuild recorded state from what the remote currently holds.
pub fn execute(config_path: &Path) -> Result<()> {
    let mut ctx = Context::load(config_path)?;
    let before = ctx.state.entries.len();

    let entries = ctx.cycle().refresh(&ctx.state.entries)?;
    let dropped = before.saturating_sub(entries.len());
    ctx.record(entries)?;

    if dropped > 0 {
        output::warn(&format!("{} recorded variable(s) no longer exist remotely", dropped));
    }
    output::success(&format!("refreshed {}", ctx.state_path().display()));
    Ok(())
}
