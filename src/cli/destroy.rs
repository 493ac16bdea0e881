//! Destroy command.

use std::path::Path;

use crate::cli::apply::confirm;
use crate::cli::context::Context;
use crate::cli::output;
use crate::core::domain::EntrySet;
use crate::core::reconcile::CancelToken;
use crate::error::{ReconcileError, Result};

/// Delete every recorded variable from the remote.
pub fn execute(config_path: &Path, yes: bool) -> Result<()> {
    let mut ctx = Context::load(config_path)?;

    if ctx.state.entries.is_empty() {
        output::dimmed("nothing recorded");
        return Ok(());
    }

    output::section("Destroy");
    for key in ctx.state.entries.keys() {
        output::change('-', key, "remove");
    }
    println!();

    if !yes && !confirm(&format!("Delete {} variables from {}?", ctx.state.entries.len(), ctx.subject))? {
        return Err(ReconcileError::Cancelled("confirmation").into());
    }

    let destroyed = ctx.cycle().destroy(&ctx.state.entries, &CancelToken::new())?;
    ctx.record(EntrySet::new())?;

    output::success(&format!("destroyed {} variable{}", destroyed, if destroyed == 1 { "" } else { "s" }));
    Ok(())
}
