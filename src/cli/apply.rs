//! Apply command.

use std::io::{self, IsTerminal};
use std::path::Path;

use dialoguer::Confirm;
use tracing::info;

use crate::cli::context::Context;
use crate::cli::{output, plan};
use crate::core::reconcile::CancelToken;
use crate::error::{ReconcileError, Result};

/// Reconcile the remote with the declared variables.
///
/// The plan is shown first. Without `--yes` a terminal user is asked to
/// confirm; a non-interactive run without `--yes` is refused. The confirmed
/// plan is the one applied.
pub fn execute(config_path: &Path, yes: bool) -> Result<()> {
    let mut ctx = Context::load(config_path)?;
    let declared = ctx.config.declared()?;

    let preview = ctx.cycle().plan(&declared, &ctx.state.entries)?;
    plan::render(&preview);
    if !preview.has_changes() {
        ctx.record(preview.unchanged)?;
        return Ok(());
    }

    if !yes && !confirm("Apply these changes?")? {
        return Err(ReconcileError::Cancelled("confirmation").into());
    }

    let outcome = ctx.cycle().apply_plan(preview, &CancelToken::new())?;
    let changed = outcome.plan.to_add.len() + outcome.plan.removals().len();
    ctx.record(outcome.state)?;

    info!(changed, "applied");
    output::success(&format!("applied {} change{}", changed, if changed == 1 { "" } else { "s" }));
    Ok(())
}

/// Ask on a terminal; answer no everywhere else.
pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    if !io::stdin().is_terminal() {
        return Ok(false);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
