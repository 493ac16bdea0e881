//! Plan command.
//!
//! Lists, reconciles and prints the result without changing anything.

use std::path::Path;

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::domain::OperationPlan;
use crate::error::Result;

/// Show what apply would do.
pub fn execute(config_path: &Path) -> Result<()> {
    let ctx = Context::load(config_path)?;
    let declared = ctx.config.declared()?;
    let plan = ctx.cycle().plan(&declared, &ctx.state.entries)?;

    render(&plan);
    Ok(())
}

/// Print a plan, one line per changed key.
pub fn render(plan: &OperationPlan) {
    for ambiguity in &plan.ambiguities {
        output::warn(&format!(
            "{} matched {} live entries, using {}",
            output::key(&ambiguity.key),
            ambiguity.candidates.len(),
            ambiguity.chosen
        ));
    }

    if !plan.has_changes() {
        output::success(&format!("no changes, {} up to date", plan.unchanged.len()));
        return;
    }

    output::section("Plan");
    for key in plan.additions() {
        output::change('+', key, "create");
    }
    for (key, reason) in &plan.replacements {
        output::change('~', key, &reason.to_string());
    }
    for key in plan.removals() {
        output::change('-', key, "remove");
    }

    println!();
    output::dimmed(&format!(
        "{} to create, {} to replace, {} to remove, {} unchanged",
        plan.additions().len(),
        plan.replacements.len(),
        plan.removals().len(),
        plan.unchanged.len()
    ));
}
