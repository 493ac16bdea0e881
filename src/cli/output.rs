//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, additions
//! - Red: errors, removals
//! - Yellow: warnings, replacements
//! - Cyan: keys, hints
//! - Dimmed: secondary info

use console::style;
use std::fmt::Display;

const RULE_WIDTH: usize = 56;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark.
///
/// Example: `✓ applied 3 changes`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print an error message to stderr.
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("✗").red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// Print a warning message.
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Print a hint to stderr.
///
/// Example: `→ run: envsync init`
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", style("→").cyan(), style(msg).cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

/// Print a key-value pair (label dimmed, value bold).
pub fn kv(label: &str, value: impl Display) {
    if colors_enabled() {
        println!("  {:<10}  {}", style(label).dim(), style(value).bold());
    } else {
        println!("  {:<10}  {}", label, value);
    }
}

/// Print a bold section header over a rule.
pub fn section(title: &str) {
    println!();
    if colors_enabled() {
        println!("{}", style(title).bold());
        println!("{}", style("─".repeat(RULE_WIDTH)).dim());
    } else {
        println!("{}", title);
        println!("{}", "─".repeat(RULE_WIDTH));
    }
}

/// Print a dimmed message.
pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", style(msg).dim());
    } else {
        println!("{}", msg);
    }
}

/// Format a key name in cyan.
pub fn key(k: &str) -> String {
    if colors_enabled() {
        style(k).cyan().to_string()
    } else {
        k.to_string()
    }
}

/// One line of a plan: a change marker, the key and a detail.
///
/// `+` creates, `-` removes, `~` replaces.
pub fn change(marker: char, key: &str, detail: &str) {
    let line = format!("{} {}", marker, key);
    let line = if !colors_enabled() {
        line
    } else {
        match marker {
            '+' => style(line).green().to_string(),
            '-' => style(line).red().to_string(),
            '~' => style(line).yellow().to_string(),
            _ => line,
        }
    };

    if detail.is_empty() {
        println!("  {}", line);
    } else if colors_enabled() {
        println!("  {}  {}", line, style(detail).dim());
    } else {
        println!("  {}  {}", line, detail);
    }
}
