//! Init command - write a new envsync.toml.

use std::path::Path;

use tracing::info;

use crate::cli::output;
use crate::core::config::Config;
use crate::error::{ConfigError, Result};

/// Create `config_path` for `project`.
///
/// Without `--project` the current directory name is used.
pub fn execute(config_path: &Path, project: Option<String>, team: Option<String>) -> Result<()> {
    if config_path.exists() {
        return Err(ConfigError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let project = match project {
        Some(project) => project,
        None => std::env::current_dir()?
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "default".to_string()),
    };

    let config = Config::new(project, team);
    config.save(config_path)?;
    info!(subject = %config.subject(), "initialized");

    output::success(&format!("initialized {}", config_path.display()));
    output::kv("subject", config.subject());
    output::hint("declare variables under [variables.NAME], then run: envsync plan");
    Ok(())
}
