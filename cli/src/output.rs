//! `ip:port` list files for chaining runs.

use std::fs;
use std::path::Path;

use a2scan_core::QueryOutcome;
use anyhow::Context;
use tracing::{debug, info};

use crate::commands::CommandLine;
use crate::report::Report;

/// One `ip:port` per line. Nothing is written for an empty list.
pub fn write_target_list(path: &Path, outcomes: &[&QueryOutcome]) -> anyhow::Result<()> {
    if outcomes.is_empty() {
        debug!("nothing to write to {}", path.display());
        return Ok(());
    }

    let mut contents = String::new();
    for outcome in outcomes {
        contents.push_str(&outcome.target.to_string());
        contents.push('\n');
    }
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {} entries to {}", outcomes.len(), path.display());
    Ok(())
}

pub fn write_all(report: &Report<'_>, commands: &CommandLine) -> anyhow::Result<()> {
    let lists = [
        (&commands.output_success, &report.successful),
        (&commands.output_failed, &report.failed),
        (&commands.output_shown, &report.shown),
    ];
    for (path, outcomes) in lists {
        if let Some(path) = path {
            write_target_list(path, outcomes)?;
        }
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
