//! Reads the target list, one `ip:port` per line.

use std::io::BufRead;

use a2scan_common::network::target::Target;
use anyhow::Context;
use tracing::debug;

/// Collects valid targets in input order. Blank and malformed lines are
/// skipped.
pub fn read_targets<R: BufRead>(reader: R) -> anyhow::Result<Vec<Target>> {
    let mut targets = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading target list line {}", idx + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<Target>() {
            Ok(target) => targets.push(target),
            Err(e) => debug!("skipping line {}: {e}", idx + 1),
        }
    }
    Ok(targets)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
