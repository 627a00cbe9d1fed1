//! CLI command for reading the audit log

use crate::audit::AuditLogger;
use crate::error::BudgetResult;

/// Print the `count` most recent audit entries, oldest first
pub fn handle_audit_command(logger: &AuditLogger, enabled: bool, count: usize) -> BudgetResult<()> {
    if !enabled {
        println!("Audit logging is off. Set \"audit_enabled\": true in config.json to record changes.");
    }

    let entries = logger.read_recent(count)?;

    if entries.is_empty() {
        println!("No audit entries found in {}", logger.path().display());
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!("\nShowing {} of the most recent entries", entries.len());

    Ok(())
}
