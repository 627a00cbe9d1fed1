//! CLI command for the monthly report

use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::reports::MonthlyReport;
use crate::services::BudgetBook;
use crate::storage::StateStore;

use super::resolve_period;

/// Print the monthly report for `period` (defaults to the current month)
pub fn handle_summary_command<S: StateStore>(
    book: &BudgetBook<S>,
    settings: &Settings,
    period: Option<&str>,
) -> BudgetResult<()> {
    let period = resolve_period(period, settings.calendar_zone)?;
    let report = MonthlyReport::generate(book, period, settings);

    print!("{}", report.format_terminal(settings));
    println!();
    println!(
        "Previous: budget summary --period {}   Next: budget summary --period {}",
        period.prev(),
        period.next()
    );

    Ok(())
}
