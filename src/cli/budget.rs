//! Budget CLI commands
//!
//! Implements CLI commands for setting, showing, and resetting the monthly
//! budget.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::report::{format_amount, format_amount_colored};
use crate::error::BudgetResult;
use crate::models::Period;
use crate::services::BudgetBook;
use crate::storage::StateStore;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget (whole currency units)
    Set {
        /// New budget, e.g. "100000"
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Show the budget and this month's spending
    Show,

    /// Clear the budget and delete every expense
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a budget command
pub fn handle_budget_command<S: StateStore>(
    book: &mut BudgetBook<S>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> BudgetResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set { amount } => {
            if book.set_budget_input(&amount)? {
                println!("Budget set to {}", format_amount(book.budget(), currency));
            } else {
                println!("'{}' is not a whole number; budget unchanged.", amount);
            }
        }

        BudgetCommands::Show => {
            let zone = settings.calendar_zone;
            let summary = book.summary(Period::current(zone), zone);

            println!("Budget:    {}", format_amount(summary.budget, currency));
            println!(
                "Spent:     {} ({})",
                format_amount(summary.total, currency),
                summary.period
            );
            println!("Remaining: {}", format_amount_colored(summary.remaining, currency, 0));
        }

        BudgetCommands::Reset { force } => {
            if !force {
                println!(
                    "About to clear the budget ({}) and delete {} expense(s).",
                    format_amount(book.budget(), currency),
                    book.expenses().len()
                );
                println!();
                println!("Use --force to confirm reset");
                return Ok(());
            }

            book.reset()?;
            println!("Budget and expenses cleared.");
        }
    }

    Ok(())
}
