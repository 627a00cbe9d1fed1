//! Expense CLI commands
//!
//! Implements CLI commands for recording, listing, editing, and deleting
//! expenses.

use chrono::Utc;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::display::report::format_amount;
use crate::error::{BudgetError, BudgetResult};
use crate::models::Expense;
use crate::services::{parse_date_input, BudgetBook, ExpenseDraft};
use crate::storage::StateStore;

use super::resolve_period;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount in whole currency units, e.g. "30000"
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category (free text)
        category: String,
        /// Expense date (YYYY-MM-DD or RFC 3339), defaults to now
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List a month's expenses
    List {
        /// Month to list (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        period: Option<String>,
        /// List every expense regardless of month
        #[arg(short, long, conflicts_with = "period")]
        all: bool,
    },

    /// Show expense details
    Show {
        /// Expense ID (e.g. "exp-1a2b3c4d")
        id: String,
    },

    /// Edit an expense, keeping its ID
    Edit {
        /// Expense ID
        id: String,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD or RFC 3339)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense by ID or by its position in a month's list
    Delete {
        /// Expense ID
        #[arg(required_unless_present = "nth", conflicts_with = "nth")]
        id: Option<String>,
        /// 1-based position in the month's list
        #[arg(short, long)]
        nth: Option<usize>,
        /// Month the position refers to (YYYY-MM), defaults to the current month
        #[arg(short, long, requires = "nth")]
        period: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command<S: StateStore>(
    book: &mut BudgetBook<S>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let zone = settings.calendar_zone;

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            date,
        } => {
            let mut draft = ExpenseDraft::blank(Utc::now());
            draft.amount_text = amount;
            draft.category = category;
            if let Some(date) = date {
                draft.date = parse_date_input(&date, zone)?;
            }

            match book.save_draft(draft, None)? {
                Some(expense) => {
                    println!("Recorded expense:");
                    print_summary_lines(&expense, settings);
                }
                None => println!("Amount is not a whole number; nothing saved."),
            }
        }

        ExpenseCommands::List { period, all } => {
            if all {
                print!("{}", format_expense_list(book.expenses(), settings));
                println!("\n{} expense(s)", book.expenses().len());
            } else {
                let period = resolve_period(period.as_deref(), zone)?;
                let expenses = book.expenses_in(period, zone);

                println!("Expenses for {}", period);
                print!("{}", format_expense_list(expenses.iter().copied(), settings));
                println!("\n{} expense(s)", expenses.len());
            }
        }

        ExpenseCommands::Show { id } => {
            let expense = book.find_by_prefix(&id)?;
            print!("{}", format_expense_details(expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            date,
        } => {
            let existing = book.find_by_prefix(&id)?;
            let existing_id = existing.id;
            let mut draft = ExpenseDraft::from_expense(existing);

            if amount.is_none() && category.is_none() && date.is_none() {
                return Err(BudgetError::Validation(
                    "Nothing to change. Pass --amount, --category, or --date".into(),
                ));
            }

            if let Some(amount) = amount {
                draft.amount_text = amount;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if let Some(date) = date {
                draft.date = parse_date_input(&date, zone)?;
            }

            match book.save_draft(draft, Some(existing_id))? {
                Some(expense) => {
                    println!("Updated expense:");
                    print_summary_lines(&expense, settings);
                }
                None => println!("Amount is not a whole number; nothing saved."),
            }
        }

        ExpenseCommands::Delete { id, nth, period } => {
            let removed = match (id, nth) {
                (_, Some(0)) => {
                    return Err(BudgetError::Validation("Positions start at 1".into()));
                }
                (_, Some(nth)) => {
                    let period = resolve_period(period.as_deref(), zone)?;
                    book.delete_in_period(period, zone, nth - 1)?
                }
                (Some(id), None) => {
                    let id = book.find_by_prefix(&id)?.id;
                    book.delete(id)?
                }
                (None, None) => {
                    return Err(BudgetError::Validation("Pass an expense ID or --nth".into()));
                }
            };

            println!("Deleted expense:");
            print_summary_lines(&removed, settings);
        }
    }

    Ok(())
}

fn print_summary_lines(expense: &Expense, settings: &Settings) {
    println!("  ID:       {}", expense.id);
    println!(
        "  Date:     {}",
        settings
            .calendar_zone
            .date_of(&expense.date)
            .format(&settings.date_format)
    );
    println!("  Category: {}", expense.category);
    println!(
        "  Amount:   {}",
        format_amount(expense.amount, &settings.currency_symbol)
    );
}
