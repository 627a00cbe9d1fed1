//! Monthly report
//!
//! The overview for one year/month: budget, total spent, what remains, the
//! period's expenses, and a bar chart of spending per category.

use crate::aggregate::MonthlySummary;
use crate::config::settings::Settings;
use crate::display::expense::format_expense_list;
use crate::display::report::{
    double_separator, format_amount, format_amount_colored, format_bar, separator, truncate,
};
use crate::models::Period;
use crate::services::BudgetBook;
use crate::storage::StateStore;

/// Width of the report rules
const REPORT_WIDTH: usize = 60;

/// Width of the chart bars
const BAR_WIDTH: usize = 30;

/// Width of the category label column in the chart
const LABEL_WIDTH: usize = 14;

/// Monthly report
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub summary: MonthlySummary,
}

impl MonthlyReport {
    /// Generate the report for `period`, reading months in the configured zone
    pub fn generate<S: StateStore>(
        book: &BudgetBook<S>,
        period: Period,
        settings: &Settings,
    ) -> Self {
        Self {
            summary: book.summary(period, settings.calendar_zone),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let summary = &self.summary;
        let currency = settings.currency_symbol.as_str();
        let mut output = String::new();

        output.push_str(&format!("Budget Report: {}\n", summary.period));
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        if summary.budget > 0 {
            output.push_str(&format!(
                "{:<14}{:>16}\n",
                "Budget:",
                format_amount(summary.budget, currency)
            ));
        }
        output.push_str(&format!(
            "{:<14}{:>16}\n",
            "Total spent:",
            format_amount(summary.total, currency)
        ));
        output.push_str(&format!(
            "{:<14}{}\n",
            "Remaining:",
            format_amount_colored(summary.remaining, currency, 16)
        ));

        if summary.over_budget {
            output.push_str(&format!(
                "\n⚠️  Over budget by {}!\n",
                format_amount(-summary.remaining, currency)
            ));
        }

        output.push_str("\nExpenses\n");
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format_expense_list(&summary.expenses, settings));

        if !summary.categories.is_empty() {
            output.push_str("\nSpending by category\n");
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');
            output.push_str(&self.format_chart(currency));
        }

        output
    }

    /// Bar chart of category totals, one line per category in name order
    pub fn format_chart(&self, currency: &str) -> String {
        let max = self.summary.max_category_total();

        self.summary
            .categories
            .iter()
            .map(|(category, total)| {
                format!(
                    "{:<label$} {} {}\n",
                    truncate(category, LABEL_WIDTH),
                    format_bar(*total, max, BAR_WIDTH),
                    format_amount(*total, currency),
                    label = LABEL_WIDTH
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalendarZone;
    use crate::storage::MemoryStore;
    use chrono::{TimeZone, Utc};

    fn settings() -> Settings {
        Settings {
            calendar_zone: CalendarZone::Utc,
            ..Settings::default()
        }
    }

    fn june_book() -> BudgetBook<MemoryStore> {
        let mut book = BudgetBook::open(MemoryStore::new());
        book.set_budget(100000).unwrap();
        book.add(30000, "Food", Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap())
            .unwrap();
        book.add(80000, "Rent", Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap())
            .unwrap();
        book
    }

    #[test]
    fn test_over_budget_report() {
        let settings = settings();
        let report =
            MonthlyReport::generate(&june_book(), Period::new(2025, 6).unwrap(), &settings);
        let output = report.format_terminal(&settings);

        assert!(output.contains("Budget Report: 2025-06"));
        assert!(output.contains("100000원"));
        assert!(output.contains("110000원"));
        assert!(output.contains("-10000원"));
        assert!(output.contains("Over budget by 10000원"));
        assert!(output.contains("Spending by category"));
    }

    #[test]
    fn test_empty_month_report() {
        let settings = settings();
        let report =
            MonthlyReport::generate(&june_book(), Period::new(2025, 5).unwrap(), &settings);
        let output = report.format_terminal(&settings);

        assert!(output.contains("No expenses found."));
        assert!(!output.contains("Over budget"));
        assert!(!output.contains("Spending by category"));
    }

    #[test]
    fn test_budget_line_hidden_when_zero() {
        let settings = settings();
        let book = BudgetBook::open(MemoryStore::new());
        let output = MonthlyReport::generate(&book, Period::new(2025, 6).unwrap(), &settings)
            .format_terminal(&settings);
        assert!(!output.contains("Budget:"));
        assert!(output.contains("Total spent:"));
    }

    #[test]
    fn test_chart_is_sorted_and_scaled() {
        let settings = settings();
        let report =
            MonthlyReport::generate(&june_book(), Period::new(2025, 6).unwrap(), &settings);
        let chart = report.format_chart("원");
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Food"));
        assert!(lines[1].starts_with("Rent"));
        assert!(lines[1].contains(&"█".repeat(BAR_WIDTH)));
        assert!(lines[0].ends_with("30000원"));
    }

    #[test]
    fn test_negative_remaining_stays_aligned() {
        let settings = settings();
        let output = MonthlyReport::generate(&june_book(), Period::new(2025, 6).unwrap(), &settings)
            .format_terminal(&settings);

        let line = |label: &str| {
            output
                .lines()
                .find(|l| l.starts_with(label))
                .unwrap()
                .replace("\x1b[31m", "")
                .replace("\x1b[0m", "")
        };
        let total = line("Total spent:");
        let remaining = line("Remaining:");

        assert!(remaining.ends_with("-10000원"));
        assert_eq!(remaining.chars().count(), total.chars().count());
    }
}
