//! Report formatting utilities for terminal output
//!
//! Provides formatting helpers shared by the report and expense views.

/// Format an amount with the currency label appended (e.g. "30000원")
pub fn format_amount(amount: i64, currency: &str) -> String {
    format!("{}{}", amount, currency)
}

/// Format an amount right-aligned to `width` columns, in red when negative
///
/// Padding is applied before the color codes so they don't count toward the width.
pub fn format_amount_colored(amount: i64, currency: &str, width: usize) -> String {
    let padded = format!("{:>width$}", format_amount(amount, currency), width = width);
    if amount < 0 {
        format!("\x1b[31m{}\x1b[0m", padded)
    } else {
        padded
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: i64, max_value: i64, width: usize) -> String {
    if max_value <= 0 || value <= 0 {
        return " ".repeat(width);
    }

    let filled = ((value as f64 / max_value as f64) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Format a double separator line
pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        ".".repeat(max_chars)
    } else {
        let head: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", head)
    }
}
