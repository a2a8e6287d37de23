//! Display formatting for terminal output

pub mod budget;
pub mod transaction;

pub use budget::{format_budget_check, format_budget_list};
pub use transaction::{format_transaction_details, format_transaction_register};

/// Format an amount with a currency symbol and two decimals
pub fn format_amount(amount: f64, currency_symbol: &str) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", currency_symbol, -amount)
    } else {
        format!("{}{:.2}", currency_symbol, amount)
    }
}

/// Truncate a string to a maximum number of characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}
