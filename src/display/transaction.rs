//! Transaction display formatting

use crate::models::{Transaction, TransactionType};

use super::{format_amount, truncate};

/// Format a single transaction as a register row
pub fn format_transaction_row(txn: &Transaction, currency_symbol: &str) -> String {
    let sign = match txn.kind {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };

    format!(
        "{:>6} {:19} {:7} {:20} {}{:>12}",
        txn.id,
        truncate(&txn.date, 19),
        txn.kind,
        truncate(&txn.category, 20),
        sign,
        format_amount(txn.amount, currency_symbol)
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(transactions: &[Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6} {:19} {:7} {:20} {:>13}\n",
        "ID", "Date", "Type", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(69));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency_symbol));
        output.push('\n');
    }

    let income: f64 = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let expenses: f64 = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();

    output.push_str(&"-".repeat(69));
    output.push('\n');
    output.push_str(&format!(
        "{} transaction(s), income {}, expenses {}\n",
        transactions.len(),
        format_amount(income, currency_symbol),
        format_amount(expenses, currency_symbol)
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency_symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("User:        {}\n", txn.user_id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        format_amount(txn.amount, currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    output.push_str(&format!("Date:        {}\n", txn.date));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TransactionId, UserId};

    fn txn(id: i64, kind: TransactionType, amount: f64, category: &str) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            user_id: UserId::new(1),
            kind,
            amount,
            category: category.into(),
            date: "2025-01-15 12:00:00".into(),
        }
    }

    #[test]
    fn test_empty_register() {
        assert_eq!(
            format_transaction_register(&[], "$"),
            "No transactions found.\n"
        );
    }

    #[test]
    fn test_register_totals() {
        let rows = vec![
            txn(1, TransactionType::Income, 1000.0, "salary"),
            txn(2, TransactionType::Expense, 200.0, "groceries"),
            txn(3, TransactionType::Expense, 50.0, "groceries"),
        ];
        let output = format_transaction_register(&rows, "$");

        assert!(output.contains("salary"));
        assert!(output.contains("groceries"));
        assert!(output.contains("3 transaction(s), income $1000.00, expenses $250.00"));
    }

    #[test]
    fn test_details() {
        let output = format_transaction_details(&txn(7, TransactionType::Expense, 9.5, "coffee"), "£");
        assert!(output.contains("Transaction: 7"));
        assert!(output.contains("Amount:      £9.50"));
        assert!(output.contains("Type:        expense"));
    }
}
