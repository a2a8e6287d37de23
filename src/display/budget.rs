//! Budget display formatting

use crate::models::{Budget, BudgetCheck};

use super::{format_amount, truncate};

/// Format a user's budgets as a table
pub fn format_budget_list(budgets: &[Budget], currency_symbol: &str) -> String {
    if budgets.is_empty() {
        return "No budgets set.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:24} {:>12}\n", "Category", "Budget"));
    output.push_str(&"-".repeat(37));
    output.push('\n');

    for budget in budgets {
        output.push_str(&format!(
            "{:24} {:>12}\n",
            truncate(&budget.category, 24),
            format_amount(budget.budget, currency_symbol)
        ));
    }

    output
}

/// Format the per-category comparison behind a budget check
pub fn format_budget_check(check: &BudgetCheck, currency_symbol: &str) -> String {
    let mut output = String::new();

    if !check.categories.is_empty() {
        output.push_str(&format!(
            "{:24} {:>12} {:>12} {:>8}\n",
            "Category", "Budget", "Spent", "Status"
        ));
        output.push_str(&"-".repeat(59));
        output.push('\n');

        for c in &check.categories {
            let status = if c.is_exceeded() { "OVER" } else { "ok" };
            output.push_str(&format!(
                "{:24} {:>12} {:>12} {:>8}\n",
                truncate(&c.category, 24),
                format_amount(c.budget, currency_symbol),
                format_amount(c.spent, currency_symbol),
                status
            ));
        }
        output.push('\n');
    }

    output.push_str(&check.to_string());
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetId, CategorySpending, UserId};

    #[test]
    fn test_empty_budget_list() {
        assert_eq!(format_budget_list(&[], "$"), "No budgets set.\n");
    }

    #[test]
    fn test_budget_list() {
        let budgets = vec![Budget {
            id: BudgetId::new(1),
            user_id: UserId::new(1),
            category: "rent".into(),
            budget: 1000.0,
        }];
        let output = format_budget_list(&budgets, "$");
        assert!(output.contains("rent"));
        assert!(output.contains("$1000.00"));
    }

    #[test]
    fn test_budget_check_table() {
        let check = BudgetCheck {
            user_id: UserId::new(1),
            categories: vec![
                CategorySpending {
                    category: "groceries".into(),
                    budget: 500.0,
                    spent: 600.0,
                },
                CategorySpending {
                    category: "rent".into(),
                    budget: 1000.0,
                    spent: 800.0,
                },
            ],
        };
        let output = format_budget_check(&check, "$");

        assert!(output.contains("OVER"));
        assert!(output.contains("exceeded your budget for groceries"));
        assert!(!output.contains("exceeded your budget for rent"));
    }

    #[test]
    fn test_budget_check_with_nothing_to_compare() {
        let check = BudgetCheck {
            user_id: UserId::new(1),
            categories: Vec::new(),
        };
        assert_eq!(
            format_budget_check(&check, "$"),
            "All categories are within budget.\n"
        );
    }
}
