//! Expense aggregation over the category → subcategory map.

use std::collections::BTreeMap;

use crate::ExpensesByCategory;
use crate::calculations::common::finite_or_zero;

fn sum_subcategories(subcategories: &BTreeMap<String, f64>) -> f64 {
    subcategories.values().copied().map(finite_or_zero).sum()
}

/// Sums every subcategory amount across every category.
///
/// Keys outside the catalog are counted like any other. Non-finite amounts
/// count as zero.
pub fn calculate_total_expenses(expenses: &ExpensesByCategory) -> f64 {
    expenses.values().map(sum_subcategories).sum()
}

/// Sums the subcategories of a single category; a missing category is zero.
pub fn calculate_category_total(
    expenses: &ExpensesByCategory,
    category_id: &str,
) -> f64 {
    expenses.get(category_id).map_or(0.0, sum_subcategories)
}

/// Total per category, for every category present.
pub fn category_totals(expenses: &ExpensesByCategory) -> BTreeMap<String, f64> {
    expenses
        .iter()
        .map(|(category, subcategories)| (category.clone(), sum_subcategories(subcategories)))
        .collect()
}

/// How many months `current_buffer` covers at `monthly_expenses`.
///
/// Returns `None` when monthly expenses are not a positive finite number.
pub fn buffer_months(
    current_buffer: f64,
    monthly_expenses: f64,
) -> Option<f64> {
    let monthly_expenses = finite_or_zero(monthly_expenses);
    if monthly_expenses <= 0.0 {
        return None;
    }
    Some(finite_or_zero(current_buffer).max(0.0) / monthly_expenses)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn expenses(entries: &[(&str, &str, f64)]) -> ExpensesByCategory {
        let mut map = ExpensesByCategory::new();
        for &(category, subcategory, amount) in entries {
            map.entry(category.to_string())
                .or_default()
                .insert(subcategory.to_string(), amount);
        }
        map
    }

    fn household() -> ExpensesByCategory {
        expenses(&[
            ("home", "rent", 5_000.0),
            ("home", "util", 1_000.0),
            ("food", "groceries", 3_000.0),
            ("food", "eat", 2_000.0),
        ])
    }

    #[test]
    fn total_expenses_sums_all_categories() {
        assert_eq!(calculate_total_expenses(&household()), 11_000.0);
    }

    #[test]
    fn total_expenses_of_empty_map_is_zero() {
        assert_eq!(calculate_total_expenses(&ExpensesByCategory::new()), 0.0);
    }

    #[test]
    fn total_expenses_ignores_non_finite_amounts() {
        let map = expenses(&[
            ("home", "rent", 5_000.0),
            ("home", "broken", f64::NAN),
            ("other", "weird", f64::INFINITY),
        ]);

        assert_eq!(calculate_total_expenses(&map), 5_000.0);
    }

    #[test]
    fn total_expenses_counts_unknown_categories() {
        let map = expenses(&[("boat", "mooring", 750.0), ("food", "groceries", 250.0)]);

        assert_eq!(calculate_total_expenses(&map), 1_000.0);
    }

    #[test]
    fn category_total_sums_one_category() {
        assert_eq!(calculate_category_total(&household(), "home"), 6_000.0);
        assert_eq!(calculate_category_total(&household(), "food"), 5_000.0);
    }

    #[test]
    fn category_total_of_missing_category_is_zero() {
        assert_eq!(calculate_category_total(&household(), "leisure"), 0.0);
    }

    #[test]
    fn category_totals_lists_every_category() {
        let totals = category_totals(&household());

        assert_eq!(totals.len(), 2);
        assert_eq!(totals["home"], 6_000.0);
        assert_eq!(totals["food"], 5_000.0);
    }

    #[test]
    fn buffer_months_divides_savings_by_expenses() {
        assert_eq!(buffer_months(60_000.0, 20_000.0), Some(3.0));
        assert_eq!(buffer_months(60_000.0, 0.0), None);
    }
}
