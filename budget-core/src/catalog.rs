//! Catalog of known expense categories.
//!
//! The catalog fixes the order categories and subcategories are shown and
//! exported in. Expense maps may hold ids that are not listed here; those
//! are still summed by the aggregator, and [`ordered_entries`] places them
//! after the catalog entries in sorted order.

use crate::ExpensesByCategory;

/// A known category and its subcategories, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpenseCategory {
    pub id: &'static str,
    pub subcategories: &'static [&'static str],
}

pub const EXPENSE_CATALOG: &[ExpenseCategory] = &[
    ExpenseCategory {
        id: "home",
        subcategories: &[
            "rent",
            "electricity",
            "heating",
            "water",
            "home_insurance",
            "internet",
            "maintenance",
        ],
    },
    ExpenseCategory {
        id: "transport",
        subcategories: &[
            "fuel",
            "public_transport",
            "car_insurance",
            "car_loan",
            "parking",
            "car_maintenance",
        ],
    },
    ExpenseCategory {
        id: "food",
        subcategories: &["groceries", "eating_out", "lunch"],
    },
    ExpenseCategory {
        id: "children",
        subcategories: &["childcare", "activities", "clothing", "allowance"],
    },
    ExpenseCategory {
        id: "insurance",
        subcategories: &["life", "accident", "income"],
    },
    ExpenseCategory {
        id: "personal",
        subcategories: &["clothing", "hygiene", "health", "phone"],
    },
    ExpenseCategory {
        id: "leisure",
        subcategories: &["streaming", "gym", "hobbies", "travel"],
    },
    ExpenseCategory {
        id: "savings",
        subcategories: &["pension", "buffer", "investments"],
    },
    ExpenseCategory {
        id: "other",
        subcategories: &["subscriptions", "gifts", "miscellaneous"],
    },
];

/// One expense amount with its location in the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseEntry<'a> {
    pub category: &'a str,
    pub subcategory: &'a str,
    pub amount: f64,
}

pub fn find_category(id: &str) -> Option<&'static ExpenseCategory> {
    EXPENSE_CATALOG.iter().find(|c| c.id == id)
}

pub fn is_known(
    category: &str,
    subcategory: &str,
) -> bool {
    find_category(category).is_some_and(|c| c.subcategories.iter().any(|&s| s == subcategory))
}

/// Every entry of `expenses`: catalog entries first in catalog order, then
/// the rest sorted by category and subcategory id.
pub fn ordered_entries(expenses: &ExpensesByCategory) -> Vec<ExpenseEntry<'_>> {
    let mut entries = catalog_entries(expenses);
    entries.extend(
        expenses
            .iter()
            .flat_map(|(category, subcategories)| {
                subcategories
                    .iter()
                    .map(move |(subcategory, &amount)| ExpenseEntry {
                        category,
                        subcategory,
                        amount,
                    })
            })
            .filter(|entry| !is_known(entry.category, entry.subcategory)),
    );
    entries
}

/// Only the entries of `expenses` that appear in the catalog, in catalog
/// order.
pub fn catalog_entries(expenses: &ExpensesByCategory) -> Vec<ExpenseEntry<'_>> {
    let mut entries = Vec::new();
    for category in EXPENSE_CATALOG {
        let Some((category_id, subcategories)) = expenses.get_key_value(category.id) else {
            continue;
        };
        for &subcategory in category.subcategories {
            if let Some((subcategory_id, &amount)) = subcategories.get_key_value(subcategory) {
                entries.push(ExpenseEntry {
                    category: category_id,
                    subcategory: subcategory_id,
                    amount,
                });
            }
        }
    }
    entries
}
