use std::collections::BTreeMap;

/// Monthly expenses keyed by category id, then subcategory id.
///
/// Keys are free-form. The known ids live in [`crate::catalog`]; anything
/// else is carried along and still counted.
pub type ExpensesByCategory = BTreeMap<String, BTreeMap<String, f64>>;
