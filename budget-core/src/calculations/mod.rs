//! Household budget calculations.
//!
//! Every function here is a pure transform from an input snapshot to a
//! freshly built result. Bad numeric input never fails a calculation; it is
//! coalesced to zero instead.

pub mod common;
pub mod expenses;
pub mod loan;
pub mod scenarios;
pub mod tax;

pub use expenses::{
    buffer_months, calculate_category_total, calculate_total_expenses, category_totals,
};
pub use loan::{LoanCost, debt_to_income_ratio, loan_rate_pairs};
pub use scenarios::{ScenarioCalculator, ScenarioSummary, calculate_loan_scenarios};
pub use tax::{TaxConfig, TaxConfigError, calculate_net_income, calculate_net_income_second};
