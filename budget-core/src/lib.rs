pub mod calculations;
pub mod catalog;
pub mod format;
pub mod models;

pub use calculations::{
    ScenarioCalculator, ScenarioSummary, TaxConfig, TaxConfigError, calculate_category_total,
    calculate_loan_scenarios, calculate_net_income, calculate_net_income_second,
    calculate_total_expenses,
};
pub use models::*;
