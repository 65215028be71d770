mod calculation_result;
mod calculator_state;
mod expenses;
mod income;
mod loan_parameters;

pub use calculation_result::CalculationResult;
pub use calculator_state::CalculatorState;
pub use expenses::ExpensesByCategory;
pub use income::{IncomeMode, IncomeState, NumberOfAdults};
pub use loan_parameters::LoanParameters;
