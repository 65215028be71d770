use serde::{Deserialize, Serialize};

use super::{ExpensesByCategory, IncomeMode, IncomeState, LoanParameters};

/// Snapshot of everything the calculator needs. Owned by the caller and
/// only ever borrowed by the calculation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    pub loan_parameters: LoanParameters,
    pub income: IncomeState,
    pub income_mode: IncomeMode,
    pub expenses: ExpensesByCategory,
}
