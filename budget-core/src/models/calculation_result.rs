use serde::{Deserialize, Serialize};

/// Outcome of one (interest rate, amortization rate) scenario.
///
/// All amounts are monthly. The income fields hold the amounts that were
/// actually summed, i.e. net of tax in gross mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub interest_rate: f64,
    pub amortization_rate: f64,
    pub monthly_interest: f64,
    pub monthly_amortization: f64,
    pub total_housing_cost: f64,
    pub total_expenses: f64,
    pub remaining_savings: f64,
    pub income1: f64,
    pub income2: f64,
    pub income3: f64,
    pub income4: f64,
    pub child_benefits: f64,
    pub other_benefits: f64,
    pub other_incomes: f64,
}

impl CalculationResult {
    pub fn total_income(&self) -> f64 {
        self.income1
            + self.income2
            + self.income3
            + self.income4
            + self.child_benefits
            + self.other_benefits
            + self.other_incomes
    }

    pub fn has_deficit(&self) -> bool {
        self.remaining_savings < 0.0
    }
}
