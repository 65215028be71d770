use serde::{Deserialize, Serialize};

/// Loan principal and the candidate annual rates (in percent) to compare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub amount: f64,
    pub interest_rates: Vec<f64>,
    pub amortization_rates: Vec<f64>,

    /// When false no rate pairs are generated; see `ScenarioCalculator`.
    pub has_loan: bool,
}

impl LoanParameters {
    pub fn new(
        amount: f64,
        interest_rates: Vec<f64>,
        amortization_rates: Vec<f64>,
    ) -> Self {
        Self {
            amount,
            interest_rates,
            amortization_rates,
            has_loan: true,
        }
    }

    /// Number of (interest, amortization) pairs the cross-product produces.
    pub fn scenario_count(&self) -> usize {
        self.interest_rates.len() * self.amortization_rates.len()
    }
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self::new(0.0, vec![3.5, 4.0, 4.5], vec![1.0, 2.0])
    }
}
