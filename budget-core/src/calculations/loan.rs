//! Loan carrying costs.
//!
//! Rates are annual percentages; every cost returned here is monthly.

use serde::{Deserialize, Serialize};

use crate::LoanParameters;
use crate::calculations::common::{finite_or_zero, non_negative};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Monthly interest on `amount` at an annual `interest_rate` percent.
pub fn monthly_interest(
    amount: f64,
    interest_rate: f64,
) -> f64 {
    non_negative(amount) * (finite_or_zero(interest_rate) / 100.0) / MONTHS_PER_YEAR
}

/// Monthly amortization on `amount` at an annual `amortization_rate` percent.
pub fn monthly_amortization(
    amount: f64,
    amortization_rate: f64,
) -> f64 {
    non_negative(amount) * (finite_or_zero(amortization_rate) / 100.0) / MONTHS_PER_YEAR
}

/// Monthly housing cost of a loan at one rate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanCost {
    pub monthly_interest: f64,
    pub monthly_amortization: f64,
}

impl LoanCost {
    pub fn for_rates(
        amount: f64,
        interest_rate: f64,
        amortization_rate: f64,
    ) -> Self {
        Self {
            monthly_interest: monthly_interest(amount, interest_rate),
            monthly_amortization: monthly_amortization(amount, amortization_rate),
        }
    }

    pub fn total(&self) -> f64 {
        self.monthly_interest + self.monthly_amortization
    }
}

/// Cross-product of interest and amortization rates.
///
/// Interest rates form the outer loop and amortization rates the inner one,
/// both in input order, so `[3.5, 4] × [2, 3]` yields
/// `(3.5, 2), (3.5, 3), (4, 2), (4, 3)`.
pub fn loan_rate_pairs(params: &LoanParameters) -> Vec<(f64, f64)> {
    params
        .interest_rates
        .iter()
        .flat_map(|&interest| {
            params
                .amortization_rates
                .iter()
                .map(move |&amortization| (interest, amortization))
        })
        .collect()
}

/// Loan amount as a multiple of yearly income.
///
/// Returns `None` when the monthly income is not a positive finite number.
pub fn debt_to_income_ratio(
    amount: f64,
    monthly_income: f64,
) -> Option<f64> {
    let yearly_income = finite_or_zero(monthly_income) * MONTHS_PER_YEAR;
    if yearly_income <= 0.0 {
        return None;
    }
    Some(non_negative(amount) / yearly_income)
}
