//! Scenario orchestration.
//!
//! Combines tax, loan and expense calculations into one
//! [`CalculationResult`] per (interest rate, amortization rate) pair.
//!
//! # Zero loans
//!
//! * `has_loan == false`: no rate pairs are generated. A single baseline
//!   result with both rates at 0 and no housing cost is returned so the
//!   household's savings are still reported.
//! * `has_loan == true` with `amount == 0`: one row per rate pair, each with
//!   zero housing cost.
//!
//! # Example
//!
//! ```
//! use budget_core::{CalculatorState, LoanParameters, calculate_loan_scenarios};
//!
//! let state = CalculatorState {
//!     loan_parameters: LoanParameters::new(1_000_000.0, vec![3.5, 4.0], vec![2.0, 3.0]),
//!     ..CalculatorState::default()
//! };
//!
//! let results = calculate_loan_scenarios(&state);
//! let rates: Vec<_> = results
//!     .iter()
//!     .map(|r| (r.interest_rate, r.amortization_rate))
//!     .collect();
//!
//! assert_eq!(rates, vec![(3.5, 2.0), (3.5, 3.0), (4.0, 2.0), (4.0, 3.0)]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::non_negative;
use crate::calculations::expenses::calculate_total_expenses;
use crate::calculations::loan::{LoanCost, loan_rate_pairs};
use crate::calculations::tax::TaxConfig;
use crate::{CalculationResult, CalculatorState, IncomeMode, IncomeState};

/// Monthly incomes after the income mode has been applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct EffectiveIncome {
    income1: f64,
    income2: f64,
    income3: f64,
    income4: f64,
    child_benefits: f64,
    other_benefits: f64,
    other_incomes: f64,
}

impl EffectiveIncome {
    fn total(&self) -> f64 {
        self.income1
            + self.income2
            + self.income3
            + self.income4
            + self.child_benefits
            + self.other_benefits
            + self.other_incomes
    }
}

/// Builds scenario results for a calculator state.
///
/// Holds nothing but the tax constants, so the same calculator can be
/// reused for any number of states and always returns the same results for
/// the same input.
#[derive(Debug, Clone)]
pub struct ScenarioCalculator<'a> {
    tax_config: &'a TaxConfig,
}

impl<'a> ScenarioCalculator<'a> {
    /// An invalid config is logged but still used; every computed amount is
    /// kept finite either way.
    pub fn new(tax_config: &'a TaxConfig) -> Self {
        if let Err(err) = tax_config.validate() {
            warn!(error = %err, "tax config failed validation");
        }
        Self { tax_config }
    }

    /// Calculates every scenario for `state`.
    ///
    /// Results are ordered interest rate first, then amortization rate, both
    /// in the order given. Total expenses are housing cost plus all category
    /// expenses; remaining savings are total income minus total expenses.
    pub fn calculate(
        &self,
        state: &CalculatorState,
    ) -> Vec<CalculationResult> {
        let income = self.effective_income(&state.income, state.income_mode);
        let category_expenses = calculate_total_expenses(&state.expenses);
        let loan = &state.loan_parameters;

        if !loan.has_loan {
            debug!("no loan, returning baseline scenario only");
            return vec![self.build_result(0.0, 0.0, LoanCost::default(), &income, category_expenses)];
        }

        if loan.interest_rates.is_empty() || loan.amortization_rates.is_empty() {
            warn!(
                interest_rates = loan.interest_rates.len(),
                amortization_rates = loan.amortization_rates.len(),
                "empty rate list, no scenarios generated"
            );
        }

        let results: Vec<CalculationResult> = loan_rate_pairs(loan)
            .into_iter()
            .map(|(interest_rate, amortization_rate)| {
                let cost = LoanCost::for_rates(loan.amount, interest_rate, amortization_rate);
                self.build_result(
                    interest_rate,
                    amortization_rate,
                    cost,
                    &income,
                    category_expenses,
                )
            })
            .collect();

        debug!(
            scenarios = results.len(),
            amount = loan.amount,
            total_income = income.total(),
            category_expenses,
            "calculated loan scenarios"
        );

        results
    }

    fn effective_income(
        &self,
        income: &IncomeState,
        mode: IncomeMode,
    ) -> EffectiveIncome {
        let (income1, income2, income3, income4) = match mode {
            IncomeMode::Gross => (
                self.tax_config.net_income(income.income1),
                self.tax_config.net_income(income.income2),
                self.tax_config.net_income_second(income.income3),
                self.tax_config.net_income_second(income.income4),
            ),
            IncomeMode::Net => (
                non_negative(income.income1),
                non_negative(income.income2),
                non_negative(income.income3),
                non_negative(income.income4),
            ),
        };

        EffectiveIncome {
            income1,
            income2,
            income3,
            income4,
            child_benefits: non_negative(income.child_benefits),
            other_benefits: non_negative(income.other_benefits),
            other_incomes: non_negative(income.other_incomes),
        }
    }

    fn build_result(
        &self,
        interest_rate: f64,
        amortization_rate: f64,
        cost: LoanCost,
        income: &EffectiveIncome,
        category_expenses: f64,
    ) -> CalculationResult {
        let total_housing_cost = cost.total();
        let total_expenses = total_housing_cost + category_expenses;

        CalculationResult {
            interest_rate,
            amortization_rate,
            monthly_interest: cost.monthly_interest,
            monthly_amortization: cost.monthly_amortization,
            total_housing_cost,
            total_expenses,
            remaining_savings: income.total() - total_expenses,
            income1: income.income1,
            income2: income.income2,
            income3: income.income3,
            income4: income.income4,
            child_benefits: income.child_benefits,
            other_benefits: income.other_benefits,
            other_incomes: income.other_incomes,
        }
    }
}

/// Calculates every scenario for `state` with the default tax constants.
pub fn calculate_loan_scenarios(state: &CalculatorState) -> Vec<CalculationResult> {
    let tax_config = TaxConfig::default();
    ScenarioCalculator::new(&tax_config).calculate(state)
}

/// Best case, worst case and deficit count across a set of scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub scenario_count: usize,
    pub best_remaining_savings: f64,
    pub worst_remaining_savings: f64,
    pub deficit_count: usize,
}

impl ScenarioSummary {
    /// Returns `None` for an empty result list.
    pub fn from_results(results: &[CalculationResult]) -> Option<Self> {
        let first = results.first()?;
        let (best, worst) = results.iter().fold(
            (first.remaining_savings, first.remaining_savings),
            |(best, worst), result| {
                (
                    best.max(result.remaining_savings),
                    worst.min(result.remaining_savings),
                )
            },
        );

        Some(Self {
            scenario_count: results.len(),
            best_remaining_savings: best,
            worst_remaining_savings: worst,
            deficit_count: results.iter().filter(|r| r.has_deficit()).count(),
        })
    }
}
