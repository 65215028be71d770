//! Plain-text scenario report printed by the CLI.

use std::fmt;

use budget_core::calculations::{buffer_months, category_totals, debt_to_income_ratio};
use budget_core::format::{
    display_or_placeholder, format_currency, format_debt_ratio, format_percentage,
};
use budget_core::{CalculationResult, CalculatorState, ScenarioSummary};

pub struct ScenarioReport<'a> {
    state: &'a CalculatorState,
    results: &'a [CalculationResult],
}

impl<'a> ScenarioReport<'a> {
    pub fn new(
        state: &'a CalculatorState,
        results: &'a [CalculationResult],
    ) -> Self {
        Self { state, results }
    }

    fn write_table(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:>10} {:>12} {:>14} {:>16} {:>16}",
            "Interest", "Amortization", "Housing cost", "Total expenses", "Remaining"
        )?;
        for result in self.results {
            writeln!(
                f,
                "{:>10} {:>12} {:>14} {:>16} {:>16}",
                format_percentage(result.interest_rate, 2),
                format_percentage(result.amortization_rate, 2),
                format_currency(result.total_housing_cost, false),
                format_currency(result.total_expenses, false),
                format_currency(result.remaining_savings, false),
            )?;
        }
        Ok(())
    }

    fn write_summary(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let Some(summary) = ScenarioSummary::from_results(self.results) else {
            return writeln!(f, "No scenarios.");
        };
        // Income does not depend on the rate pair.
        let monthly_income = self.results.first().map(CalculationResult::total_income);
        let highest_expenses = self
            .results
            .iter()
            .map(|r| r.total_expenses)
            .fold(0.0, f64::max);

        writeln!(
            f,
            "Net monthly income:  {}",
            display_or_placeholder(monthly_income, |v| format_currency(v, false))
        )?;
        writeln!(
            f,
            "Debt to income:      {}",
            format_debt_ratio(monthly_income.and_then(|income| {
                debt_to_income_ratio(self.state.loan_parameters.amount, income)
            }))
        )?;
        writeln!(
            f,
            "Best remaining:      {}",
            format_currency(summary.best_remaining_savings, false)
        )?;
        writeln!(
            f,
            "Worst remaining:     {}",
            format_currency(summary.worst_remaining_savings, false)
        )?;
        writeln!(
            f,
            "Scenarios in deficit: {} of {}",
            summary.deficit_count, summary.scenario_count
        )?;
        writeln!(
            f,
            "Buffer covers:       {}",
            display_or_placeholder(
                buffer_months(self.state.income.current_buffer, highest_expenses),
                |months| format!("{months:.1} months"),
            )
        )
    }

    fn write_expenses(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let totals = category_totals(&self.state.expenses);
        if totals.is_empty() {
            return Ok(());
        }
        writeln!(f, "Expenses by category:")?;
        for (category, total) in totals {
            writeln!(f, "  {:<14} {:>14}", category, format_currency(total, false))?;
        }
        Ok(())
    }
}

impl fmt::Display for ScenarioReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.write_table(f)?;
        writeln!(f)?;
        self.write_summary(f)?;
        self.write_expenses(f)
    }
}

#[cfg(test)]
mod tests {
    use budget_core::{ExpensesByCategory, IncomeMode, IncomeState, LoanParameters};

    use super::*;

    fn test_state() -> CalculatorState {
        let mut expenses = ExpensesByCategory::new();
        expenses
            .entry("food".to_string())
            .or_default()
            .insert("groceries".to_string(), 4_000.0);

        CalculatorState {
            loan_parameters: LoanParameters::new(1_200_000.0, vec![3.5, 4.0], vec![2.0]),
            income: IncomeState {
                income1: 50_000.0,
                current_buffer: 90_000.0,
                ..IncomeState::default()
            },
            income_mode: IncomeMode::Net,
            expenses,
        }
    }

    fn render(state: &CalculatorState) -> String {
        let results = budget_core::calculate_loan_scenarios(state);
        ScenarioReport::new(state, &results).to_string()
    }

    #[test]
    fn report_has_one_row_per_scenario() {
        let report = render(&test_state());
        let table_rows = report
            .lines()
            .take_while(|line| !line.is_empty())
            .count();

        // header + two scenarios
        assert_eq!(table_rows, 3);
    }

    #[test]
    fn report_formats_rates_and_amounts() {
        let report = render(&test_state());

        assert!(report.contains("3,50\u{a0}%"));
        // 1 200 000 × (3.5 % + 2 %) / 12
        assert!(report.contains("5\u{a0}500\u{a0}kr"));
    }

    #[test]
    fn report_includes_summary_and_categories() {
        let report = render(&test_state());

        assert!(report.contains("Debt to income:      2.0x"));
        assert!(report.contains("Scenarios in deficit: 0 of 2"));
        assert!(report.contains("food"));
    }

    #[test]
    fn report_without_income_shows_placeholder_ratio() {
        let mut state = test_state();
        state.income = IncomeState::default();

        let report = render(&state);

        assert!(report.contains("Debt to income:      —"));
    }

    #[test]
    fn report_without_scenarios_says_so() {
        let mut state = test_state();
        state.loan_parameters.interest_rates.clear();

        assert!(render(&state).contains("No scenarios."));
    }
}
