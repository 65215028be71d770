//! CSV export and import of the full calculator state.
//!
//! ## CSV Format
//!
//! One header row and one data row. Column order does not matter on import
//! (headers are matched by name) and names are case-sensitive.
//!
//! | Column | Required | Type | Notes |
//! |---------------------|----------|---------|--------------------------------------|
//! | `loanAmount` | yes | number | non-negative |
//! | `interestRates` | yes | numbers | annual %, `\|`-separated, e.g. `3.5\|4` |
//! | `amortizationRates` | yes | numbers | annual %, `\|`-separated |
//! | `income1` | yes | number | first adult, main salary |
//! | `income2` | yes | number | second adult, main salary |
//! | `secondaryIncome1` | yes | number | first adult, secondary income |
//! | `secondaryIncome2` | yes | number | second adult, secondary income |
//! | `childBenefits` | no | number | empty or missing → 0 |
//! | `otherBenefits` | no | number | empty or missing → 0 |
//! | `otherIncomes` | no | number | empty or missing → 0 |
//! | `currentBuffer` | no | number | empty or missing → 0 |
//! | `numberOfAdults` | no | string | `1` or `2`, default `1` |
//! | `hasLoan` | no | bool | `true` or `false`, default `true` |
//! | `incomeMode` | no | string | `gross` or `net`, default `gross` |
//! | `<category>.<sub>` | no | number | one column per expense |
//!
//! Every column whose name contains a `.` is an expense. The name is split
//! at the first `.`, so category ids cannot contain dots while subcategory
//! ids can. Empty expense cells are skipped.
//!
//! Cells are read and written with the `csv` crate, so values containing
//! commas are quoted rather than breaking the row.
//!
//! ### Example
//!
//! ```csv
//! loanAmount,interestRates,amortizationRates,income1,income2,secondaryIncome1,secondaryIncome2,home.rent
//! 1000000,3.5|4,2|3,30000,28000,0,0,5000
//! ```

use std::collections::HashMap;

use budget_core::calculations::common::{finite_or_zero, non_negative};
use budget_core::catalog::ordered_entries;
use budget_core::{
    CalculatorState, ExpensesByCategory, IncomeMode, IncomeState, LoanParameters, NumberOfAdults,
};
use tracing::{debug, warn};

use crate::error::CsvCodecError;

pub const LOAN_AMOUNT: &str = "loanAmount";
pub const INTEREST_RATES: &str = "interestRates";
pub const AMORTIZATION_RATES: &str = "amortizationRates";
pub const INCOME1: &str = "income1";
pub const INCOME2: &str = "income2";
pub const SECONDARY_INCOME1: &str = "secondaryIncome1";
pub const SECONDARY_INCOME2: &str = "secondaryIncome2";
pub const CHILD_BENEFITS: &str = "childBenefits";
pub const OTHER_BENEFITS: &str = "otherBenefits";
pub const OTHER_INCOMES: &str = "otherIncomes";
pub const CURRENT_BUFFER: &str = "currentBuffer";
pub const NUMBER_OF_ADULTS: &str = "numberOfAdults";
pub const HAS_LOAN: &str = "hasLoan";
pub const INCOME_MODE: &str = "incomeMode";

/// Columns that must be present in every imported file.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    LOAN_AMOUNT,
    INTEREST_RATES,
    AMORTIZATION_RATES,
    INCOME1,
    INCOME2,
    SECONDARY_INCOME1,
    SECONDARY_INCOME2,
];

const RATE_SEPARATOR: &str = "|";
const EXPENSE_SEPARATOR: char = '.';

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

fn join_rates(
    column: &str,
    rates: &[f64],
) -> Result<String, CsvCodecError> {
    if rates.is_empty() {
        return Err(CsvCodecError::validation(
            column,
            "",
            "must contain at least one rate",
        ));
    }
    Ok(rates
        .iter()
        .map(|&rate| finite_or_zero(rate).to_string())
        .collect::<Vec<_>>()
        .join(RATE_SEPARATOR))
}

fn amount(value: f64) -> String {
    non_negative(value).to_string()
}

/// Builds the `<category>.<sub>` header for an expense, rejecting ids that
/// would not read back as the same pair.
fn expense_column(
    category: &str,
    subcategory: &str,
) -> Result<String, CsvCodecError> {
    let column = format!("{category}{EXPENSE_SEPARATOR}{subcategory}");
    let reason = if category.is_empty() || subcategory.is_empty() {
        "category and subcategory ids must not be empty"
    } else if category.contains(EXPENSE_SEPARATOR) {
        "category id must not contain '.'"
    } else if category.trim() != category || subcategory.trim() != subcategory {
        "ids must not start or end with whitespace"
    } else {
        return Ok(column);
    };
    Err(CsvCodecError::validation(&column, &column, reason))
}

/// Serializes `state` as a header row plus a single data row.
///
/// Expense columns follow the catalog order, with ids outside the catalog
/// last. Non-finite numbers are written as `0` and negative amounts as `0`,
/// matching what the calculations use, so the output always imports again.
///
/// # Errors
///
/// * [`CsvCodecError::Validation`] – a rate list is empty, or an expense id
///   is empty, has a `.` in its category, or starts or ends with whitespace.
/// * [`CsvCodecError::Csv`] – the csv writer failed.
pub fn export_to_csv(state: &CalculatorState) -> Result<String, CsvCodecError> {
    let loan = &state.loan_parameters;
    let income = &state.income;

    let mut header: Vec<String> = vec![
        LOAN_AMOUNT,
        INTEREST_RATES,
        AMORTIZATION_RATES,
        INCOME1,
        INCOME2,
        SECONDARY_INCOME1,
        SECONDARY_INCOME2,
        CHILD_BENEFITS,
        OTHER_BENEFITS,
        OTHER_INCOMES,
        CURRENT_BUFFER,
        NUMBER_OF_ADULTS,
        HAS_LOAN,
        INCOME_MODE,
    ]
    .into_iter()
    .map(String::from)
    .collect();

    let mut values = vec![
        amount(loan.amount),
        join_rates(INTEREST_RATES, &loan.interest_rates)?,
        join_rates(AMORTIZATION_RATES, &loan.amortization_rates)?,
        amount(income.income1),
        amount(income.income2),
        amount(income.income3),
        amount(income.income4),
        amount(income.child_benefits),
        amount(income.other_benefits),
        amount(income.other_incomes),
        amount(income.current_buffer),
        income.number_of_adults.as_str().to_string(),
        loan.has_loan.to_string(),
        state.income_mode.as_str().to_string(),
    ];

    for entry in ordered_entries(&state.expenses) {
        header.push(expense_column(entry.category, entry.subcategory)?);
        values.push(amount(entry.amount));
    }

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(&header)?;
    writer.write_record(&values)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| CsvCodecError::Csv(csv::Error::from(e.into_error())))?;

    debug!(columns = header.len(), "exported calculator state");

    String::from_utf8(bytes).map_err(|e| CsvCodecError::InvalidFormat(e.to_string()))
}

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// The data row, keyed by header name.
struct CsvRow<'a> {
    cells: HashMap<&'a str, &'a str>,
}

impl<'a> CsvRow<'a> {
    fn required(
        &self,
        column: &str,
    ) -> Result<&'a str, CsvCodecError> {
        self.cells.get(column).copied().ok_or_else(|| {
            CsvCodecError::InvalidFormat(format!("missing required column '{column}'"))
        })
    }

    /// `None` when the column is absent or the cell is empty.
    fn optional(
        &self,
        column: &str,
    ) -> Option<&'a str> {
        self.cells
            .get(column)
            .copied()
            .filter(|value| !value.is_empty())
    }

    fn required_amount(
        &self,
        column: &str,
    ) -> Result<f64, CsvCodecError> {
        parse_amount(column, self.required(column)?)
    }

    fn optional_amount(
        &self,
        column: &str,
    ) -> Result<f64, CsvCodecError> {
        self.optional(column)
            .map_or(Ok(0.0), |value| parse_amount(column, value))
    }

    fn required_rates(
        &self,
        column: &str,
    ) -> Result<Vec<f64>, CsvCodecError> {
        parse_rates(column, self.required(column)?)
    }
}

fn parse_number(
    column: &str,
    value: &str,
) -> Result<f64, CsvCodecError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CsvCodecError::validation(column, value, "not a finite number"))
}

fn parse_amount(
    column: &str,
    value: &str,
) -> Result<f64, CsvCodecError> {
    let amount = parse_number(column, value)?;
    if amount < 0.0 {
        return Err(CsvCodecError::validation(column, value, "must not be negative"));
    }
    Ok(amount)
}

fn parse_rates(
    column: &str,
    value: &str,
) -> Result<Vec<f64>, CsvCodecError> {
    if value.is_empty() {
        return Err(CsvCodecError::validation(
            column,
            value,
            "must contain at least one rate",
        ));
    }
    value
        .split(RATE_SEPARATOR)
        .map(|rate| parse_number(column, rate.trim()))
        .collect()
}

fn parse_expenses(row: &CsvRow<'_>) -> Result<ExpensesByCategory, CsvCodecError> {
    let mut expenses = ExpensesByCategory::new();

    for (&column, &value) in &row.cells {
        let Some((category, subcategory)) = column.split_once(EXPENSE_SEPARATOR) else {
            continue;
        };
        if category.is_empty() || subcategory.is_empty() {
            return Err(CsvCodecError::InvalidFormat(format!(
                "invalid expense column '{column}'"
            )));
        }
        if value.is_empty() {
            debug!(column, "skipping empty expense cell");
            continue;
        }

        let amount = parse_amount(column, value)?;
        expenses
            .entry(category.to_string())
            .or_default()
            .insert(subcategory.to_string(), amount);
    }

    Ok(expenses)
}

fn parse_income(row: &CsvRow<'_>) -> Result<IncomeState, CsvCodecError> {
    let number_of_adults = match row.optional(NUMBER_OF_ADULTS) {
        Some(value) => NumberOfAdults::parse(value).ok_or_else(|| {
            CsvCodecError::validation(NUMBER_OF_ADULTS, value, "expected '1' or '2'")
        })?,
        None => NumberOfAdults::default(),
    };

    Ok(IncomeState {
        income1: row.required_amount(INCOME1)?,
        income2: row.required_amount(INCOME2)?,
        income3: row.required_amount(SECONDARY_INCOME1)?,
        income4: row.required_amount(SECONDARY_INCOME2)?,
        child_benefits: row.optional_amount(CHILD_BENEFITS)?,
        other_benefits: row.optional_amount(OTHER_BENEFITS)?,
        other_incomes: row.optional_amount(OTHER_INCOMES)?,
        current_buffer: row.optional_amount(CURRENT_BUFFER)?,
        number_of_adults,
    })
}

fn parse_loan(row: &CsvRow<'_>) -> Result<LoanParameters, CsvCodecError> {
    let has_loan = match row.optional(HAS_LOAN) {
        Some(value) => value
            .parse::<bool>()
            .map_err(|_| CsvCodecError::validation(HAS_LOAN, value, "expected 'true' or 'false'"))?,
        None => true,
    };

    Ok(LoanParameters {
        amount: row.required_amount(LOAN_AMOUNT)?,
        interest_rates: row.required_rates(INTEREST_RATES)?,
        amortization_rates: row.required_rates(AMORTIZATION_RATES)?,
        has_loan,
    })
}

/// Parses CSV text produced by [`export_to_csv`] (or written by hand in the
/// same layout) back into a calculator state.
///
/// Rows after the first data row are ignored. Columns without a `.` that
/// are not listed in the format table are ignored too.
///
/// # Errors
///
/// * [`CsvCodecError::InvalidFormat`] – no header or data row, header and
///   data row lengths differ, fewer than the required number of columns, a
///   column name appears twice, a required column is missing, or an expense
///   column name is malformed.
/// * [`CsvCodecError::Validation`] – a cell does not hold a valid value for
///   its column.
/// * [`CsvCodecError::Csv`] – the csv reader failed.
pub fn parse_csv(input: &str) -> Result<CalculatorState, CsvCodecError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // column counts are checked below with a clearer error
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let mut records = reader.records();
    let header = records
        .next()
        .ok_or_else(|| CsvCodecError::InvalidFormat("missing header row".to_string()))??;
    let data = records
        .next()
        .ok_or_else(|| CsvCodecError::InvalidFormat("missing data row".to_string()))??;
    if records.next().is_some() {
        warn!("CSV has more than one data row, only the first is used");
    }

    if header.len() != data.len() {
        return Err(CsvCodecError::InvalidFormat(format!(
            "header has {} columns but data row has {}",
            header.len(),
            data.len()
        )));
    }
    if header.len() < REQUIRED_COLUMNS.len() {
        return Err(CsvCodecError::InvalidFormat(format!(
            "expected at least {} columns, found {}",
            REQUIRED_COLUMNS.len(),
            header.len()
        )));
    }

    let mut cells = HashMap::with_capacity(header.len());
    for (column, value) in header.iter().zip(data.iter()) {
        if cells.insert(column, value).is_some() {
            return Err(CsvCodecError::InvalidFormat(format!(
                "duplicate column '{column}'"
            )));
        }
    }
    let row = CsvRow { cells };

    let state = CalculatorState {
        loan_parameters: parse_loan(&row)?,
        income: parse_income(&row)?,
        income_mode: match row.optional(INCOME_MODE) {
            Some(value) => IncomeMode::parse(value).ok_or_else(|| {
                CsvCodecError::validation(INCOME_MODE, value, "expected 'gross' or 'net'")
            })?,
            None => IncomeMode::default(),
        },
        expenses: parse_expenses(&row)?,
    };

    debug!(
        scenarios = state.loan_parameters.scenario_count(),
        categories = state.expenses.len(),
        "parsed calculator state"
    );

    Ok(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
