use std::path::PathBuf;

use anyhow::Context;
use budget_core::{
    CalculatorState, IncomeMode, IncomeState, LoanParameters, ScenarioCalculator,
};
use budget_data::{CsvImporter, FileSource, export_to_csv};
use clap::Parser;
use tracing::{debug, info};

mod logging;
mod report;
mod settings;

use report::ScenarioReport;
use settings::{ScenarioDefaults, Settings};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Household budget and loan affordability calculator.
///
/// Loads a calculator state from CSV (or builds one from flags), prints the
/// monthly cost and remaining savings for every interest and amortization
/// rate combination, and can write the state back out as CSV.
#[derive(Debug, Parser)]
#[command(name = "budget-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// CSV file holding a calculator state. Overrides the state flags below.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// TOML settings file with tax constants and default rates.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the calculator state as CSV to this path.
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Loan amount in kronor.
    #[arg(long, default_value_t = 0.0)]
    amount: f64,

    /// Annual interest rates in percent, comma separated (e.g. `3.5,4`).
    #[arg(long, value_delimiter = ',')]
    interest_rates: Vec<f64>,

    /// Annual amortization rates in percent, comma separated.
    #[arg(long, value_delimiter = ',')]
    amortization_rates: Vec<f64>,

    /// Monthly main salary of the first adult.
    #[arg(long, default_value_t = 0.0)]
    income1: f64,

    /// Monthly main salary of the second adult.
    #[arg(long, default_value_t = 0.0)]
    income2: f64,

    /// Treat salaries as already net of tax.
    #[arg(long, default_value_t = false)]
    net: bool,

    /// Household has no loan; only the baseline scenario is shown.
    #[arg(long, default_value_t = false)]
    no_loan: bool,

    /// Log filter, e.g. `debug` or `budget_core=trace`. Defaults to RUST_LOG.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Builds a state from the flags, falling back to the configured rates
    /// when none are given.
    fn state_from_flags(
        &self,
        defaults: &ScenarioDefaults,
    ) -> CalculatorState {
        let interest_rates = if self.interest_rates.is_empty() {
            defaults.interest_rates.clone()
        } else {
            self.interest_rates.clone()
        };
        let amortization_rates = if self.amortization_rates.is_empty() {
            defaults.amortization_rates.clone()
        } else {
            self.amortization_rates.clone()
        };

        CalculatorState {
            loan_parameters: LoanParameters {
                has_loan: !self.no_loan,
                ..LoanParameters::new(self.amount, interest_rates, amortization_rates)
            },
            income: IncomeState {
                income1: self.income1,
                income2: self.income2,
                ..IncomeState::default()
            },
            income_mode: if self.net {
                IncomeMode::Net
            } else {
                IncomeMode::Gross
            },
            ..CalculatorState::default()
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    debug!(tax = ?settings.tax, "using tax constants");

    let state = match &cli.file {
        Some(path) => CsvImporter::new()
            .import(&FileSource::new(path))
            .await
            .with_context(|| format!("failed to import '{}'", path.display()))?,
        None => cli.state_from_flags(&settings.scenarios),
    };

    let results = ScenarioCalculator::new(&settings.tax).calculate(&state);
    println!("{}", ScenarioReport::new(&state, &results));

    if let Some(path) = &cli.export {
        let csv = export_to_csv(&state).context("failed to export calculator state")?;
        tokio::fs::write(path, csv)
            .await
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        info!(path = %path.display(), "exported calculator state");
    }

    Ok(())
}
