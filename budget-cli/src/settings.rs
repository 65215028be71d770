//! Optional TOML settings for the command-line front end.
//!
//! ```toml
//! [tax]
//! municipal_tax_rate = 0.325
//!
//! [scenarios]
//! interest_rates = [3.0, 3.5, 4.0]
//! amortization_rates = [1.0, 2.0]
//! ```
//!
//! Every key is optional; anything left out keeps its built-in default.
//! Unknown keys are rejected so a misspelled constant is not silently ignored.

use std::path::Path;

use anyhow::{Context, Result};
use budget_core::{LoanParameters, TaxConfig};
use serde::Deserialize;

/// Rates used when the state is built from command-line flags.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioDefaults {
    pub interest_rates: Vec<f64>,
    pub amortization_rates: Vec<f64>,
}

impl Default for ScenarioDefaults {
    fn default() -> Self {
        let loan = LoanParameters::default();
        Self {
            interest_rates: loan.interest_rates,
            amortization_rates: loan.amortization_rates,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tax: TaxConfig,
    pub scenarios: ScenarioDefaults,
}

impl Settings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text).context("invalid settings file")?;
        settings.tax.validate().context("invalid [tax] settings")?;
        if settings.scenarios.interest_rates.is_empty()
            || settings.scenarios.amortization_rates.is_empty()
        {
            anyhow::bail!("[scenarios] rate lists must not be empty");
        }
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings file '{}'", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("failed to load settings from '{}'", path.display()))
    }
}
