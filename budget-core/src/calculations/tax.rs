//! Simplified Swedish income tax approximation.
//!
//! Converts a monthly gross salary into a monthly net salary. The model is a
//! deliberate approximation built from a handful of constants:
//!
//! | Step | Primary earner |
//! |------|----------------|
//! | 1    | Taxable income = gross - basic allowance (minimum 0) |
//! | 2    | Tax = taxable × municipal rate |
//! | 3    | Tax -= in-work tax credit (jobbskatteavdrag) |
//! | 4    | Tax += (taxable - threshold) × state rate, when above threshold |
//! | 5    | Tax is clamped to [0, gross]; net = gross - tax |
//!
//! Secondary incomes (a second job, freelance work) skip the allowance and
//! the credit and are taxed at a single flat rate.
//!
//! # Example
//!
//! ```
//! use budget_core::calculations::{calculate_net_income, calculate_net_income_second};
//!
//! assert!((calculate_net_income(30_000.0) - 24_730.0).abs() < 1e-6);
//! assert!((calculate_net_income_second(30_000.0) - 20_100.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{finite_or_zero, non_negative};

/// Monthly basic allowance (grundavdrag) deducted before municipal tax.
pub const BASIC_ALLOWANCE: f64 = 3_000.0;

/// Flat municipal income tax rate.
pub const MUNICIPAL_TAX_RATE: f64 = 0.31;

/// Monthly taxable income above which state income tax applies.
pub const STATE_TAX_THRESHOLD: f64 = 50_000.0;

/// Marginal state income tax rate on taxable income above the threshold.
pub const STATE_TAX_RATE: f64 = 0.20;

/// Monthly in-work tax credit (jobbskatteavdrag).
pub const EMPLOYMENT_TAX_CREDIT: f64 = 3_100.0;

/// Flat rate applied to secondary incomes.
pub const SECONDARY_TAX_RATE: f64 = 0.33;

/// Errors reported by [`TaxConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum TaxConfigError {
    #[error("basic allowance must be a non-negative amount, got {0}")]
    InvalidBasicAllowance(f64),

    #[error("municipal tax rate must be between 0 and 1, got {0}")]
    InvalidMunicipalRate(f64),

    #[error("state tax threshold must be a non-negative amount, got {0}")]
    InvalidStateTaxThreshold(f64),

    #[error("state tax rate must be between 0 and 1, got {0}")]
    InvalidStateTaxRate(f64),

    #[error("employment tax credit must be a non-negative amount, got {0}")]
    InvalidEmploymentCredit(f64),

    #[error("secondary tax rate must be between 0 and 1, got {0}")]
    InvalidSecondaryRate(f64),
}

/// The constants behind the tax approximation.
///
/// [`TaxConfig::default`] uses the module-level constants. Any field left
/// out of a deserialized config falls back to its default; unknown fields
/// are an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaxConfig {
    pub basic_allowance: f64,
    pub municipal_tax_rate: f64,
    pub state_tax_threshold: f64,
    pub state_tax_rate: f64,
    pub employment_tax_credit: f64,
    pub secondary_tax_rate: f64,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            basic_allowance: BASIC_ALLOWANCE,
            municipal_tax_rate: MUNICIPAL_TAX_RATE,
            state_tax_threshold: STATE_TAX_THRESHOLD,
            state_tax_rate: STATE_TAX_RATE,
            employment_tax_credit: EMPLOYMENT_TAX_CREDIT,
            secondary_tax_rate: SECONDARY_TAX_RATE,
        }
    }
}

fn is_rate(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn is_amount(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

impl TaxConfig {
    /// Checks every constant against its valid range.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxConfigError`] found. Rates must lie in [0, 1]
    /// and amounts must be finite and non-negative.
    pub fn validate(&self) -> Result<(), TaxConfigError> {
        if !is_amount(self.basic_allowance) {
            return Err(TaxConfigError::InvalidBasicAllowance(
                self.basic_allowance,
            ));
        }
        if !is_rate(self.municipal_tax_rate) {
            return Err(TaxConfigError::InvalidMunicipalRate(
                self.municipal_tax_rate,
            ));
        }
        if !is_amount(self.state_tax_threshold) {
            return Err(TaxConfigError::InvalidStateTaxThreshold(
                self.state_tax_threshold,
            ));
        }
        if !is_rate(self.state_tax_rate) {
            return Err(TaxConfigError::InvalidStateTaxRate(self.state_tax_rate));
        }
        if !is_amount(self.employment_tax_credit) {
            return Err(TaxConfigError::InvalidEmploymentCredit(
                self.employment_tax_credit,
            ));
        }
        if !is_rate(self.secondary_tax_rate) {
            return Err(TaxConfigError::InvalidSecondaryRate(
                self.secondary_tax_rate,
            ));
        }
        Ok(())
    }

    /// Net monthly income for a primary salary.
    ///
    /// Non-finite or negative input is treated as zero, and zero gross
    /// always gives zero net. A non-finite result (only possible with an
    /// unvalidated config) is coalesced to zero.
    pub fn net_income(
        &self,
        gross: f64,
    ) -> f64 {
        let gross = non_negative(gross);
        if gross == 0.0 {
            return 0.0;
        }

        let taxable = self.taxable_income(gross);
        let tax = self.municipal_tax(taxable) - self.employment_tax_credit
            + self.state_tax(taxable);

        finite_or_zero(gross - tax.clamp(0.0, gross))
    }

    /// Net monthly income for a secondary salary (flat rate, no allowance,
    /// no credit).
    pub fn net_income_second(
        &self,
        gross: f64,
    ) -> f64 {
        let gross = non_negative(gross);
        finite_or_zero(gross * (1.0 - self.secondary_tax_rate))
    }

    fn taxable_income(
        &self,
        gross: f64,
    ) -> f64 {
        (gross - self.basic_allowance).max(0.0)
    }

    fn municipal_tax(
        &self,
        taxable: f64,
    ) -> f64 {
        taxable * self.municipal_tax_rate
    }

    fn state_tax(
        &self,
        taxable: f64,
    ) -> f64 {
        if taxable > self.state_tax_threshold {
            (taxable - self.state_tax_threshold) * self.state_tax_rate
        } else {
            0.0
        }
    }
}

/// Net monthly income for a primary salary using the default constants.
pub fn calculate_net_income(gross: f64) -> f64 {
    TaxConfig::default().net_income(gross)
}

/// Net monthly income for a secondary salary using the default constants.
pub fn calculate_net_income_second(gross: f64) -> f64 {
    TaxConfig::default().net_income_second(gross)
}
