use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberOfAdults {
    #[default]
    One,
    Two,
}

impl NumberOfAdults {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "1" => Some(Self::One),
            "2" => Some(Self::Two),
            _ => None,
        }
    }
}

/// Whether the entered salaries are before or after tax.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomeMode {
    /// Salaries are gross and pass through the tax approximation.
    #[default]
    Gross,
    /// Salaries are already net and are used as entered.
    Net,
}

impl IncomeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gross => "gross",
            Self::Net => "net",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gross" => Some(Self::Gross),
            "net" => Some(Self::Net),
            _ => None,
        }
    }
}

/// Monthly household income as entered.
///
/// `income1` and `income2` are the main salaries of the first and second
/// adult. `income3` and `income4` are their secondary incomes, taxed at the
/// flat secondary rate. Benefits and other incomes are tax free.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeState {
    pub income1: f64,
    pub income2: f64,
    pub income3: f64,
    pub income4: f64,
    pub child_benefits: f64,
    pub other_benefits: f64,
    pub other_incomes: f64,

    /// Existing savings. Not part of monthly income.
    pub current_buffer: f64,
    pub number_of_adults: NumberOfAdults,
}
