//! The validated input record and its enumerations.
//!
//! A [`CalculationInput`] is only ever built by the request validator, so the
//! engine can trust every range constraint documented on its fields.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The federal retirement system the employee is covered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetirementSystem {
    /// Federal Employees Retirement System.
    #[default]
    Fers,
    /// Civil Service Retirement System.
    Csrs,
}

impl RetirementSystem {
    /// Parses a wire token (`"fers"` or `"csrs"`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "fers" => Some(Self::Fers),
            "csrs" => Some(Self::Csrs),
            _ => None,
        }
    }

    /// The display label used in results.
    ///
    /// ```
    /// use buyout_engine::models::RetirementSystem;
    ///
    /// assert_eq!(RetirementSystem::Csrs.label(), "CSRS");
    /// ```
    pub fn label(self) -> &'static str {
        match self {
            Self::Fers => "FERS",
            Self::Csrs => "CSRS",
        }
    }
}

/// The survivor annuity elected at retirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurvivorBenefit {
    /// No survivor annuity.
    #[default]
    None,
    /// Partial survivor annuity.
    Partial,
    /// Full survivor annuity.
    Full,
}

impl SurvivorBenefit {
    /// Parses a wire token (`"none"`, `"partial"` or `"full"`).
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "none" => Some(Self::None),
            "partial" => Some(Self::Partial),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

/// How the gross buyout amount is determined.
///
/// The custom amount travels with its variant, so a custom buyout without an
/// amount cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuyoutMode {
    /// An offer amount supplied by the employee.
    Custom(Decimal),
    /// A fixed number of months of salary from config (wire token `"8month"`).
    #[default]
    FixedMonths,
    /// The OPM severance formula.
    Severance,
}

impl BuyoutMode {
    /// The wire token for this mode.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Custom(_) => "custom",
            Self::FixedMonths => "8month",
            Self::Severance => "severance",
        }
    }
}

/// One evaluation's worth of employment facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationInput {
    /// Current annual salary, used as the High-3. Always positive.
    pub current_salary: Decimal,
    /// Civilian years of service. Never negative.
    pub years_of_service: Decimal,
    /// Age in whole years, at least 18.
    pub age: u32,
    /// Retirement system.
    pub retirement_system: RetirementSystem,
    /// Special provisions position. Only meaningful under FERS.
    pub is_special_provisions: bool,
    /// Bought-back military years, 0 to 40. Credited to the pension only.
    pub military_years: Decimal,
    /// Service ends now and the annuity starts later.
    pub is_deferred_retirement: bool,
    /// Retiring before the minimum retirement age with a reduction.
    pub is_early_retirement: bool,
    /// Minimum retirement age, 55 to 57.
    pub minimum_retirement_age: u32,
    /// Survivor annuity election.
    pub survivor_benefit: SurvivorBenefit,
    /// How the buyout is sized.
    pub buyout_mode: BuyoutMode,
    /// State income tax as a percentage, 0 to 100.
    pub state_tax_rate: Decimal,
}

impl CalculationInput {
    /// Years credited toward the pension, including military buyback.
    pub fn credited_years(&self) -> Decimal {
        self.years_of_service + self.military_years
    }

    /// Whether the special provisions accrual applies.
    ///
    /// The flag is ignored for CSRS employees.
    pub fn uses_special_provisions(&self) -> bool {
        self.is_special_provisions && self.retirement_system == RetirementSystem::Fers
    }
}
