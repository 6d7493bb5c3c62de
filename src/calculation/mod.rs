//! Calculation logic for the buyout engine.
//!
//! Each stage is a pure function over the validated input and one config
//! snapshot, returning its full-precision figures together with the audit
//! steps that explain them. [`evaluate`] chains the stages in order:
//! multiplier resolution, pension amount, severance, buyout gross,
//! withholding, and the break-even comparison.

mod buyout;
mod comparison;
mod engine;
mod multiplier;
mod pension;
mod rounding;
mod severance;
mod tax;

#[cfg(test)]
pub(crate) mod fixtures;

pub use buyout::{BuyoutSelection, select_buyout_gross};
pub use comparison::{ComparisonCalculation, compare_buyout_to_pension};
pub use engine::evaluate;
pub use multiplier::{
    MultiplierResolution, csrs_multiplier, fers_multiplier, resolve_multiplier,
    special_provisions_multiplier,
};
pub use pension::{PensionCalculation, calculate_pension, early_retirement_penalty_percent};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency};
pub use severance::{
    SeveranceCalculation, age_adjustment_factor, calculate_severance, severance_weeks,
};
pub use tax::{TaxCalculation, calculate_taxes};
