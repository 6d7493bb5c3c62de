//! Output-boundary rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places for every reported monetary figure.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds a full-precision amount to cents, halves away from zero.
///
/// # Example
///
/// ```
/// use buyout_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rounded = round_currency(Decimal::from_str("1062.505").unwrap());
/// assert_eq!(rounded, Decimal::from_str("1062.51").unwrap());
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
