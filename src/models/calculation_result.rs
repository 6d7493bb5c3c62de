//! Calculation result models for the buyout engine.
//!
//! This module contains the [`CalculationResult`] type and the projections it
//! is made of. Every monetary figure in these structures has already been
//! rounded to cents; the engine keeps full precision until it builds them.
//! Decimal fields serialize as JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pension projection for retiring instead of taking the buyout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionProjection {
    /// Annual annuity after the CSRS cap and any early retirement reduction.
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_gross: Decimal,
    /// Annual annuity after the survivor benefit reduction.
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_net: Decimal,
    /// `annual_net / 12`.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly: Decimal,
    /// Blended accrual rate applied to every credited year.
    #[serde(with = "rust_decimal::serde::float")]
    pub multiplier: Decimal,
    /// Salary used as the High-3 average.
    #[serde(with = "rust_decimal::serde::float")]
    pub high3: Decimal,
    /// Civilian plus military years.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_years_of_service: Decimal,
    /// Military years credited.
    #[serde(with = "rust_decimal::serde::float")]
    pub military_years_added: Decimal,
    /// Whether the special provisions accrual was used.
    pub is_special_provisions: bool,
    /// Early retirement reduction as a percentage.
    #[serde(with = "rust_decimal::serde::float")]
    pub early_retirement_penalty: Decimal,
    /// Early retirement reduction in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub early_retirement_reduction: Decimal,
    /// Survivor benefit reduction as a percentage.
    #[serde(with = "rust_decimal::serde::float")]
    pub survivor_benefit_reduction: Decimal,
    /// Survivor benefit reduction in dollars.
    #[serde(with = "rust_decimal::serde::float")]
    pub survivor_benefit_amount: Decimal,
    /// `"FERS"` or `"CSRS"`.
    pub retirement_system: String,
    /// Annual annuity payable at the deferred commencement age, when deferring.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub deferred_pension_at_62: Option<Decimal>,
}

/// Severance pay projection under the OPM formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeveranceProjection {
    /// One week of basic pay.
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_rate: Decimal,
    /// Weeks of pay credited for service.
    #[serde(with = "rust_decimal::serde::float")]
    pub basic_weeks: Decimal,
    /// `basic_weeks * weekly_rate`.
    #[serde(with = "rust_decimal::serde::float")]
    pub basic_amount: Decimal,
    /// Multiplier applied for age over the adjustment base.
    #[serde(with = "rust_decimal::serde::float")]
    pub age_adjustment_factor: Decimal,
    /// Capped total minus the basic amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub age_adjustment_amount: Decimal,
    /// Severance after the salary cap.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_gross: Decimal,
}

/// Flat-rate withholding on the buyout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    /// Federal withholding.
    #[serde(with = "rust_decimal::serde::float")]
    pub federal: Decimal,
    /// Social Security withholding.
    #[serde(with = "rust_decimal::serde::float")]
    pub social_security: Decimal,
    /// Medicare withholding.
    #[serde(with = "rust_decimal::serde::float")]
    pub medicare: Decimal,
    /// State withholding.
    #[serde(with = "rust_decimal::serde::float")]
    pub state: Decimal,
    /// Sum of the four components above.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
}

/// The buyout before and after withholding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyoutProjection {
    /// Gross buyout.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
    /// `gross - taxes.total_tax`.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    /// Withholding by category.
    pub taxes: TaxBreakdown,
}

/// The break-even band a comparison falls into.
///
/// # Example
///
/// ```
/// use buyout_engine::models::RecommendationBand;
/// use rust_decimal::Decimal;
///
/// let band = RecommendationBand::from_break_even(Decimal::from(4));
/// assert_eq!(band, RecommendationBand::WithinFiveYears);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationBand {
    /// Break-even at or under 3 years.
    WithinThreeYears,
    /// Break-even over 3 and at or under 5 years.
    WithinFiveYears,
    /// Break-even over 5 and at or under 10 years.
    WithinTenYears,
    /// Break-even over 10 years.
    OverTenYears,
}

impl RecommendationBand {
    /// Picks the band for a break-even figure. Boundaries are inclusive.
    pub fn from_break_even(years: Decimal) -> Self {
        if years <= Decimal::from(3) {
            Self::WithinThreeYears
        } else if years <= Decimal::from(5) {
            Self::WithinFiveYears
        } else if years <= Decimal::from(10) {
            Self::WithinTenYears
        } else {
            Self::OverTenYears
        }
    }

    /// The advisory sentence shown for this band.
    pub fn message(self) -> &'static str {
        match self {
            Self::WithinThreeYears => {
                "The buyout may be attractive if you have immediate financial needs or private sector opportunities. Your pension would exceed the buyout value within 3 years."
            }
            Self::WithinFiveYears => {
                "Consider your job prospects carefully. The pension catches up to the buyout within 5 years, making it valuable long-term."
            }
            Self::WithinTenYears => {
                "The buyout offers significant upfront value. If you're confident in private sector earnings or have other retirement savings, it could be worthwhile."
            }
            Self::OverTenYears => {
                "The buyout is very attractive financially. Your pension would take over 10 years to match it. Consider your career plans and financial situation."
            }
        }
    }
}

/// Buyout versus pension comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Years of net pension needed to equal the net buyout. Zero when there is no pension.
    #[serde(with = "rust_decimal::serde::float")]
    pub break_even_years: Decimal,
    /// Five years of net pension minus the net buyout. Signed.
    #[serde(with = "rust_decimal::serde::float")]
    pub difference_5_year: Decimal,
    /// Ten years of net pension minus the net buyout. Signed.
    #[serde(with = "rust_decimal::serde::float")]
    pub difference_10_year: Decimal,
    /// Band the break-even figure fell into.
    pub recommendation_band: RecommendationBand,
    /// Advisory sentence for the band.
    pub recommendation: String,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Statute the rule comes from.
    pub authority: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of one evaluation.
///
/// Two evaluations of the same input and config produce equal results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Pension projection.
    pub pension: PensionProjection,
    /// Severance projection.
    pub severance: SeveranceProjection,
    /// Buyout projection.
    pub buyout: BuyoutProjection,
    /// Break-even comparison.
    pub comparison: Comparison,
    /// Every rule decision, in pipeline order.
    pub audit_trace: Vec<AuditStep>,
}
