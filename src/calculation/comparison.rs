//! Break-even comparison between the net buyout and the net pension.

use rust_decimal::Decimal;

use crate::models::{AuditStep, RecommendationBand};

/// The full-precision comparison figures and their audit step.
#[derive(Debug, Clone)]
pub struct ComparisonCalculation {
    /// Years of net pension needed to equal the net buyout.
    pub break_even_years: Decimal,
    /// Five years of net pension minus the net buyout.
    pub difference_5_year: Decimal,
    /// Ten years of net pension minus the net buyout.
    pub difference_10_year: Decimal,
    /// The recommendation band for `break_even_years`.
    pub band: RecommendationBand,
    /// The audit step recording the comparison.
    pub audit_step: AuditStep,
}

/// Compares a net buyout with an annual net pension.
///
/// With no pension the break-even is reported as zero rather than dividing.
///
/// # Example
///
/// ```
/// use buyout_engine::calculation::compare_buyout_to_pension;
/// use buyout_engine::models::RecommendationBand;
/// use rust_decimal::Decimal;
///
/// let result = compare_buyout_to_pension(Decimal::from(40_000), Decimal::from(10_000), 1);
/// assert_eq!(result.break_even_years, Decimal::from(4));
/// assert_eq!(result.band, RecommendationBand::WithinFiveYears);
/// ```
pub fn compare_buyout_to_pension(
    net_buyout: Decimal,
    annual_pension_net: Decimal,
    step_number: u32,
) -> ComparisonCalculation {
    let break_even_years = if annual_pension_net > Decimal::ZERO {
        net_buyout / annual_pension_net
    } else {
        Decimal::ZERO
    };

    let difference_5_year = annual_pension_net * Decimal::from(5) - net_buyout;
    let difference_10_year = annual_pension_net * Decimal::from(10) - net_buyout;
    let band = RecommendationBand::from_break_even(break_even_years);

    let audit_step = AuditStep {
        step_number,
        rule_id: "break_even".to_string(),
        rule_name: "Break-Even Comparison".to_string(),
        authority: "estimate".to_string(),
        input: serde_json::json!({
            "net_buyout": net_buyout.to_string(),
            "annual_pension_net": annual_pension_net.to_string()
        }),
        output: serde_json::json!({
            "break_even_years": break_even_years.to_string(),
            "difference_5_year": difference_5_year.to_string(),
            "difference_10_year": difference_10_year.to_string(),
            "band": band
        }),
        reasoning: if annual_pension_net > Decimal::ZERO {
            format!(
                "${} net buyout / ${} annual pension = {} years",
                net_buyout, annual_pension_net, break_even_years
            )
        } else {
            "No pension accrues, break-even reported as zero".to_string()
        },
    };

    ComparisonCalculation {
        break_even_years,
        difference_5_year,
        difference_10_year,
        band,
        audit_step,
    }
}
