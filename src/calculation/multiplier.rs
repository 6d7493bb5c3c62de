//! Pension multiplier resolution.
//!
//! Every retirement system is reduced to one blended accrual rate that applies
//! to all credited years, so the amount calculation downstream is always
//! `salary * years * multiplier`.

use rust_decimal::Decimal;

use crate::config::{CalculatorConfig, CsrsConfig, FersConfig, SpecialProvisionsConfig};
use crate::models::{AuditStep, CalculationInput, RetirementSystem};

/// The resolved multiplier, the years it applies to, and its audit step.
#[derive(Debug, Clone)]
pub struct MultiplierResolution {
    /// Blended annual accrual rate.
    pub multiplier: Decimal,
    /// Civilian plus military years the rate applies to.
    pub credited_years: Decimal,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Flat FERS rate: the bonus rate once both the age and the credited-years
/// thresholds are met, otherwise the standard rate.
pub fn fers_multiplier(age: u32, credited_years: Decimal, fers: &FersConfig) -> Decimal {
    if age >= fers.bonus_age_requirement && credited_years >= fers.bonus_years_requirement {
        fers.bonus_multiplier
    } else {
        fers.standard_multiplier
    }
}

/// Special provisions rate: enhanced accrual for the first period, the after
/// rate for the rest, averaged over all credited years.
pub fn special_provisions_multiplier(
    credited_years: Decimal,
    special: &SpecialProvisionsConfig,
) -> Decimal {
    // credited_years > enhanced_years >= 0 here, so the division is safe.
    if credited_years > special.enhanced_years {
        let enhanced = special.enhanced_years * special.first_20_years_multiplier;
        let after =
            (credited_years - special.enhanced_years) * special.after_20_years_multiplier;
        (enhanced + after) / credited_years
    } else {
        special.first_20_years_multiplier
    }
}

/// CSRS rate averaged over the tiers actually reached.
///
/// Service inside the first tier (zero years included) gets the flat tier-1
/// rate and never divides.
///
/// # Example
///
/// ```
/// use buyout_engine::calculation::csrs_multiplier;
/// use buyout_engine::config::CsrsConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let csrs = CsrsConfig {
///     tier1_multiplier: d("0.015"),
///     tier1_years: d("5"),
///     tier2_multiplier: d("0.0175"),
///     tier2_years: d("5"),
///     tier3_multiplier: d("0.02"),
///     max_benefit_percent: d("0.80"),
/// };
/// assert_eq!(csrs_multiplier(d("10"), &csrs), d("0.01625"));
/// ```
pub fn csrs_multiplier(credited_years: Decimal, csrs: &CsrsConfig) -> Decimal {
    let tier2_end = csrs.tier1_years + csrs.tier2_years;
    let tier1_accrual = csrs.tier1_years * csrs.tier1_multiplier;

    if credited_years <= csrs.tier1_years {
        csrs.tier1_multiplier
    } else if credited_years <= tier2_end {
        let tier2_accrual = (credited_years - csrs.tier1_years) * csrs.tier2_multiplier;
        (tier1_accrual + tier2_accrual) / credited_years
    } else {
        let tier2_accrual = csrs.tier2_years * csrs.tier2_multiplier;
        let tier3_accrual = (credited_years - tier2_end) * csrs.tier3_multiplier;
        (tier1_accrual + tier2_accrual + tier3_accrual) / credited_years
    }
}

/// Resolves the accrual multiplier for an employee.
///
/// Military buyback years count toward both the credited years and the FERS
/// bonus threshold. CSRS employees ignore the special provisions flag. With no
/// credited service there is nothing to blend and the multiplier is zero.
pub fn resolve_multiplier(
    input: &CalculationInput,
    config: &CalculatorConfig,
    step_number: u32,
) -> MultiplierResolution {
    let credited_years = input.credited_years();

    let (multiplier, rule, authority, reasoning) = match input.retirement_system {
        _ if credited_years.is_zero() => (
            Decimal::ZERO,
            "no_credited_service",
            accrual_authority(input.retirement_system),
            "No credited service, so no accrual rate applies".to_string(),
        ),
        RetirementSystem::Csrs => {
            let multiplier = csrs_multiplier(credited_years, &config.csrs);
            (
                multiplier,
                "csrs_tiered",
                "5 U.S.C. 8339",
                format!(
                    "CSRS tiers over {} credited years blend to {}",
                    credited_years, multiplier
                ),
            )
        }
        RetirementSystem::Fers if input.uses_special_provisions() => {
            let multiplier =
                special_provisions_multiplier(credited_years, &config.special_provisions);
            (
                multiplier,
                "fers_special_provisions",
                "5 U.S.C. 8415",
                format!(
                    "Special provisions accrual over {} credited years blends to {}",
                    credited_years, multiplier
                ),
            )
        }
        RetirementSystem::Fers => {
            let multiplier = fers_multiplier(input.age, credited_years, &config.fers);
            let reasoning = if multiplier == config.fers.bonus_multiplier
                && multiplier != config.fers.standard_multiplier
            {
                format!(
                    "Age {} with {} credited years qualifies for the {} bonus rate",
                    input.age, credited_years, multiplier
                )
            } else {
                format!(
                    "Age {} with {} credited years uses the {} standard rate",
                    input.age, credited_years, multiplier
                )
            };
            (multiplier, "fers_flat", "5 U.S.C. 8415", reasoning)
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pension_multiplier".to_string(),
        rule_name: "Pension Multiplier".to_string(),
        authority: authority.to_string(),
        input: serde_json::json!({
            "retirement_system": input.retirement_system.label(),
            "years_of_service": input.years_of_service.to_string(),
            "military_years": input.military_years.to_string(),
            "age": input.age,
            "special_provisions": input.uses_special_provisions()
        }),
        output: serde_json::json!({
            "multiplier": multiplier.to_string(),
            "credited_years": credited_years.to_string(),
            "rule": rule
        }),
        reasoning,
    };

    MultiplierResolution {
        multiplier,
        credited_years,
        audit_step,
    }
}

pub(super) fn accrual_authority(system: RetirementSystem) -> &'static str {
    match system {
        RetirementSystem::Fers => "5 U.S.C. 8415",
        RetirementSystem::Csrs => "5 U.S.C. 8339",
    }
}
