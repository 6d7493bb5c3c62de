//! Pension amount calculation.
//!
//! Reductions are applied in a fixed order: the CSRS cap first, then the
//! early retirement reduction against the capped amount, then the survivor
//! reduction against the post-penalty amount.

use rust_decimal::Decimal;

use crate::config::CalculatorConfig;
use crate::models::{AuditStep, CalculationInput, RetirementSystem, SurvivorBenefit};

use super::multiplier::{MultiplierResolution, accrual_authority};

const MONTHS_PER_YEAR: u32 = 12;
const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// The full-precision pension figures and the audit steps that produced them.
#[derive(Debug, Clone)]
pub struct PensionCalculation {
    /// `salary * credited_years * multiplier` before any adjustment.
    pub base_annuity: Decimal,
    /// Annuity after the CSRS cap and early retirement reduction.
    pub annual_gross: Decimal,
    /// Annuity after the survivor reduction.
    pub annual_net: Decimal,
    /// `annual_net / 12`.
    pub monthly: Decimal,
    /// Early retirement reduction as a percentage.
    pub early_retirement_penalty_percent: Decimal,
    /// Early retirement reduction in dollars.
    pub early_retirement_reduction: Decimal,
    /// Survivor reduction as a percentage.
    pub survivor_reduction_percent: Decimal,
    /// Survivor reduction in dollars.
    pub survivor_benefit_amount: Decimal,
    /// Deferred annuity at the commencement age, when deferring.
    pub deferred_pension_at_62: Option<Decimal>,
    /// Audit steps, one per adjustment actually applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Percentage reduction for retiring `years_under` years before the MRA.
///
/// Clamped at 100 so the annuity never goes negative.
pub fn early_retirement_penalty_percent(years_under: u32, penalty_per_year: Decimal) -> Decimal {
    (Decimal::from(years_under) * penalty_per_year * ONE_HUNDRED).min(ONE_HUNDRED)
}

/// Computes the annual and monthly pension for an employee.
///
/// # Arguments
///
/// * `input` - The validated employment facts
/// * `resolution` - The multiplier and credited years from [`super::resolve_multiplier`]
/// * `config` - The calculator constants
/// * `step_number` - Number to give the first audit step
pub fn calculate_pension(
    input: &CalculationInput,
    resolution: &MultiplierResolution,
    config: &CalculatorConfig,
    step_number: u32,
) -> PensionCalculation {
    let mut audit_steps = Vec::new();
    let mut next_step = step_number;
    let salary = input.current_salary;
    let credited_years = resolution.credited_years;

    let base_annuity = salary * credited_years * resolution.multiplier;
    let mut annual_gross = base_annuity;

    audit_steps.push(AuditStep {
        step_number: next_step,
        rule_id: "pension_accrual".to_string(),
        rule_name: "Pension Accrual".to_string(),
        authority: accrual_authority(input.retirement_system).to_string(),
        input: serde_json::json!({
            "high3": salary.to_string(),
            "credited_years": credited_years.to_string(),
            "multiplier": resolution.multiplier.to_string()
        }),
        output: serde_json::json!({
            "annual_annuity": base_annuity.to_string()
        }),
        reasoning: format!(
            "${} x {} years x {} = ${}",
            salary, credited_years, resolution.multiplier, base_annuity
        ),
    });
    next_step += 1;

    if input.retirement_system == RetirementSystem::Csrs {
        let max_pension = salary * config.csrs.max_benefit_percent;
        let capped = annual_gross > max_pension;
        if capped {
            annual_gross = max_pension;
        }

        audit_steps.push(AuditStep {
            step_number: next_step,
            rule_id: "csrs_benefit_cap".to_string(),
            rule_name: "CSRS Maximum Benefit".to_string(),
            authority: "5 U.S.C. 8339".to_string(),
            input: serde_json::json!({
                "annual_annuity": base_annuity.to_string(),
                "max_benefit_percent": config.csrs.max_benefit_percent.to_string()
            }),
            output: serde_json::json!({
                "annual_annuity": annual_gross.to_string(),
                "capped": capped
            }),
            reasoning: if capped {
                format!("Annuity capped at ${} of salary ${}", max_pension, salary)
            } else {
                format!("Annuity is within the ${} ceiling", max_pension)
            },
        });
        next_step += 1;
    }

    let mut early_retirement_penalty_percent_applied = Decimal::ZERO;
    let mut early_retirement_reduction = Decimal::ZERO;

    // Strictly below the MRA; retiring at the MRA carries no reduction.
    if input.is_early_retirement && input.age < input.minimum_retirement_age {
        let years_under = input.minimum_retirement_age - input.age;
        early_retirement_penalty_percent_applied =
            early_retirement_penalty_percent(years_under, config.early_retirement.penalty_per_year);
        early_retirement_reduction =
            annual_gross * early_retirement_penalty_percent_applied / ONE_HUNDRED;
        let before = annual_gross;
        annual_gross -= early_retirement_reduction;

        audit_steps.push(AuditStep {
            step_number: next_step,
            rule_id: "early_retirement_reduction".to_string(),
            rule_name: "Early Retirement Reduction".to_string(),
            authority: "5 U.S.C. 8415".to_string(),
            input: serde_json::json!({
                "annual_annuity": before.to_string(),
                "age": input.age,
                "minimum_retirement_age": input.minimum_retirement_age
            }),
            output: serde_json::json!({
                "penalty_percent": early_retirement_penalty_percent_applied.to_string(),
                "reduction": early_retirement_reduction.to_string(),
                "annual_annuity": annual_gross.to_string()
            }),
            reasoning: format!(
                "{} years under MRA {} reduces the annuity by {}%",
                years_under, input.minimum_retirement_age, early_retirement_penalty_percent_applied
            ),
        });
        next_step += 1;
    }

    let survivor_fraction = match input.survivor_benefit {
        SurvivorBenefit::None => Decimal::ZERO,
        SurvivorBenefit::Partial => config.survivor_benefit.partial,
        SurvivorBenefit::Full => config.survivor_benefit.full,
    };
    let survivor_benefit_amount = annual_gross * survivor_fraction;
    let survivor_reduction_percent = survivor_fraction * ONE_HUNDRED;
    let annual_net = annual_gross - survivor_benefit_amount;

    if input.survivor_benefit != SurvivorBenefit::None {
        audit_steps.push(AuditStep {
            step_number: next_step,
            rule_id: "survivor_benefit_reduction".to_string(),
            rule_name: "Survivor Benefit Reduction".to_string(),
            authority: survivor_authority(input.retirement_system).to_string(),
            input: serde_json::json!({
                "annual_annuity": annual_gross.to_string(),
                "election": input.survivor_benefit
            }),
            output: serde_json::json!({
                "reduction_percent": survivor_reduction_percent.to_string(),
                "reduction": survivor_benefit_amount.to_string(),
                "annual_net": annual_net.to_string()
            }),
            reasoning: format!(
                "Survivor election reduces the annuity by {}% (${})",
                survivor_reduction_percent, survivor_benefit_amount
            ),
        });
        next_step += 1;
    }

    let monthly = annual_net / Decimal::from(MONTHS_PER_YEAR);

    // Service ends before the bonus age can be reached, so the deferred
    // annuity always accrues at the standard FERS rate.
    let deferred_pension_at_62 = if input.is_deferred_retirement
        && input.age < config.fers.deferred_commencement_age
    {
        let deferred = salary * credited_years * config.fers.standard_multiplier;

        audit_steps.push(AuditStep {
            step_number: next_step,
            rule_id: "deferred_annuity".to_string(),
            rule_name: "Deferred Annuity".to_string(),
            authority: "5 U.S.C. 8413".to_string(),
            input: serde_json::json!({
                "high3": salary.to_string(),
                "credited_years": credited_years.to_string(),
                "commencement_age": config.fers.deferred_commencement_age
            }),
            output: serde_json::json!({
                "annual_annuity": deferred.to_string()
            }),
            reasoning: format!(
                "Deferred annuity at age {} accrues at the standard {} rate: ${}",
                config.fers.deferred_commencement_age, config.fers.standard_multiplier, deferred
            ),
        });

        Some(deferred)
    } else {
        None
    };

    PensionCalculation {
        base_annuity,
        annual_gross,
        annual_net,
        monthly,
        early_retirement_penalty_percent: early_retirement_penalty_percent_applied,
        early_retirement_reduction,
        survivor_reduction_percent,
        survivor_benefit_amount,
        deferred_pension_at_62,
        audit_steps,
    }
}

fn survivor_authority(system: RetirementSystem) -> &'static str {
    match system {
        RetirementSystem::Fers => "5 U.S.C. 8419",
        RetirementSystem::Csrs => "5 U.S.C. 8339",
    }
}
