//! The evaluation pipeline.
//!
//! `evaluate` runs every stage once, in order: multiplier, pension, severance,
//! buyout gross, withholding, comparison. It performs no I/O and keeps no
//! state between calls, so it is safe to call from any number of threads with
//! a shared config snapshot.

use crate::config::CalculatorConfig;
use crate::models::{
    BuyoutProjection, CalculationInput, CalculationResult, Comparison, PensionProjection,
    SeveranceProjection, TaxBreakdown,
};

use super::buyout::select_buyout_gross;
use super::comparison::compare_buyout_to_pension;
use super::multiplier::resolve_multiplier;
use super::pension::calculate_pension;
use super::rounding::round_currency;
use super::severance::calculate_severance;
use super::tax::calculate_taxes;

/// Evaluates one buyout-versus-pension scenario.
///
/// Intermediate figures keep full decimal precision; money is rounded to cents
/// only when the result record is assembled. The reported tax total is the sum
/// of the rounded components and the reported net is the rounded gross minus
/// that total, so both identities hold exactly on the output.
///
/// # Example
///
/// ```no_run
/// use buyout_engine::calculation::evaluate;
/// use buyout_engine::config::ConfigLoader;
/// use buyout_engine::models::{
///     BuyoutMode, CalculationInput, RetirementSystem, SurvivorBenefit,
/// };
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/federal").unwrap();
/// let config = loader.resolve(None).unwrap();
/// let input = CalculationInput {
///     current_salary: Decimal::from(85_000),
///     years_of_service: Decimal::from(15),
///     age: 50,
///     retirement_system: RetirementSystem::Fers,
///     is_special_provisions: false,
///     military_years: Decimal::ZERO,
///     is_deferred_retirement: false,
///     is_early_retirement: false,
///     minimum_retirement_age: 57,
///     survivor_benefit: SurvivorBenefit::None,
///     buyout_mode: BuyoutMode::FixedMonths,
///     state_tax_rate: Decimal::from(5),
/// };
///
/// let result = evaluate(&input, config);
/// println!("{}", result.comparison.recommendation);
/// ```
pub fn evaluate(input: &CalculationInput, config: &CalculatorConfig) -> CalculationResult {
    let mut audit_trace = Vec::new();
    let mut step_number: u32 = 1;

    let resolution = resolve_multiplier(input, config, step_number);
    audit_trace.push(resolution.audit_step.clone());
    step_number += 1;

    let pension = calculate_pension(input, &resolution, config, step_number);
    step_number += pension.audit_steps.len() as u32;
    audit_trace.extend(pension.audit_steps.iter().cloned());

    // Civilian years only: military buyback credits the pension, not severance.
    let severance = calculate_severance(
        input.current_salary,
        input.years_of_service,
        input.age,
        &config.severance,
        step_number,
    );
    audit_trace.push(severance.audit_step.clone());
    step_number += 1;

    let buyout = select_buyout_gross(
        input.buyout_mode,
        input.current_salary,
        severance.total_gross,
        &config.buyout,
        step_number,
    );
    audit_trace.push(buyout.audit_step.clone());
    step_number += 1;

    let taxes = calculate_taxes(
        buyout.gross,
        input.state_tax_rate,
        &config.taxes,
        step_number,
    );
    audit_trace.push(taxes.audit_step.clone());
    step_number += 1;

    let comparison = compare_buyout_to_pension(taxes.net, pension.annual_net, step_number);
    audit_trace.push(comparison.audit_step.clone());

    let tax_breakdown = {
        let federal = round_currency(taxes.federal);
        let social_security = round_currency(taxes.social_security);
        let medicare = round_currency(taxes.medicare);
        let state = round_currency(taxes.state);
        TaxBreakdown {
            federal,
            social_security,
            medicare,
            state,
            total_tax: federal + social_security + medicare + state,
        }
    };
    let gross_buyout = round_currency(buyout.gross);

    CalculationResult {
        pension: PensionProjection {
            annual_gross: round_currency(pension.annual_gross),
            annual_net: round_currency(pension.annual_net),
            monthly: round_currency(pension.monthly),
            multiplier: resolution.multiplier,
            high3: round_currency(input.current_salary),
            total_years_of_service: resolution.credited_years,
            military_years_added: input.military_years,
            is_special_provisions: input.uses_special_provisions(),
            early_retirement_penalty: pension.early_retirement_penalty_percent,
            early_retirement_reduction: round_currency(pension.early_retirement_reduction),
            survivor_benefit_reduction: pension.survivor_reduction_percent,
            survivor_benefit_amount: round_currency(pension.survivor_benefit_amount),
            retirement_system: input.retirement_system.label().to_string(),
            deferred_pension_at_62: pension.deferred_pension_at_62.map(round_currency),
        },
        severance: SeveranceProjection {
            weekly_rate: round_currency(severance.weekly_rate),
            basic_weeks: severance.basic_weeks,
            basic_amount: round_currency(severance.basic_amount),
            age_adjustment_factor: severance.age_adjustment_factor,
            age_adjustment_amount: round_currency(severance.age_adjustment_amount),
            total_gross: round_currency(severance.total_gross),
        },
        buyout: BuyoutProjection {
            gross: gross_buyout,
            net: gross_buyout - tax_breakdown.total_tax,
            taxes: tax_breakdown,
        },
        comparison: Comparison {
            break_even_years: round_currency(comparison.break_even_years),
            difference_5_year: round_currency(comparison.difference_5_year),
            difference_10_year: round_currency(comparison.difference_10_year),
            recommendation_band: comparison.band,
            recommendation: comparison.band.message().to_string(),
        },
        audit_trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use crate::calculation::fixtures::{create_test_config, create_test_input, dec};
    use crate::models::{BuyoutMode, RecommendationBand, RetirementSystem, SurvivorBenefit};

    #[test]
    fn test_fers_standard_scenario() {
        let config = create_test_config();
        let input = create_test_input();

        let result = evaluate(&input, &config);

        assert_eq!(result.pension.multiplier, dec("0.01"));
        assert_eq!(result.pension.annual_gross, dec("12750.00"));
        assert_eq!(result.pension.annual_net, dec("12750.00"));
        assert_eq!(result.pension.monthly, dec("1062.50"));
        assert_eq!(result.pension.retirement_system, "FERS");

        assert_eq!(result.buyout.gross, dec("56666.67"));
        assert_eq!(result.buyout.taxes.federal, dec("12466.67"));
        assert_eq!(result.buyout.taxes.social_security, dec("3513.33"));
        assert_eq!(result.buyout.taxes.medicare, dec("821.67"));
        assert_eq!(result.buyout.taxes.state, dec("2833.33"));
        assert_eq!(result.buyout.taxes.total_tax, dec("19635.00"));
        assert_eq!(result.buyout.net, dec("37031.67"));

        assert_eq!(result.comparison.break_even_years, dec("2.90"));
        assert_eq!(
            result.comparison.recommendation_band,
            RecommendationBand::WithinThreeYears
        );
        assert_eq!(
            result.comparison.recommendation,
            "The buyout may be attractive if you have immediate financial needs or private sector opportunities. Your pension would exceed the buyout value within 3 years."
        );
    }

    #[test]
    fn test_csrs_tiered_scenario() {
        let config = create_test_config();
        let mut input = create_test_input();
        input.retirement_system = RetirementSystem::Csrs;
        input.years_of_service = dec("12");

        let result = evaluate(&input, &config);

        // (5 x 0.015 + 5 x 0.0175 + 2 x 0.02) / 12
        assert_eq!(result.pension.multiplier, dec("0.2025") / dec("12"));
        assert_eq!(result.pension.retirement_system, "CSRS");
        // 85000 x 12 x 0.016875 = 17212.50
        assert_eq!(result.pension.annual_gross, dec("17212.50"));
    }

    #[test]
    fn test_military_years_credit_pension_not_severance() {
        let config = create_test_config();
        let mut input = create_test_input();
        input.military_years = dec("5");

        let result = evaluate(&input, &config);

        assert_eq!(result.pension.total_years_of_service, dec("20"));
        assert_eq!(result.pension.military_years_added, dec("5"));
        assert_eq!(result.pension.annual_gross, dec("17000.00"));
        // 15 civilian years: 10 + 5 x 2 = 20 weeks, not 30.
        assert_eq!(result.severance.basic_weeks, dec("20"));
    }

    #[test]
    fn test_custom_buyout_ignores_other_inputs() {
        let config = create_test_config();
        let mut input = create_test_input();
        input.buyout_mode = BuyoutMode::Custom(dec("42424.24"));
        input.age = 64;
        input.years_of_service = dec("33");

        let result = evaluate(&input, &config);

        assert_eq!(result.buyout.gross, dec("42424.24"));
    }

    #[test]
    fn test_severance_mode_uses_capped_total() {
        let config = create_test_config();
        let mut input = create_test_input();
        input.buyout_mode = BuyoutMode::Severance;
        input.current_salary = dec("250000");
        input.years_of_service = dec("20");
        input.age = 70;

        let result = evaluate(&input, &config);

        assert_eq!(result.severance.total_gross, dec("250000.00"));
        assert_eq!(result.buyout.gross, dec("250000.00"));
        assert_eq!(
            result.severance.age_adjustment_amount,
            result.severance.total_gross - result.severance.basic_amount
        );
    }

    #[test]
    fn test_output_identities_hold_after_rounding() {
        let config = create_test_config();
        let mut input = create_test_input();
        input.current_salary = dec("93777.77");
        input.state_tax_rate = dec("4.85");
        input.survivor_benefit = SurvivorBenefit::Partial;

        let result = evaluate(&input, &config);
        let taxes = &result.buyout.taxes;

        assert_eq!(
            taxes.total_tax,
            taxes.federal + taxes.social_security + taxes.medicare + taxes.state
        );
        assert_eq!(result.buyout.net, result.buyout.gross - taxes.total_tax);
        assert!(result.pension.annual_net <= result.pension.annual_gross);
    }

    #[test]
    fn test_zero_years_reports_zero_break_even() {
        let config = create_test_config();
        let mut input = create_test_input();
        input.years_of_service = Decimal::ZERO;

        let result = evaluate(&input, &config);

        assert_eq!(result.pension.annual_net, Decimal::ZERO);
        assert_eq!(result.comparison.break_even_years, Decimal::ZERO);
    }

    #[test]
    fn test_evaluation_is_repeatable() {
        let config = create_test_config();
        let mut input = create_test_input();
        input.retirement_system = RetirementSystem::Csrs;
        input.is_early_retirement = true;
        input.age = 54;
        input.survivor_benefit = SurvivorBenefit::Full;

        let first = evaluate(&input, &config);
        let second = evaluate(&input, &config);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_audit_trace_follows_pipeline_order() {
        let config = create_test_config();
        let input = create_test_input();

        let result = evaluate(&input, &config);

        let rules: Vec<&str> = result
            .audit_trace
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rules,
            vec![
                "pension_multiplier",
                "pension_accrual",
                "severance_pay",
                "buyout_gross",
                "buyout_withholding",
                "break_even"
            ]
        );
        let numbers: Vec<u32> = result.audit_trace.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }
}
