//! Severance pay under the OPM formula.
//!
//! Severance is credited on civilian service only. Military buyback years
//! raise the pension but never the severance, so callers must pass
//! `years_of_service` here, not the credited total used for the pension.

use rust_decimal::Decimal;

use crate::config::SeveranceConfig;
use crate::models::AuditStep;

const QUARTERS_PER_YEAR: i64 = 4;

/// The full-precision severance figures and their audit step.
#[derive(Debug, Clone)]
pub struct SeveranceCalculation {
    /// One week of basic pay.
    pub weekly_rate: Decimal,
    /// Weeks of pay credited for service.
    pub basic_weeks: Decimal,
    /// `basic_weeks * weekly_rate`.
    pub basic_amount: Decimal,
    /// Multiplier for age over the adjustment base.
    pub age_adjustment_factor: Decimal,
    /// Capped total minus basic amount, never negative.
    pub age_adjustment_amount: Decimal,
    /// Age-adjusted severance after the salary cap.
    pub total_gross: Decimal,
    /// Whether the salary cap reduced the total.
    pub capped: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Weeks of severance pay credited for `years_of_service`.
pub fn severance_weeks(years_of_service: Decimal, config: &SeveranceConfig) -> Decimal {
    if years_of_service <= config.tier1_years {
        years_of_service * config.tier1_weeks_per_year
    } else {
        config.tier1_years * config.tier1_weeks_per_year
            + (years_of_service - config.tier1_years) * config.tier2_weeks_per_year
    }
}

/// Age adjustment factor. Quarters are counted from whole years over the base
/// age, not from a fractional age.
pub fn age_adjustment_factor(age: u32, config: &SeveranceConfig) -> Decimal {
    if age > config.age_adjustment_base {
        let years_over = Decimal::from(age - config.age_adjustment_base);
        let quarters = years_over * Decimal::from(QUARTERS_PER_YEAR);
        Decimal::ONE + quarters * config.age_adjustment_per_quarter
    } else {
        Decimal::ONE
    }
}

/// Computes severance pay.
///
/// # Arguments
///
/// * `salary` - Annual basic pay
/// * `years_of_service` - Civilian years only
/// * `age` - Age in whole years
/// * `config` - The severance schedule
/// * `step_number` - Number to give the audit step
///
/// # Example
///
/// ```no_run
/// use buyout_engine::calculation::calculate_severance;
/// use buyout_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/federal").unwrap();
/// let config = loader.resolve(None).unwrap();
/// let result = calculate_severance(
///     Decimal::from(85_000),
///     Decimal::from(15),
///     50,
///     &config.severance,
///     1,
/// );
/// println!("Severance: ${}", result.total_gross);
/// ```
pub fn calculate_severance(
    salary: Decimal,
    years_of_service: Decimal,
    age: u32,
    config: &SeveranceConfig,
    step_number: u32,
) -> SeveranceCalculation {
    let weekly_rate = salary / config.hours_per_year * config.hours_per_week;
    let basic_weeks = severance_weeks(years_of_service, config);
    let basic_amount = basic_weeks * weekly_rate;

    let factor = age_adjustment_factor(age, config);
    let adjusted = basic_amount * factor;

    let cap = salary * config.max_years_salary;
    let capped = adjusted > cap;
    let total_gross = if capped { cap } else { adjusted };

    // Measured against the capped total so the reported parts add up.
    let age_adjustment_amount = (total_gross - basic_amount).max(Decimal::ZERO);

    let reasoning = if capped {
        format!(
            "{} weeks at ${}/week = ${}, age factor {} gives ${}, capped at ${}",
            basic_weeks, weekly_rate, basic_amount, factor, adjusted, cap
        )
    } else {
        format!(
            "{} weeks at ${}/week = ${}, age factor {} gives ${}",
            basic_weeks, weekly_rate, basic_amount, factor, total_gross
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "severance_pay".to_string(),
        rule_name: "Severance Pay".to_string(),
        authority: "5 U.S.C. 5595".to_string(),
        input: serde_json::json!({
            "salary": salary.to_string(),
            "years_of_service": years_of_service.to_string(),
            "age": age
        }),
        output: serde_json::json!({
            "weekly_rate": weekly_rate.to_string(),
            "basic_weeks": basic_weeks.to_string(),
            "basic_amount": basic_amount.to_string(),
            "age_adjustment_factor": factor.to_string(),
            "total_gross": total_gross.to_string(),
            "capped": capped
        }),
        reasoning,
    };

    SeveranceCalculation {
        weekly_rate,
        basic_weeks,
        basic_amount,
        age_adjustment_factor: factor,
        age_adjustment_amount,
        total_gross,
        capped,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::fixtures::{create_test_config, dec};
    use crate::calculation::round_currency;

    #[test]
    fn test_weeks_within_first_tier() {
        let config = create_test_config();
        assert_eq!(severance_weeks(dec("8"), &config.severance), dec("8"));
        assert_eq!(severance_weeks(dec("10"), &config.severance), dec("10"));
    }

    #[test]
    fn test_weeks_beyond_first_tier() {
        let config = create_test_config();
        // 10 x 1 + 5 x 2
        assert_eq!(severance_weeks(dec("15"), &config.severance), dec("20"));
        assert_eq!(severance_weeks(dec("12.5"), &config.severance), dec("15"));
    }

    #[test]
    fn test_age_factor_at_or_below_base_is_one() {
        let config = create_test_config();
        assert_eq!(age_adjustment_factor(40, &config.severance), Decimal::ONE);
        assert_eq!(age_adjustment_factor(30, &config.severance), Decimal::ONE);
    }

    #[test]
    fn test_age_factor_counts_whole_years_as_quarters() {
        let config = create_test_config();
        // 10 years over 40 = 40 quarters x 2.5% = 100%
        assert_eq!(age_adjustment_factor(50, &config.severance), dec("2"));
        assert_eq!(age_adjustment_factor(41, &config.severance), dec("1.1"));
    }

    #[test]
    fn test_age_factor_for_extreme_age_does_not_overflow() {
        let config = create_test_config();
        // (4_000_000_000 - 40) x 4 quarters exceeds u32.
        let factor = age_adjustment_factor(4_000_000_000, &config.severance);
        assert_eq!(factor, dec("399999997"));
    }

    #[test]
    fn test_severance_below_cap() {
        let config = create_test_config();
        let result = calculate_severance(dec("85000"), dec("8"), 40, &config.severance, 1);

        // 85000 / 2087 x 40 = 1629.133...
        assert_eq!(round_currency(result.weekly_rate), dec("1629.13"));
        assert_eq!(result.basic_weeks, dec("8"));
        assert_eq!(round_currency(result.basic_amount), dec("13033.06"));
        assert_eq!(result.age_adjustment_factor, Decimal::ONE);
        assert_eq!(result.age_adjustment_amount, Decimal::ZERO);
        assert_eq!(result.total_gross, result.basic_amount);
        assert!(!result.capped);
    }

    #[test]
    fn test_severance_with_age_adjustment() {
        let config = create_test_config();
        let result = calculate_severance(dec("85000"), dec("8"), 42, &config.severance, 1);

        // 8 quarters x 2.5% = 20%
        assert_eq!(result.age_adjustment_factor, dec("1.2"));
        assert_eq!(
            result.age_adjustment_amount,
            result.total_gross - result.basic_amount
        );
        assert_eq!(round_currency(result.total_gross), dec("15639.67"));
    }

    #[test]
    fn test_severance_capped_at_one_year_salary() {
        let config = create_test_config();
        let result = calculate_severance(dec("250000"), dec("20"), 70, &config.severance, 1);

        assert!(result.capped);
        assert_eq!(result.total_gross, dec("250000"));
        // Adjustment is measured against the capped total.
        assert_eq!(
            result.age_adjustment_amount,
            dec("250000") - result.basic_amount
        );
        assert!(result.audit_step.reasoning.contains("capped"));
    }

    #[test]
    fn test_adjustment_never_negative_when_basic_exceeds_cap() {
        let config = create_test_config();
        // 10 + 30 x 2 = 70 weeks, more than a year of pay before any age factor.
        let result = calculate_severance(dec("60000"), dec("40"), 45, &config.severance, 1);

        assert!(result.basic_amount > dec("60000"));
        assert_eq!(result.total_gross, dec("60000"));
        assert_eq!(result.age_adjustment_amount, Decimal::ZERO);
    }

    #[test]
    fn test_zero_years_zero_severance() {
        let config = create_test_config();
        let result = calculate_severance(dec("85000"), Decimal::ZERO, 55, &config.severance, 1);

        assert_eq!(result.basic_amount, Decimal::ZERO);
        assert_eq!(result.total_gross, Decimal::ZERO);
        assert_eq!(result.age_adjustment_amount, Decimal::ZERO);
    }
}
