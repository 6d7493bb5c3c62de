//! Shared test fixtures for the calculation stages.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::{
    BuyoutConfig, CalculatorConfig, ColaConfig, CsrsConfig, EarlyRetirementConfig, FersConfig,
    SeveranceConfig, SpecialProvisionsConfig, SurvivorBenefitConfig, TaxRates,
};
use crate::models::{BuyoutMode, CalculationInput, RetirementSystem, SurvivorBenefit};

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// The 2026 constants, built in code so unit tests do not touch the filesystem.
pub(crate) fn create_test_config() -> CalculatorConfig {
    CalculatorConfig {
        data_year: 2026,
        taxes: TaxRates {
            federal_rate: dec("0.22"),
            social_security_rate: dec("0.062"),
            social_security_wage_base: dec("184500"),
            medicare_rate: dec("0.0145"),
        },
        fers: FersConfig {
            standard_multiplier: dec("0.01"),
            bonus_multiplier: dec("0.011"),
            bonus_age_requirement: 62,
            bonus_years_requirement: dec("20"),
            deferred_commencement_age: 62,
        },
        csrs: CsrsConfig {
            tier1_multiplier: dec("0.015"),
            tier1_years: dec("5"),
            tier2_multiplier: dec("0.0175"),
            tier2_years: dec("5"),
            tier3_multiplier: dec("0.02"),
            max_benefit_percent: dec("0.80"),
        },
        special_provisions: SpecialProvisionsConfig {
            enhanced_years: dec("20"),
            first_20_years_multiplier: dec("0.017"),
            after_20_years_multiplier: dec("0.01"),
        },
        early_retirement: EarlyRetirementConfig {
            penalty_per_year: dec("0.05"),
        },
        survivor_benefit: SurvivorBenefitConfig {
            partial: dec("0.05"),
            full: dec("0.10"),
        },
        severance: SeveranceConfig {
            hours_per_year: dec("2087"),
            hours_per_week: dec("40"),
            tier1_weeks_per_year: dec("1"),
            tier1_years: dec("10"),
            tier2_weeks_per_year: dec("2"),
            age_adjustment_base: 40,
            age_adjustment_per_quarter: dec("0.025"),
            max_years_salary: dec("1"),
        },
        buyout: BuyoutConfig {
            default_months: dec("8"),
        },
        cola: ColaConfig {
            fers: dec("0.02"),
            csrs: dec("0.028"),
        },
    }
}

/// FERS employee, 85k salary, 15 years, age 50, 5% state tax, 8-month buyout.
pub(crate) fn create_test_input() -> CalculationInput {
    CalculationInput {
        current_salary: dec("85000"),
        years_of_service: dec("15"),
        age: 50,
        retirement_system: RetirementSystem::Fers,
        is_special_provisions: false,
        military_years: Decimal::ZERO,
        is_deferred_retirement: false,
        is_early_retirement: false,
        minimum_retirement_age: 57,
        survivor_benefit: SurvivorBenefit::None,
        buyout_mode: BuyoutMode::FixedMonths,
        state_tax_rate: dec("5"),
    }
}
