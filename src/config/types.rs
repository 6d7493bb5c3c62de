//! Configuration types for the buyout calculator.
//!
//! These structures are deserialized from the YAML files under a config
//! directory. Rates are fractions (0.22 means 22%) unless a field says
//! otherwise.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A published reference the constants were taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSource {
    /// Short name of the source.
    pub name: String,
    /// Where the source can be read.
    pub url: String,
    /// What the source covers.
    pub description: String,
}

/// Metadata shared by every config version in a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Human-readable name of the rule set.
    pub name: String,
    /// When the constants were last reviewed, as displayed to users.
    pub last_updated: String,
    /// Official references for the formulas and rates.
    #[serde(default)]
    pub sources: Vec<ReferenceSource>,
}

/// Flat withholding rates applied to the buyout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    /// Federal supplemental wage rate.
    pub federal_rate: Decimal,
    /// Social Security employee rate.
    pub social_security_rate: Decimal,
    /// Social Security wage base. Documented only, never enforced.
    pub social_security_wage_base: Decimal,
    /// Medicare employee rate.
    pub medicare_rate: Decimal,
}

/// FERS accrual rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FersConfig {
    /// Accrual rate per year of service.
    pub standard_multiplier: Decimal,
    /// Enhanced accrual rate once age and service thresholds are met.
    pub bonus_multiplier: Decimal,
    /// Minimum age for the bonus rate.
    pub bonus_age_requirement: u32,
    /// Minimum credited years for the bonus rate.
    pub bonus_years_requirement: Decimal,
    /// Age at which a deferred annuity commences.
    pub deferred_commencement_age: u32,
}

/// CSRS three-tier accrual schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsrsConfig {
    /// Rate for the first tier.
    pub tier1_multiplier: Decimal,
    /// Length of the first tier in years.
    pub tier1_years: Decimal,
    /// Rate for the second tier.
    pub tier2_multiplier: Decimal,
    /// Length of the second tier in years.
    pub tier2_years: Decimal,
    /// Rate for every year after the second tier.
    pub tier3_multiplier: Decimal,
    /// Annuity ceiling as a fraction of salary.
    pub max_benefit_percent: Decimal,
}

/// Accrual for law enforcement, firefighter and air traffic control positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialProvisionsConfig {
    /// Years accrued at the enhanced rate.
    pub enhanced_years: Decimal,
    /// Rate for the enhanced years.
    pub first_20_years_multiplier: Decimal,
    /// Rate for years beyond the enhanced period.
    pub after_20_years_multiplier: Decimal,
}

/// Early (MRA+10 style) retirement reduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlyRetirementConfig {
    /// Fractional reduction per year under the minimum retirement age.
    pub penalty_per_year: Decimal,
}

/// Survivor annuity reductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurvivorBenefitConfig {
    /// Reduction for a partial survivor annuity.
    pub partial: Decimal,
    /// Reduction for a full survivor annuity.
    pub full: Decimal,
}

/// OPM severance pay schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceConfig {
    /// Paid hours in a work year.
    pub hours_per_year: Decimal,
    /// Paid hours in a work week.
    pub hours_per_week: Decimal,
    /// Weeks of pay per year of service in the first tier.
    pub tier1_weeks_per_year: Decimal,
    /// Length of the first tier in years.
    pub tier1_years: Decimal,
    /// Weeks of pay per year of service after the first tier.
    pub tier2_weeks_per_year: Decimal,
    /// Age above which the age adjustment applies.
    pub age_adjustment_base: u32,
    /// Increase per full quarter year over the base age.
    pub age_adjustment_per_quarter: Decimal,
    /// Severance ceiling as a multiple of annual salary.
    pub max_years_salary: Decimal,
}

/// Fixed-duration buyout offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyoutConfig {
    /// Months of salary paid by the standard offer.
    pub default_months: Decimal,
}

/// Cost-of-living adjustments, reported for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColaConfig {
    /// FERS annuity COLA.
    pub fers: Decimal,
    /// CSRS annuity COLA.
    pub csrs: Decimal,
}

/// One versioned snapshot of every constant the engine reads.
///
/// A snapshot is immutable once loaded and can be shared freely between
/// concurrent evaluations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// The tax/calendar year these constants describe.
    pub data_year: i32,
    /// Withholding rates.
    pub taxes: TaxRates,
    /// FERS accrual rules.
    pub fers: FersConfig,
    /// CSRS accrual rules.
    pub csrs: CsrsConfig,
    /// Special provisions accrual rules.
    pub special_provisions: SpecialProvisionsConfig,
    /// Early retirement reduction.
    pub early_retirement: EarlyRetirementConfig,
    /// Survivor annuity reductions.
    pub survivor_benefit: SurvivorBenefitConfig,
    /// Severance schedule.
    pub severance: SeveranceConfig,
    /// Fixed buyout offer.
    pub buyout: BuyoutConfig,
    /// Cost-of-living adjustments.
    pub cola: ColaConfig,
}

impl CalculatorConfig {
    /// Checks the constants the engine divides by or clamps against.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> EngineResult<()> {
        let checks: [(&str, bool); 10] = [
            (
                "severance.hours_per_year must be positive",
                self.severance.hours_per_year > Decimal::ZERO,
            ),
            (
                "severance.hours_per_week must be positive",
                self.severance.hours_per_week > Decimal::ZERO,
            ),
            (
                "fers.standard_multiplier must be positive",
                self.fers.standard_multiplier > Decimal::ZERO,
            ),
            (
                "csrs.max_benefit_percent must be positive",
                self.csrs.max_benefit_percent > Decimal::ZERO,
            ),
            (
                "csrs.tier1_years must not be negative",
                self.csrs.tier1_years >= Decimal::ZERO,
            ),
            (
                "csrs.tier2_years must not be negative",
                self.csrs.tier2_years >= Decimal::ZERO,
            ),
            (
                "special_provisions.enhanced_years must not be negative",
                self.special_provisions.enhanced_years >= Decimal::ZERO,
            ),
            (
                "severance.tier1_years must not be negative",
                self.severance.tier1_years >= Decimal::ZERO,
            ),
            (
                "survivor_benefit reductions must be between 0 and 1",
                in_unit_range(self.survivor_benefit.partial)
                    && in_unit_range(self.survivor_benefit.full),
            ),
            (
                "tax rates must be between 0 and 1",
                in_unit_range(self.taxes.federal_rate)
                    && in_unit_range(self.taxes.social_security_rate)
                    && in_unit_range(self.taxes.medicare_rate),
            ),
        ];

        match checks.iter().find(|(_, ok)| !ok) {
            Some((message, _)) => Err(EngineError::ConfigParseError {
                path: format!("data year {}", self.data_year),
                message: (*message).to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn in_unit_range(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}

/// Every config version loaded from one directory.
#[derive(Debug, Clone)]
pub struct ConfigCatalog {
    metadata: ConfigMetadata,
    /// Sorted by data year, oldest first.
    versions: Vec<CalculatorConfig>,
}

impl ConfigCatalog {
    /// Creates a catalog from its parts, sorting versions by data year.
    pub fn new(metadata: ConfigMetadata, versions: Vec<CalculatorConfig>) -> Self {
        let mut sorted = versions;
        sorted.sort_by_key(|v| v.data_year);
        Self {
            metadata,
            versions: sorted,
        }
    }

    /// Returns the shared metadata.
    pub fn metadata(&self) -> &ConfigMetadata {
        &self.metadata
    }

    /// Returns all versions, oldest first.
    pub fn versions(&self) -> &[CalculatorConfig] {
        &self.versions
    }

    /// Returns the newest version, if any.
    pub fn latest(&self) -> Option<&CalculatorConfig> {
        self.versions.last()
    }

    /// Returns the most recent version whose data year is on or before `year`.
    pub fn for_year(&self, year: i32) -> Option<&CalculatorConfig> {
        self.versions.iter().rfind(|v| v.data_year <= year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::fixtures::{create_test_config, dec};

    fn assert_rejected(config: &CalculatorConfig, expected: &str) {
        match config.validate() {
            Err(EngineError::ConfigParseError { message, .. }) => assert_eq!(message, expected),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_shipped_constants_validate() {
        assert!(create_test_config().validate().is_ok());
    }

    #[test]
    fn test_negative_csrs_tiers_rejected() {
        let mut config = create_test_config();
        config.csrs.tier1_years = dec("-5");
        assert_rejected(&config, "csrs.tier1_years must not be negative");

        let mut config = create_test_config();
        config.csrs.tier2_years = dec("-1");
        assert_rejected(&config, "csrs.tier2_years must not be negative");
    }

    #[test]
    fn test_negative_enhanced_years_rejected() {
        let mut config = create_test_config();
        config.special_provisions.enhanced_years = dec("-20");
        assert_rejected(&config, "special_provisions.enhanced_years must not be negative");
    }

    #[test]
    fn test_negative_severance_tier_rejected() {
        let mut config = create_test_config();
        config.severance.tier1_years = dec("-10");
        assert_rejected(&config, "severance.tier1_years must not be negative");
    }

    #[test]
    fn test_zero_length_tiers_allowed() {
        let mut config = create_test_config();
        config.csrs.tier1_years = Decimal::ZERO;
        config.severance.tier1_years = Decimal::ZERO;
        assert!(config.validate().is_ok());
    }
}
