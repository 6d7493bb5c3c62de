//! Flat-rate withholding on the gross buyout.
//!
//! The pension is never taxed here. Social Security is charged on the whole
//! buyout: the wage base in config is informational and deliberately not
//! enforced.

use rust_decimal::Decimal;

use crate::config::TaxRates;
use crate::models::AuditStep;

/// The full-precision withholding figures and their audit step.
#[derive(Debug, Clone)]
pub struct TaxCalculation {
    /// Federal withholding.
    pub federal: Decimal,
    /// Social Security withholding.
    pub social_security: Decimal,
    /// Medicare withholding.
    pub medicare: Decimal,
    /// State withholding.
    pub state: Decimal,
    /// Sum of the four components.
    pub total_tax: Decimal,
    /// `gross - total_tax`.
    pub net: Decimal,
    /// The audit step recording the calculation.
    pub audit_step: AuditStep,
}

/// Applies withholding to a gross buyout.
///
/// `state_tax_rate` is a percentage (5 means 5%); the config rates are
/// fractions.
pub fn calculate_taxes(
    gross: Decimal,
    state_tax_rate: Decimal,
    rates: &TaxRates,
    step_number: u32,
) -> TaxCalculation {
    let federal = gross * rates.federal_rate;
    let social_security = gross * rates.social_security_rate;
    let medicare = gross * rates.medicare_rate;
    let state = gross * (state_tax_rate / Decimal::ONE_HUNDRED);

    let total_tax = federal + social_security + medicare + state;
    let net = gross - total_tax;

    let audit_step = AuditStep {
        step_number,
        rule_id: "buyout_withholding".to_string(),
        rule_name: "Buyout Withholding".to_string(),
        authority: "26 U.S.C. 3402".to_string(),
        input: serde_json::json!({
            "gross": gross.to_string(),
            "federal_rate": rates.federal_rate.to_string(),
            "social_security_rate": rates.social_security_rate.to_string(),
            "medicare_rate": rates.medicare_rate.to_string(),
            "state_tax_percent": state_tax_rate.to_string()
        }),
        output: serde_json::json!({
            "federal": federal.to_string(),
            "social_security": social_security.to_string(),
            "medicare": medicare.to_string(),
            "state": state.to_string(),
            "total_tax": total_tax.to_string(),
            "net": net.to_string()
        }),
        reasoning: format!(
            "Withholding ${} of ${} leaves ${}",
            total_tax, gross, net
        ),
    };

    TaxCalculation {
        federal,
        social_security,
        medicare,
        state,
        total_tax,
        net,
        audit_step,
    }
}
