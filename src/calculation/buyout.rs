//! Gross buyout selection.

use rust_decimal::Decimal;

use crate::config::BuyoutConfig;
use crate::models::{AuditStep, BuyoutMode};

/// The selected gross buyout and its audit step.
#[derive(Debug, Clone)]
pub struct BuyoutSelection {
    /// Gross buyout before withholding.
    pub gross: Decimal,
    /// The audit step recording the selection.
    pub audit_step: AuditStep,
}

/// Picks the gross buyout for the requested mode.
///
/// A custom amount is used verbatim. Severance mode takes the already capped
/// severance total. Fixed-month mode pays `salary / 12` for the configured
/// number of months.
pub fn select_buyout_gross(
    mode: BuyoutMode,
    salary: Decimal,
    severance_total: Decimal,
    config: &BuyoutConfig,
    step_number: u32,
) -> BuyoutSelection {
    let (gross, reasoning) = match mode {
        BuyoutMode::Custom(amount) => (amount, format!("Using the offered amount ${}", amount)),
        BuyoutMode::Severance => (
            severance_total,
            format!("Using the severance total ${}", severance_total),
        ),
        BuyoutMode::FixedMonths => {
            let gross = salary / Decimal::from(12) * config.default_months;
            (
                gross,
                format!(
                    "{} months of ${} annual salary = ${}",
                    config.default_months, salary, gross
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "buyout_gross".to_string(),
        rule_name: "Buyout Amount".to_string(),
        authority: "5 U.S.C. 3523".to_string(),
        input: serde_json::json!({
            "mode": mode.token(),
            "salary": salary.to_string()
        }),
        output: serde_json::json!({
            "gross": gross.to_string()
        }),
        reasoning,
    };

    BuyoutSelection { gross, audit_step }
}
