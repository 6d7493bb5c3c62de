//! Request types for the buyout engine API.
//!
//! Every field arrives optional and loosely typed so that the validator, not
//! serde, decides which error a bad request gets. [`CalculationRequest`] is
//! turned into a [`CalculationInput`] with `TryFrom`, which is the only place
//! range and enum checks happen.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{BuyoutMode, CalculationInput, RetirementSystem, SurvivorBenefit};

use super::subscribers::is_valid_email;

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 120;
const MAX_SALARY: i64 = 10_000_000;
const MAX_YEARS_OF_SERVICE: u32 = 80;
const SALARY_DECIMAL_PLACES: u32 = 2;
const MAX_MILITARY_YEARS: u32 = 40;
const MIN_MRA: u32 = 55;
const MAX_MRA: u32 = 57;
const DEFAULT_MRA: u32 = 57;

/// Request body for `POST /api/calculate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRequest {
    /// Annual salary.
    #[serde(default)]
    pub current_salary: Option<Decimal>,
    /// Civilian years of service.
    #[serde(default)]
    pub years_of_service: Option<Decimal>,
    /// Age in whole years.
    #[serde(default)]
    pub age: Option<Decimal>,
    /// `"fers"` or `"csrs"`.
    #[serde(default)]
    pub retirement_system: Option<String>,
    /// Special provisions position.
    #[serde(default)]
    pub is_special_provisions: Option<bool>,
    /// Bought-back military years.
    #[serde(default)]
    pub military_years: Option<Decimal>,
    /// Deferred retirement.
    #[serde(default)]
    pub is_deferred_retirement: Option<bool>,
    /// Early retirement before the MRA.
    #[serde(default)]
    pub is_early_retirement: Option<bool>,
    /// Minimum retirement age.
    #[serde(default)]
    pub minimum_retirement_age: Option<Decimal>,
    /// `"none"`, `"partial"` or `"full"`.
    #[serde(default)]
    pub survivor_benefit: Option<String>,
    /// `"custom"`, `"8month"` or `"severance"`.
    #[serde(default)]
    pub buyout_mode: Option<String>,
    /// Offer amount for custom mode.
    #[serde(default)]
    pub custom_buyout_amount: Option<Decimal>,
    /// State income tax percentage.
    #[serde(default)]
    pub state_tax_rate: Option<Decimal>,
    /// Contact address for the mailing list.
    #[serde(default)]
    pub email: Option<String>,
    /// Opt-in to the mailing list.
    #[serde(default)]
    pub subscribe_to_newsletter: Option<bool>,
}

impl CalculationRequest {
    /// The address to subscribe, when the caller opted in.
    ///
    /// Only meaningful after the request has validated.
    pub fn newsletter_email(&self) -> Option<&str> {
        if self.subscribe_to_newsletter.unwrap_or(false) {
            self.email.as_deref().map(str::trim)
        } else {
            None
        }
    }
}

impl TryFrom<&CalculationRequest> for CalculationInput {
    type Error = EngineError;

    fn try_from(request: &CalculationRequest) -> EngineResult<Self> {
        let current_salary = required(request.current_salary, "currentSalary")?;
        if current_salary <= Decimal::ZERO || current_salary > Decimal::from(MAX_SALARY) {
            return Err(out_of_range(
                "currentSalary",
                &format!("must be greater than 0 and at most {}", MAX_SALARY),
            ));
        }
        if current_salary.normalize().scale() > SALARY_DECIMAL_PLACES {
            return Err(EngineError::InvalidFormat {
                field: "currentSalary".to_string(),
                message: "must be a whole number of cents".to_string(),
            });
        }

        let years_of_service = required(request.years_of_service, "yearsOfService")?;
        if years_of_service < Decimal::ZERO
            || years_of_service > Decimal::from(MAX_YEARS_OF_SERVICE)
        {
            return Err(out_of_range(
                "yearsOfService",
                &format!("must be between 0 and {}", MAX_YEARS_OF_SERVICE),
            ));
        }

        let age = whole_number(required(request.age, "age")?, "age")?;
        if !(MIN_AGE..=MAX_AGE).contains(&age) {
            return Err(out_of_range(
                "age",
                &format!("must be between {} and {}", MIN_AGE, MAX_AGE),
            ));
        }

        let retirement_system = match request.retirement_system.as_deref() {
            None => RetirementSystem::default(),
            Some(token) => RetirementSystem::from_token(token)
                .ok_or_else(|| invalid_enum("retirementSystem", token))?,
        };

        let military_years = request.military_years.unwrap_or(Decimal::ZERO);
        if military_years < Decimal::ZERO || military_years > Decimal::from(MAX_MILITARY_YEARS) {
            return Err(out_of_range(
                "militaryYears",
                &format!("must be between 0 and {}", MAX_MILITARY_YEARS),
            ));
        }

        let minimum_retirement_age = match request.minimum_retirement_age {
            None => DEFAULT_MRA,
            Some(value) => whole_number(value, "minimumRetirementAge")?,
        };
        if !(MIN_MRA..=MAX_MRA).contains(&minimum_retirement_age) {
            return Err(out_of_range(
                "minimumRetirementAge",
                &format!("must be between {} and {}", MIN_MRA, MAX_MRA),
            ));
        }

        let survivor_benefit = match request.survivor_benefit.as_deref() {
            None => SurvivorBenefit::default(),
            Some(token) => SurvivorBenefit::from_token(token)
                .ok_or_else(|| invalid_enum("survivorBenefit", token))?,
        };

        let buyout_mode = match request.buyout_mode.as_deref() {
            None | Some("8month") => BuyoutMode::FixedMonths,
            Some("severance") => BuyoutMode::Severance,
            Some("custom") => {
                let amount = required(request.custom_buyout_amount, "customBuyoutAmount")?;
                if amount < Decimal::ZERO {
                    return Err(out_of_range("customBuyoutAmount", "must not be negative"));
                }
                BuyoutMode::Custom(amount)
            }
            Some(token) => return Err(invalid_enum("buyoutMode", token)),
        };

        let state_tax_rate = request.state_tax_rate.unwrap_or(Decimal::ZERO);
        if state_tax_rate < Decimal::ZERO || state_tax_rate > Decimal::ONE_HUNDRED {
            return Err(out_of_range("stateTaxRate", "must be between 0 and 100"));
        }

        if request.subscribe_to_newsletter.unwrap_or(false) {
            validate_email(request.email.as_deref())?;
        }

        Ok(CalculationInput {
            current_salary,
            years_of_service,
            age,
            retirement_system,
            is_special_provisions: request.is_special_provisions.unwrap_or(false),
            military_years,
            is_deferred_retirement: request.is_deferred_retirement.unwrap_or(false),
            is_early_retirement: request.is_early_retirement.unwrap_or(false),
            minimum_retirement_age,
            survivor_benefit,
            buyout_mode,
            state_tax_rate,
        })
    }
}

impl TryFrom<CalculationRequest> for CalculationInput {
    type Error = EngineError;

    fn try_from(request: CalculationRequest) -> EngineResult<Self> {
        CalculationInput::try_from(&request)
    }
}

/// Request body for `POST /api/newsletter/signup`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    /// The address to subscribe.
    #[serde(default)]
    pub email: Option<String>,
}

impl SignupRequest {
    /// Returns the trimmed address, or the validation error for it.
    pub fn validated_email(&self) -> EngineResult<&str> {
        validate_email(self.email.as_deref())
    }
}

/// Query string accepted by the calculate and config endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct YearQuery {
    /// Data year to evaluate against. The latest version when absent.
    pub year: Option<i32>,
}

fn validate_email(email: Option<&str>) -> EngineResult<&str> {
    let email = email.map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(EngineError::MissingRequiredField {
            field: "email".to_string(),
        });
    }
    if !is_valid_email(email) {
        return Err(EngineError::InvalidFormat {
            field: "email".to_string(),
            message: "Please enter a valid email address to receive updates".to_string(),
        });
    }
    Ok(email)
}

fn required(value: Option<Decimal>, field: &str) -> EngineResult<Decimal> {
    value.ok_or_else(|| EngineError::MissingRequiredField {
        field: field.to_string(),
    })
}

fn whole_number(value: Decimal, field: &str) -> EngineResult<u32> {
    if !value.fract().is_zero() {
        return Err(EngineError::InvalidFormat {
            field: field.to_string(),
            message: "must be a whole number".to_string(),
        });
    }
    value
        .to_u32()
        .ok_or_else(|| out_of_range(field, "must be a non-negative whole number"))
}

fn out_of_range(field: &str, message: &str) -> EngineError {
    EngineError::OutOfRange {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn invalid_enum(field: &str, value: &str) -> EngineError {
    EngineError::InvalidEnum {
        field: field.to_string(),
        value: value.to_string(),
    }
}
