//! Core data models for the buyout engine.
//!
//! This module contains the validated input record and the result record
//! produced by a single evaluation.

mod calculation_result;
mod input;

pub use calculation_result::{
    AuditStep, BuyoutProjection, CalculationResult, Comparison, PensionProjection,
    RecommendationBand, SeveranceProjection, TaxBreakdown,
};
pub use input::{BuyoutMode, CalculationInput, RetirementSystem, SurvivorBenefit};
