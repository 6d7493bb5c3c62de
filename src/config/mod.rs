//! Configuration loading and management for the buyout engine.
//!
//! Calculator constants live in YAML files, one file per data year, so that
//! rates can change from year to year without touching the formulas.
//!
//! # Example
//!
//! ```no_run
//! use buyout_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/federal").unwrap();
//! println!("Loaded rule set: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BuyoutConfig, CalculatorConfig, ColaConfig, ConfigCatalog, ConfigMetadata, CsrsConfig,
    EarlyRetirementConfig, FersConfig, ReferenceSource, SeveranceConfig, SpecialProvisionsConfig,
    SurvivorBenefitConfig, TaxRates,
};
