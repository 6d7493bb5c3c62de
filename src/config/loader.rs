//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading calculator
//! constants from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{CalculatorConfig, ConfigCatalog, ConfigMetadata};

/// Loads and provides access to versioned calculator configuration.
///
/// # Directory Structure
///
/// ```text
/// config/federal/
/// ├── metadata.yaml   # Rule set name, review date, references
/// └── years/
///     ├── 2025.yaml   # Constants for data year 2025
///     └── 2026.yaml   # Constants for data year 2026
/// ```
///
/// # Example
///
/// ```no_run
/// use buyout_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/federal").unwrap();
/// let config = loader.resolve(Some(2026)).unwrap();
/// println!("Federal rate: {}", config.taxes.federal_rate);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    catalog: ConfigCatalog,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `metadata.yaml` or the `years` directory is
    /// missing, if any file is not valid YAML, if two files claim the same
    /// data year, or if a version fails [`CalculatorConfig::validate`].
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ConfigMetadata>(&path.join("metadata.yaml"))?;
        let versions = Self::load_versions(&path.join("years"))?;

        debug!(
            path = %path.display(),
            versions = versions.len(),
            "Loaded calculator configuration"
        );

        Ok(Self {
            catalog: ConfigCatalog::new(metadata, versions),
        })
    }

    /// Wraps an already-built catalog.
    pub fn from_catalog(catalog: ConfigCatalog) -> Self {
        Self { catalog }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every `*.yaml` file in the years directory.
    fn load_versions(years_dir: &Path) -> EngineResult<Vec<CalculatorConfig>> {
        let years_dir_str = years_dir.display().to_string();

        let entries = fs::read_dir(years_dir).map_err(|_| EngineError::ConfigNotFound {
            path: years_dir_str.clone(),
        })?;

        let mut versions: Vec<CalculatorConfig> = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: years_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let version = Self::load_yaml::<CalculatorConfig>(&path)?;
                version.validate()?;

                if versions.iter().any(|v| v.data_year == version.data_year) {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("duplicate data year {}", version.data_year),
                    });
                }
                versions.push(version);
            }
        }

        if versions.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no config versions found)", years_dir_str),
            });
        }

        Ok(versions)
    }

    /// Returns the underlying catalog.
    pub fn catalog(&self) -> &ConfigCatalog {
        &self.catalog
    }

    /// Returns the shared metadata.
    pub fn metadata(&self) -> &ConfigMetadata {
        self.catalog.metadata()
    }

    /// Selects the config snapshot for a request.
    ///
    /// `None` selects the newest version; `Some(year)` selects the most
    /// recent version whose data year is on or before `year`.
    pub fn resolve(&self, year: Option<i32>) -> EngineResult<&CalculatorConfig> {
        match year {
            Some(year) => self
                .catalog
                .for_year(year)
                .ok_or(EngineError::ConfigVersionNotFound { year }),
            None => self
                .catalog
                .latest()
                .ok_or_else(|| EngineError::ConfigNotFound {
                    path: "no config versions loaded".to_string(),
                }),
        }
    }
}
