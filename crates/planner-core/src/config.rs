// ABOUTME: Configuration loading and validation for the planning ledger.
// ABOUTME: Reads PLANNER_* environment variables and falls back to defaults.

use std::str::FromStr;

use thiserror::Error;

use crate::export::ExportFormat;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("PLANNER_FORMAT must be one of markdown, yaml, json; got {0:?}")]
    InvalidFormat(String),

    #[error("PLANNER_DEFAULT_LOCATION must not be empty")]
    EmptyLocation,
}

/// Whether adding the same (vendor, category) pair twice is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep every assignment, e.g. a caterer booked for two line items.
    #[default]
    Allow,
    /// Refuse the second assignment with `LedgerError::DuplicateAssignment`.
    Reject,
}

/// Ledger configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub default_location: String,
    pub duplicate_policy: DuplicatePolicy,
    pub currency_symbol: String,
    pub format: ExportFormat,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_location: "Location TBD".to_string(),
            duplicate_policy: DuplicatePolicy::Allow,
            currency_symbol: "$".to_string(),
            format: ExportFormat::Markdown,
        }
    }
}

impl LedgerConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - PLANNER_DEFAULT_LOCATION: location for events created without one (default: Location TBD)
    /// - PLANNER_REJECT_DUPLICATE_VENDORS: refuse repeated vendor+category assignments (default: false)
    /// - PLANNER_CURRENCY: symbol used when rendering amounts (default: $)
    /// - PLANNER_FORMAT: summary format, markdown | yaml | json (default: markdown)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let default_location = match std::env::var("PLANNER_DEFAULT_LOCATION") {
            Ok(v) if v.trim().is_empty() => return Err(ConfigError::EmptyLocation),
            Ok(v) => v,
            Err(_) => defaults.default_location,
        };

        let reject = std::env::var("PLANNER_REJECT_DUPLICATE_VENDORS")
            .map(|v| v == "true" || v == "1" || v == "yes")
            .unwrap_or(false);
        let duplicate_policy = if reject {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::Allow
        };

        let currency_symbol = std::env::var("PLANNER_CURRENCY")
            .ok()
            .filter(|c| !c.is_empty())
            .unwrap_or(defaults.currency_symbol);

        let format = match std::env::var("PLANNER_FORMAT") {
            Ok(v) => ExportFormat::from_str(&v).map_err(|_| ConfigError::InvalidFormat(v))?,
            Err(_) => defaults.format,
        };

        Ok(Self {
            default_location,
            duplicate_policy,
            currency_symbol,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 4] = [
        "PLANNER_DEFAULT_LOCATION",
        "PLANNER_REJECT_DUPLICATE_VENDORS",
        "PLANNER_CURRENCY",
        "PLANNER_FORMAT",
    ];

    // Both cases live in one test so they never race on the process environment.
    #[test]
    fn config_reads_env_and_defaults() {
        // SAFETY: test-only code; no other test in this crate touches PLANNER_* vars
        unsafe {
            for var in VARS {
                std::env::remove_var(var);
            }
        }

        let config = LedgerConfig::from_env().unwrap();
        assert_eq!(config.default_location, "Location TBD");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Allow);
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.format, ExportFormat::Markdown);

        // SAFETY: as above
        unsafe {
            std::env::set_var("PLANNER_DEFAULT_LOCATION", "Mumbai");
            std::env::set_var("PLANNER_REJECT_DUPLICATE_VENDORS", "yes");
            std::env::set_var("PLANNER_CURRENCY", "₹");
            std::env::set_var("PLANNER_FORMAT", "yaml");
        }
        let config = LedgerConfig::from_env().unwrap();
        assert_eq!(config.default_location, "Mumbai");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.format, ExportFormat::Yaml);

        // SAFETY: as above
        unsafe {
            std::env::set_var("PLANNER_FORMAT", "pdf");
        }
        let err = LedgerConfig::from_env().unwrap_err();

        // SAFETY: as above
        unsafe {
            for var in VARS {
                std::env::remove_var(var);
            }
        }

        assert!(
            err.to_string().contains("PLANNER_FORMAT"),
            "error should name the variable: {}",
            err
        );
    }
}
