//! Environment-driven settings for the inventory pipeline.

use stockroom_core::{DomainError, DomainResult};

use crate::stock::{StockPolicy, DEFAULT_REORDER_LEVEL};

/// Overrides the fallback reorder level applied to groups without their own.
pub const REORDER_LEVEL_ENV: &str = "STOCKROOM_DEFAULT_REORDER_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InventorySettings {
    pub default_reorder_level: f64,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            default_reorder_level: DEFAULT_REORDER_LEVEL,
        }
    }
}

impl InventorySettings {
    /// Read settings from the process environment.
    ///
    /// Invalid values are logged and replaced by defaults; startup never fails
    /// on a bad threshold.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = lookup(REORDER_LEVEL_ENV) {
            match parse_reorder_level(&raw) {
                Ok(level) => settings.default_reorder_level = level,
                Err(e) => tracing::warn!(
                    error = %e,
                    default = DEFAULT_REORDER_LEVEL,
                    "{REORDER_LEVEL_ENV} rejected; using default"
                ),
            }
        }

        settings
    }

    pub fn stock_policy(&self) -> StockPolicy {
        StockPolicy::new(self.default_reorder_level)
    }
}

fn parse_reorder_level(raw: &str) -> DomainResult<f64> {
    let level: f64 = raw
        .trim()
        .parse()
        .map_err(|_| DomainError::config(format!("{REORDER_LEVEL_ENV}={raw:?} is not a number")))?;

    if !level.is_finite() || level < 0.0 {
        return Err(DomainError::config(format!(
            "{REORDER_LEVEL_ENV} must be a finite non-negative number, got {level}"
        )));
    }

    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(value: Option<&'static str>) -> impl Fn(&str) -> Option<String> {
        move |key| {
            assert_eq!(key, REORDER_LEVEL_ENV);
            value.map(str::to_string)
        }
    }

    #[test]
    fn unset_uses_default() {
        let settings = InventorySettings::from_lookup(lookup(None));
        assert_eq!(settings.default_reorder_level, DEFAULT_REORDER_LEVEL);
        assert_eq!(settings.stock_policy(), StockPolicy::default());
    }

    #[test]
    fn valid_override_is_applied() {
        let settings = InventorySettings::from_lookup(lookup(Some(" 12.5 ")));
        assert_eq!(settings.default_reorder_level, 12.5);
        assert_eq!(settings.stock_policy().default_reorder_level(), 12.5);
    }

    #[test]
    fn invalid_values_fall_back() {
        for raw in ["plenty", "-1", "inf", "NaN"] {
            let settings = InventorySettings::from_lookup(lookup(Some(raw)));
            assert_eq!(settings.default_reorder_level, DEFAULT_REORDER_LEVEL, "{raw}");
        }
    }

    #[test]
    fn parse_reports_config_errors() {
        assert!(matches!(parse_reorder_level("x"), Err(DomainError::Config(_))));
        assert_eq!(parse_reorder_level("0").unwrap(), 0.0);
    }
}
