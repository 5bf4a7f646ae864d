//! Run configuration.
//!
//! Loaded from TOML. Every field has a default so an empty document is a
//! valid configuration:
//!
//! ```toml
//! cycle_start_month = 1
//! floating_roles = ["Greeter"]
//! service_weekday = "Sunday"
//! carry_rotation = false
//! ```
//!
//! `cycle_start_month` is read leniently: integers, numeric strings and
//! month names (`"march"`, `"Mar"`) are accepted, and anything outside
//! 1-12 is dropped with a warning so the January default applies.

use std::path::Path;

use chrono::{Month, Weekday};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, RotaError};
use crate::models::calendar::normalize_cycle_start_month;

/// Settings supplied by the surrounding system for one rotation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationConfig {
    /// First month (1-12) of the three-month planning cycle.
    ///
    /// Missing or out-of-range values fall back to January.
    #[serde(
        default,
        deserialize_with = "lenient_month",
        skip_serializing_if = "Option::is_none"
    )]
    pub cycle_start_month: Option<u32>,
    /// Role names whose assignee does not block same-day service elsewhere.
    #[serde(default)]
    pub floating_roles: Vec<String>,
    /// Weekday on which services take place.
    #[serde(default = "default_service_weekday")]
    pub service_weekday: Weekday,
    /// Continue round-robin cursors from a previous run instead of
    /// restarting every role at its first qualified volunteer.
    #[serde(default)]
    pub carry_rotation: bool,
}

fn default_service_weekday() -> Weekday {
    Weekday::Sun
}

fn lenient_month<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<toml::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let month = match &raw {
        toml::Value::Integer(n) => u32::try_from(*n).ok(),
        toml::Value::String(s) => {
            let s = s.trim();
            s.parse::<u32>()
                .ok()
                .or_else(|| s.parse::<Month>().ok().map(|m| m.number_from_month()))
        }
        _ => None,
    }
    .filter(|m| (1..=12).contains(m));

    if month.is_none() {
        tracing::warn!(value = %raw, "Ignoring invalid cycle_start_month, using default");
    }
    Ok(month)
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            cycle_start_month: None,
            floating_roles: Vec::new(),
            service_weekday: default_service_weekday(),
            carry_rotation: false,
        }
    }
}

impl RotationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RotaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded rotation config");
        Ok(config)
    }

    /// Sets the cycle start month.
    pub fn with_cycle_start_month(mut self, month: u32) -> Self {
        self.cycle_start_month = Some(month);
        self
    }

    /// Adds a floating role name.
    pub fn with_floating_role(mut self, role: impl Into<String>) -> Self {
        self.floating_roles.push(role.into());
        self
    }

    /// Sets the service weekday.
    pub fn with_service_weekday(mut self, weekday: Weekday) -> Self {
        self.service_weekday = weekday;
        self
    }

    /// Enables or disables cursor carry-over between runs.
    pub fn with_carry_rotation(mut self, carry: bool) -> Self {
        self.carry_rotation = carry;
        self
    }

    /// Cycle start month with the default applied.
    pub fn effective_cycle_start_month(&self) -> u32 {
        normalize_cycle_start_month(self.cycle_start_month)
    }

    /// Whether `role` is configured as floating.
    pub fn is_floating(&self, role: &str) -> bool {
        self.floating_roles.iter().any(|r| r == role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RotationConfig::from_toml_str("").unwrap();
        assert_eq!(config, RotationConfig::default());
        assert_eq!(config.service_weekday, Weekday::Sun);
        assert_eq!(config.effective_cycle_start_month(), 1);
        assert!(!config.carry_rotation);
    }

    #[test]
    fn test_full_document() {
        let text = r#"
            cycle_start_month = 3
            floating_roles = ["Greeter", "Runner"]
            service_weekday = "Saturday"
            carry_rotation = true
        "#;
        let config = RotationConfig::from_toml_str(text).unwrap();
        assert_eq!(config.effective_cycle_start_month(), 3);
        assert!(config.is_floating("Greeter"));
        assert!(config.is_floating("Runner"));
        assert!(!config.is_floating("Usher"));
        assert_eq!(config.service_weekday, Weekday::Sat);
        assert!(config.carry_rotation);
    }

    #[test]
    fn test_out_of_range_month_falls_back() {
        let config = RotationConfig::new().with_cycle_start_month(13);
        assert_eq!(config.effective_cycle_start_month(), 1);

        let config = RotationConfig::new().with_cycle_start_month(0);
        assert_eq!(config.effective_cycle_start_month(), 1);
    }

    #[test]
    fn test_bad_month_values_fall_back_instead_of_failing() {
        for text in [
            "cycle_start_month = -1",
            "cycle_start_month = 0",
            "cycle_start_month = 4294967296",
            "cycle_start_month = \"banana\"",
            "cycle_start_month = 2.5",
            "cycle_start_month = true",
            "cycle_start_month = [3]",
        ] {
            let config = RotationConfig::from_toml_str(text).unwrap();
            assert_eq!(config.cycle_start_month, None, "{text}");
            assert_eq!(config.effective_cycle_start_month(), 1, "{text}");
        }
    }

    #[test]
    fn test_month_accepts_strings_and_names() {
        for text in [
            "cycle_start_month = \"3\"",
            "cycle_start_month = \" 3 \"",
            "cycle_start_month = \"march\"",
            "cycle_start_month = \"Mar\"",
        ] {
            let config = RotationConfig::from_toml_str(text).unwrap();
            assert_eq!(config.cycle_start_month, Some(3), "{text}");
        }
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        for text in [
            "cycle_start_month = ",
            "floating_roles = \"Greeter\"",
            "carry_rotation = \"yes\"",
            "service_weekday = \"Someday\"",
        ] {
            let err = RotationConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, RotaError::Config(_)), "{text}");
        }
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = RotationConfig::load("/nonexistent/rotation.toml").unwrap_err();
        assert!(matches!(err, RotaError::Io { .. }));
    }

    #[test]
    fn test_builder() {
        let config = RotationConfig::new()
            .with_cycle_start_month(7)
            .with_floating_role("Greeter")
            .with_service_weekday(Weekday::Wed)
            .with_carry_rotation(true);
        assert_eq!(config.cycle_start_month, Some(7));
        assert_eq!(config.floating_roles, vec!["Greeter".to_string()]);
        assert_eq!(config.service_weekday, Weekday::Wed);
        assert!(config.carry_rotation);
    }
}
