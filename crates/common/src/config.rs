//! Validator configuration
//!
//! The expected-section checklist, diacritic set and warning marker are
//! passed to the validator as a value instead of living in globals. The
//! defaults match the report format produced by the AiMED webhook. A config
//! file may override any subset of fields:
//!
//! ```toml
//! min_sections = 4
//! duplicate_policy = "merge"
//! expected_sections = ["ANAMNEZA", "STATUS", "DIJAGNOZA"]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::section::is_heading;
use crate::{Error, Result};

/// Sections a complete report is expected to carry, in report order
pub const DEFAULT_EXPECTED_SECTIONS: [&str; 7] = [
    "DATUM PREGLEDA",
    "PODACI O PACIJENTU",
    "ANAMNEZA",
    "STATUS",
    "DIJAGNOZA",
    "TERAPIJA",
    "PREPORUKE / KONTROLA",
];

/// Bosnian diacritics, lower and upper case
pub const DEFAULT_DIACRITICS: &str = "čćšžđČĆŠŽĐ";

/// Prefix of annotation lines emitted by the report generator
pub const DEFAULT_WARNING_MARKER: &str = "[NAPOMENA";

/// Minimum number of discovered sections for a report to be valid
pub const DEFAULT_MIN_SECTIONS: usize = 3;

/// What to do when a heading name appears more than once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Start the section over; earlier content is discarded
    #[default]
    Replace,
    /// Keep appending to the first occurrence
    Merge,
    /// Replace, and fail validation
    Reject,
}

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Ordered checklist of section names
    pub expected_sections: Vec<String>,

    /// Characters whose presence signals correct text encoding
    pub diacritics: String,

    /// Lines starting with this prefix are collected as warnings
    pub warning_marker: String,

    /// Fewer discovered sections than this makes the report invalid
    pub min_sections: usize,

    /// Handling of repeated heading names
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            expected_sections: DEFAULT_EXPECTED_SECTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            diacritics: DEFAULT_DIACRITICS.to_string(),
            warning_marker: DEFAULT_WARNING_MARKER.to_string(),
            min_sections: DEFAULT_MIN_SECTIONS,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl ValidatorConfig {
    /// Parse a config from TOML; missing fields take their defaults
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading validator config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.warning_marker.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "warning_marker must not be empty".to_string(),
            ));
        }

        if self.diacritics.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "diacritics must contain at least one character".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.expected_sections {
            if name.trim().is_empty() {
                return Err(Error::InvalidConfig(
                    "expected_sections must not contain blank names".to_string(),
                ));
            }
            if name.trim() != name || !is_heading(name) {
                return Err(Error::InvalidConfig(format!(
                    "expected section can never match an all-caps heading: {:?}",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "expected section listed twice: {}",
                    name
                )));
            }
        }

        Ok(())
    }
}
