//! Report text validation
//!
//! Combines section splitting, checklist comparison and the encoding check
//! into one verdict. Checks always run in the same order and none of them
//! short-circuits the others, so `issues` reads in check order.
//!
//! Only fatal issues flip `is_valid`. With the default configuration those
//! are empty input and too few sections; empty sections, missing sections
//! and missing diacritics are recorded but leave the report valid.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::checker::{empty_sections, missing_sections};
use crate::config::{DuplicatePolicy, ValidatorConfig};
use crate::encoding::DiacriticSet;
use crate::section::split;
use crate::Result;

/// A single structural finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    EmptyInput,
    TooFewSections { found: usize, minimum: usize },
    MissingSections { sections: Vec<String> },
    EmptySections { sections: Vec<String> },
    DuplicateSections { sections: Vec<String> },
    NoDiacritics,
}

impl Issue {
    /// Whether this issue makes the report invalid
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Issue::EmptyInput | Issue::TooFewSections { .. } | Issue::DuplicateSections { .. }
        )
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::EmptyInput => write!(f, "Report text is empty"),
            Issue::TooFewSections { found, minimum } => {
                write!(f, "Only {} sections found (minimum {})", found, minimum)
            }
            Issue::MissingSections { sections } => {
                write!(f, "Missing sections: {}", sections.join(", "))
            }
            Issue::EmptySections { sections } => {
                write!(f, "Empty sections: {}", sections.join(", "))
            }
            Issue::DuplicateSections { sections } => {
                write!(f, "Duplicate sections: {}", sections.join(", "))
            }
            Issue::NoDiacritics => {
                write!(f, "No Bosnian diacritics found - possible encoding issue")
            }
        }
    }
}

/// Outcome of validating one report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub sections_found: Vec<String>,
    pub sections_missing: Vec<String>,
    pub empty_sections: Vec<String>,
    pub duplicate_sections: Vec<String>,
    pub warnings: Vec<String>,
    pub has_diacritics: bool,
    pub issues: Vec<Issue>,
}

impl ValidationResult {
    /// Issue texts in check order
    pub fn issue_messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.to_string()).collect()
    }

    /// Render as pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Validator bound to one configuration
#[derive(Debug, Clone)]
pub struct ReportValidator {
    config: ValidatorConfig,
    diacritics: DiacriticSet,
}

impl Default for ReportValidator {
    fn default() -> Self {
        let config = ValidatorConfig::default();
        Self {
            diacritics: DiacriticSet::new(&config.diacritics),
            config,
        }
    }
}

impl ReportValidator {
    /// Create a validator, rejecting inconsistent configuration
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            diacritics: DiacriticSet::new(&config.diacritics),
            config,
        })
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate one block of report text
    pub fn validate(&self, text: &str) -> ValidationResult {
        if text.trim().is_empty() {
            return ValidationResult {
                is_valid: false,
                issues: vec![Issue::EmptyInput],
                ..Default::default()
            };
        }

        let outcome = split(text, &self.config);

        let mut result = ValidationResult {
            is_valid: true,
            sections_found: outcome.sections.names(),
            sections_missing: missing_sections(&outcome.sections, &self.config.expected_sections),
            empty_sections: empty_sections(&outcome.sections),
            duplicate_sections: outcome.duplicates,
            warnings: outcome.warnings,
            has_diacritics: self.diacritics.contains_any(text),
            issues: Vec::new(),
        };

        let found = result.sections_found.len();
        if found < self.config.min_sections {
            result.issues.push(Issue::TooFewSections {
                found,
                minimum: self.config.min_sections,
            });
        }

        if !result.sections_missing.is_empty() {
            result.issues.push(Issue::MissingSections {
                sections: result.sections_missing.clone(),
            });
        }

        if !result.empty_sections.is_empty() {
            result.issues.push(Issue::EmptySections {
                sections: result.empty_sections.clone(),
            });
        }

        if self.config.duplicate_policy == DuplicatePolicy::Reject
            && !result.duplicate_sections.is_empty()
        {
            result.issues.push(Issue::DuplicateSections {
                sections: result.duplicate_sections.clone(),
            });
        }

        if !result.has_diacritics {
            result.issues.push(Issue::NoDiacritics);
        }

        result.is_valid = !result.issues.iter().any(Issue::is_fatal);

        debug!(
            sections = found,
            missing = result.sections_missing.len(),
            warnings = result.warnings.len(),
            valid = result.is_valid,
            "Validated report text"
        );

        result
    }
}

/// Validate report text against the default configuration
pub fn validate(text: &str) -> ValidationResult {
    ReportValidator::default().validate(text)
}
