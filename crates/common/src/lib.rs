//! AiMED Common Library
//!
//! Structural validation of generated medical report text: section
//! splitting, checklist comparison, warning extraction and an encoding
//! sanity check, combined into a single pass/fail verdict.

pub mod checker;
pub mod config;
pub mod encoding;
pub mod error;
pub mod section;
pub mod validator;

// Re-export commonly used types
pub use config::{DuplicatePolicy, ValidatorConfig};
pub use error::{Error, Result};
pub use section::{Section, SectionMap};
pub use validator::{validate, Issue, ReportValidator, ValidationResult};

/// AiMED tooling version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
