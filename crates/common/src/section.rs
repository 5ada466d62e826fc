//! Section splitting for plain-text medical reports
//!
//! Reports arrive as plain text where each section starts with an
//! all-caps heading line:
//!
//! ```text
//! ANAMNEZA
//! Pacijent se žali na glavobolju.
//! [NAPOMENA: provjeriti dozu]
//! STATUS
//! Uredan.
//! ```
//!
//! Annotation lines starting with the warning marker are pulled out as
//! warnings and never take part in heading or body classification.

use serde::{Deserialize, Serialize};

use crate::config::{DuplicatePolicy, ValidatorConfig};

/// A named region of report text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    /// Non-blank lines under the heading, each followed by `\n`
    pub body: String,
}

impl Section {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            body: String::new(),
        }
    }

    /// Whether the section carries no content
    pub fn is_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Sections keyed by name, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionMap {
    sections: Vec<Section>,
}

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Section names in first-seen order
    pub fn names(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.name.clone()).collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.name == name)
    }

    /// Open a section for writing and return its index.
    ///
    /// Returns `(index, repeated)`; a repeated name keeps its original
    /// position whatever the policy.
    fn open(&mut self, name: &str, policy: DuplicatePolicy) -> (usize, bool) {
        match self.position(name) {
            Some(idx) => {
                match policy {
                    DuplicatePolicy::Replace | DuplicatePolicy::Reject => {
                        self.sections[idx].body.clear();
                    }
                    DuplicatePolicy::Merge => {}
                }
                (idx, true)
            }
            None => {
                self.sections.push(Section::new(name));
                (self.sections.len() - 1, false)
            }
        }
    }

    fn append(&mut self, idx: usize, line: &str) {
        let body = &mut self.sections[idx].body;
        body.push_str(line);
        body.push('\n');
    }
}

/// Classification of a single report line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Warning(&'a str),
    Heading(&'a str),
    Body(&'a str),
}

/// Classify one line of report text; the returned text is trimmed
pub fn classify<'a>(line: &'a str, warning_marker: &str) -> Line<'a> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        Line::Blank
    } else if trimmed.starts_with(warning_marker) {
        Line::Warning(trimmed)
    } else if is_heading(trimmed) {
        Line::Heading(trimmed)
    } else {
        Line::Body(trimmed)
    }
}

/// All-caps heading heuristic.
///
/// The line must equal its own upper-case form, be longer than two
/// characters, not open with `[`, and contain a letter. The letter rule
/// keeps dates and numeric lines such as `01.01.2024` in the body.
pub fn is_heading(trimmed: &str) -> bool {
    trimmed.chars().count() > 2
        && !trimmed.starts_with('[')
        && trimmed.chars().any(char::is_alphabetic)
        && trimmed.to_uppercase() == trimmed
}

/// Output of a single splitting pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    pub sections: SectionMap,
    /// Annotation lines, trimmed, in encounter order
    pub warnings: Vec<String>,
    /// Heading names seen more than once, in order of first repeat
    pub duplicates: Vec<String>,
}

/// Split report text into sections and warnings in one pass.
///
/// Lines before the first heading attach to no section and are dropped.
pub fn split(text: &str, config: &ValidatorConfig) -> SplitOutcome {
    let mut outcome = SplitOutcome::default();
    let mut current: Option<usize> = None;

    for line in text.lines() {
        match classify(line, &config.warning_marker) {
            Line::Blank => {}
            Line::Warning(warning) => outcome.warnings.push(warning.to_string()),
            Line::Heading(name) => {
                let (idx, repeated) = outcome.sections.open(name, config.duplicate_policy);
                if repeated && !outcome.duplicates.iter().any(|d| d == name) {
                    outcome.duplicates.push(name.to_string());
                }
                current = Some(idx);
            }
            Line::Body(content) => {
                if let Some(idx) = current {
                    outcome.sections.append(idx, content);
                }
            }
        }
    }

    outcome
}
