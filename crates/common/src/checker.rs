//! Section checklist comparison

use crate::section::SectionMap;

/// Checklist entries not present among the discovered sections, in
/// checklist order
pub fn missing_sections(sections: &SectionMap, expected: &[String]) -> Vec<String> {
    expected
        .iter()
        .filter(|name| !sections.contains(name))
        .cloned()
        .collect()
}

/// Discovered sections with no content, in discovery order
pub fn empty_sections(sections: &SectionMap) -> Vec<String> {
    sections
        .iter()
        .filter(|s| s.is_empty())
        .map(|s| s.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidatorConfig;
    use crate::section::split;

    fn sections(text: &str) -> SectionMap {
        split(text, &ValidatorConfig::default()).sections
    }

    #[test]
    fn test_missing_in_checklist_order() {
        let found = sections("TERAPIJA\nx\nANAMNEZA\ny\n");
        let expected: Vec<String> = ["ANAMNEZA", "STATUS", "DIJAGNOZA", "TERAPIJA"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(missing_sections(&found, &expected), vec!["STATUS", "DIJAGNOZA"]);
    }

    #[test]
    fn test_extra_sections_are_not_missing() {
        let found = sections("ZAKLJUČAK\nx\n");
        let expected = vec!["ZAKLJUČAK".to_string()];
        assert!(missing_sections(&found, &expected).is_empty());
    }

    #[test]
    fn test_empty_in_discovery_order() {
        let found = sections("TERAPIJA\nANAMNEZA\nBez tegoba\nSTATUS\n");
        assert_eq!(empty_sections(&found), vec!["TERAPIJA", "STATUS"]);
    }

    #[test]
    fn test_nothing_discovered() {
        let found = SectionMap::new();
        assert!(empty_sections(&found).is_empty());
        assert_eq!(
            missing_sections(&found, &ValidatorConfig::default().expected_sections).len(),
            7
        );
    }
}
