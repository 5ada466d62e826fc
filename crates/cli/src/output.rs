//! Output formatting for CLI

use aimed_common::ValidationResult;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Plain text format
    Plain,
}

/// Render a validation result as plain text
pub fn render_plain(result: &ValidationResult) -> String {
    let mut out = Vec::new();

    out.push(format!("Validation: {}", status_word(result)));
    out.push(format!(
        "Sections found ({}): {}",
        result.sections_found.len(),
        result.sections_found.join(", ")
    ));

    if !result.sections_missing.is_empty() {
        out.push(format!(
            "Sections missing ({}): {}",
            result.sections_missing.len(),
            result.sections_missing.join(", ")
        ));
    }

    if !result.empty_sections.is_empty() {
        out.push(format!("Empty sections: {}", result.empty_sections.join(", ")));
    }

    if !result.duplicate_sections.is_empty() {
        out.push(format!(
            "Duplicate sections: {}",
            result.duplicate_sections.join(", ")
        ));
    }

    if !result.warnings.is_empty() {
        out.push(format!("Warnings ({}):", result.warnings.len()));
        for warning in &result.warnings {
            out.push(format!("  {}", warning));
        }
    }

    out.push(format!("Bosnian diacritics: {}", yes_no(result.has_diacritics)));

    if !result.issues.is_empty() {
        out.push("Issues:".to_string());
        for issue in &result.issues {
            out.push(format!("  - {}", issue));
        }
    }

    out.join("\n")
}

/// Render a validation result as a summary table
pub fn render_table(result: &ValidationResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["Check", "Count", "Details"]);
    table.add_row(vec![
        "Sections found".to_string(),
        result.sections_found.len().to_string(),
        result.sections_found.join("\n"),
    ]);
    table.add_row(vec![
        "Sections missing".to_string(),
        result.sections_missing.len().to_string(),
        result.sections_missing.join("\n"),
    ]);
    table.add_row(vec![
        "Empty sections".to_string(),
        result.empty_sections.len().to_string(),
        result.empty_sections.join("\n"),
    ]);
    if !result.duplicate_sections.is_empty() {
        table.add_row(vec![
            "Duplicate sections".to_string(),
            result.duplicate_sections.len().to_string(),
            result.duplicate_sections.join("\n"),
        ]);
    }
    table.add_row(vec![
        "Warnings".to_string(),
        result.warnings.len().to_string(),
        result.warnings.join("\n"),
    ]);
    table.add_row(vec![
        "Bosnian diacritics".to_string(),
        String::new(),
        yes_no(result.has_diacritics).to_string(),
    ]);

    table
}

/// Print a validation result in the requested format
pub fn print_validation(result: &ValidationResult, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let status = if result.is_valid {
                "PASS".green().bold()
            } else {
                "FAIL".red().bold()
            };
            println!("Validation: {}", status);
            println!("{}", render_table(result));
            if !result.issues.is_empty() {
                println!("Issues:");
                for issue in &result.issues {
                    let line = format!("  - {}", issue);
                    if issue.is_fatal() {
                        println!("{}", line.red());
                    } else {
                        println!("{}", line.yellow());
                    }
                }
            }
        }
        OutputFormat::Json => print_json(result),
        OutputFormat::Plain => println!("{}", render_plain(result)),
    }
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn status_word(result: &ValidationResult) -> &'static str {
    if result.is_valid {
        "PASS"
    } else {
        "FAIL"
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aimed_common::validate;

    #[test]
    fn test_plain_pass_layout() {
        let result = validate(
            "DATUM PREGLEDA\n01.01.2024\nPODACI O PACIJENTU\nMarko Marković\nANAMNEZA\nBez tegoba\n[NAPOMENA: x]\n",
        );
        let text = render_plain(&result);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Validation: PASS");
        assert_eq!(
            lines[1],
            "Sections found (3): DATUM PREGLEDA, PODACI O PACIJENTU, ANAMNEZA"
        );
        assert!(lines[2].starts_with("Sections missing (4): STATUS"));
        assert_eq!(lines[3], "Warnings (1):");
        assert_eq!(lines[4], "  [NAPOMENA: x]");
        assert_eq!(lines[5], "Bosnian diacritics: Yes");
        assert_eq!(lines[6], "Issues:");
    }

    #[test]
    fn test_plain_empty_input() {
        let text = render_plain(&validate(""));
        assert_eq!(
            text,
            "Validation: FAIL\nSections found (0): \nBosnian diacritics: No\nIssues:\n  - Report text is empty"
        );
    }

    #[test]
    fn test_table_has_diacritics_row() {
        let table = render_table(&validate("STATUS\nx\n")).to_string();
        assert!(table.contains("Bosnian diacritics"));
        assert!(table.contains("STATUS"));
    }
}
