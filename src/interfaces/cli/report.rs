use crate::domain::test_suite::TestSuite;
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 80;

/// Renders a suite as a sectioned plain-text report.
pub fn render_report(suite: &TestSuite) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, suite);
    out
}

fn write_report(out: &mut impl Write, suite: &TestSuite) -> fmt::Result {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    writeln!(out, "{}", heavy)?;
    writeln!(out, "USER STORY")?;
    writeln!(out, "{}", heavy)?;
    writeln!(out, "{}", suite.user_story().trim())?;

    writeln!(out)?;
    writeln!(out, "{}", heavy)?;
    writeln!(
        out,
        "GENERATED TEST CASES ({} cases)",
        suite.test_cases().len()
    )?;
    writeln!(out, "{}", heavy)?;

    for case in suite.test_cases() {
        writeln!(out)?;
        writeln!(out, "[{}] {}", case.test_id(), case.title())?;
        writeln!(
            out,
            "Type: {} | Priority: {}",
            case.test_type(),
            case.priority()
        )?;
        writeln!(out)?;
        writeln!(out, "Description: {}", case.description())?;

        if !case.preconditions().is_empty() {
            writeln!(out)?;
            writeln!(out, "Preconditions:")?;
            for precondition in case.preconditions() {
                writeln!(out, "  • {}", precondition)?;
            }
        }

        writeln!(out)?;
        writeln!(out, "Steps:")?;
        for (index, step) in case.steps().iter().enumerate() {
            writeln!(out, "  {}. {}", index + 1, step)?;
        }

        writeln!(out)?;
        writeln!(out, "Expected Result: {}", case.expected_result())?;
        writeln!(out, "{}", light)?;
    }

    writeln!(out)?;
    writeln!(out, "COVERAGE SUMMARY")?;
    writeln!(out, "{}", heavy)?;
    writeln!(out, "{}", suite.coverage_summary())?;
    writeln!(out, "{}", heavy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITE_FIXTURE: &str = include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/fixtures/password_reset_suite.json"
    ));

    fn report() -> String {
        let suite: TestSuite = serde_json::from_str(SUITE_FIXTURE).unwrap();
        render_report(&suite)
    }

    #[test]
    fn test_sections_appear_in_order() {
        let report = report();
        let story = report.find("USER STORY").unwrap();
        let cases = report.find("GENERATED TEST CASES (5 cases)").unwrap();
        let summary = report.find("COVERAGE SUMMARY").unwrap();
        assert!(story < cases && cases < summary);
        assert!(report.contains("As a user, I want to reset my password via email."));
    }

    #[test]
    fn test_case_metadata_and_numbered_steps() {
        let report = report();
        assert!(report.contains("[TC001] Reset password with a registered email"));
        assert!(report.contains("Type: functional | Priority: high"));
        assert!(report.contains("Type: edge_case | Priority: low"));
        assert!(report.contains("  1. Open the login page and click 'Forgot password'"));
        assert!(report.contains("  4. Enter and confirm a new valid password"));
        assert!(report.contains("  • Mail delivery is available"));
    }

    #[test]
    fn test_empty_preconditions_are_omitted() {
        let report = report();
        let tc002 = report.find("[TC002]").unwrap();
        let tc003 = report.find("[TC003]").unwrap();
        assert!(!report[tc002..tc003].contains("Preconditions:"));
        assert!(report[tc003..].contains("Preconditions:"));
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write_str(&mut self, _s: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_write_errors_propagate() {
        let suite: TestSuite = serde_json::from_str(SUITE_FIXTURE).unwrap();
        assert!(write_report(&mut FailingWriter, &suite).is_err());

        let mut out = String::new();
        write_report(&mut out, &suite).unwrap();
        assert_eq!(out, render_report(&suite));
        assert!(out.ends_with(&format!("{}\n", "=".repeat(RULE_WIDTH))));
    }
}
