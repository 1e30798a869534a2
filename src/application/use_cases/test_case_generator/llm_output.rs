use crate::domain::error::{AppError, Result};
use crate::domain::test_suite::TestSuite;
use crate::infrastructure::response::{clean_llm_response, extract_json_payload, preview_text};
use validator::Validate;

const OUTPUT_SNIPPET_CHARS: usize = 600;

/// Parses raw model text into a validated suite.
///
/// Missing fields and unknown `test_type`/`priority` values fail in serde;
/// structural rules (non-empty cases and steps) fail in `validate`.
pub(crate) fn parse_test_suite(raw_output: &str) -> Result<TestSuite> {
    let cleaned = clean_llm_response(raw_output);
    let normalized = extract_json_payload(&cleaned);

    let suite = serde_json::from_str::<TestSuite>(&normalized).map_err(|err| {
        AppError::ParseError(format!(
            "Failed to parse LLM test suite output: {} | output_snippet={}",
            err,
            preview_text(&normalized, OUTPUT_SNIPPET_CHARS)
        ))
    })?;

    suite.validate().map_err(|err| {
        AppError::ValidationError(format!(
            "LLM test suite output failed validation: {}",
            err
        ))
    })?;

    Ok(suite)
}
