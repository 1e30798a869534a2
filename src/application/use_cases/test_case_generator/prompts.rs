use crate::domain::test_suite::TestSuite;
use once_cell::sync::Lazy;

pub(crate) const MIN_SUGGESTED_CASES: usize = 5;
pub(crate) const MAX_SUGGESTED_CASES: usize = 8;

static OUTPUT_SCHEMA: Lazy<String> = Lazy::new(|| {
    let schema = schemars::schema_for!(TestSuite);
    serde_json::to_string(&schema).unwrap_or_default()
});

/// JSON schema of the expected answer, derived from the parser's own types.
pub(crate) fn output_schema() -> &'static str {
    &OUTPUT_SCHEMA
}

pub(crate) fn build_format_instructions() -> String {
    format!(
        r#"Respond with a single JSON object that validates against the JSON schema below. Do not wrap it in prose.

Every field listed under "required" must be present. "test_type" must be exactly one of "functional", "negative", "edge_case", "security". "priority" must be exactly one of "high", "medium", "low". Use lowercase values exactly as written.

Output schema:
```
{}
```"#,
        output_schema()
    )
}

pub(crate) fn build_system_prompt() -> String {
    format!(
        r#"You are an expert QA engineer specializing in test case design.
Your task is to analyze user stories and generate comprehensive test cases.

Generate test cases that cover:
- Positive scenarios (happy path)
- Negative scenarios (error handling)
- Edge cases (boundary conditions)
- Security considerations (if applicable)

For each test case, provide:
- Unique test ID
- Clear title and description
- Preconditions
- Detailed steps
- Expected results
- Test type and priority

{}"#,
        build_format_instructions()
    )
}

pub(crate) fn build_user_prompt(user_story: &str) -> String {
    format!(
        "User Story:\n{}\n\nGenerate a comprehensive test suite with {}-{} test cases covering different scenarios.",
        user_story, MIN_SUGGESTED_CASES, MAX_SUGGESTED_CASES
    )
}
