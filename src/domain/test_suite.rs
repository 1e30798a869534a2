use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TestType {
    Functional,
    Negative,
    EdgeCase,
    Security,
}

impl TestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Functional => "functional",
            TestType::Negative => "negative",
            TestType::EdgeCase => "edge_case",
            TestType::Security => "security",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single generated test scenario.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate, Clone, PartialEq)]
pub struct TestCase {
    /// Unique test case identifier (e.g., TC001)
    test_id: String,
    /// Brief test case title
    title: String,
    /// Detailed test case description
    description: String,
    /// List of preconditions
    preconditions: Vec<String>,
    /// Step-by-step test execution steps
    #[validate(length(min = 1, message = "a test case needs at least one step"))]
    steps: Vec<String>,
    /// Expected outcome
    expected_result: String,
    /// Type: functional, negative, edge_case, or security
    test_type: TestType,
    /// Priority: high, medium, or low
    priority: Priority,
}

impl TestCase {
    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn preconditions(&self) -> &[String] {
        &self.preconditions
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn expected_result(&self) -> &str {
        &self.expected_result
    }

    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}

/// The complete result of one generation call.
///
/// Fields are only readable; a suite is built in one piece from a parsed
/// backend response and never patched afterwards.
#[derive(Debug, Serialize, Deserialize, JsonSchema, Validate, Clone, PartialEq)]
pub struct TestSuite {
    /// Original user story
    user_story: String,
    /// List of generated test cases
    #[validate(
        length(min = 1, message = "the suite contains no test cases"),
        nested
    )]
    test_cases: Vec<TestCase>,
    /// Summary of test coverage
    coverage_summary: String,
}

impl TestSuite {
    pub fn user_story(&self) -> &str {
        &self.user_story
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn coverage_summary(&self) -> &str {
        &self.coverage_summary
    }

    /// Replaces whatever story the model echoed with the caller's input.
    pub(crate) fn with_user_story(self, user_story: &str) -> Self {
        Self {
            user_story: user_story.to_string(),
            ..self
        }
    }
}
