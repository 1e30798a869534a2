mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
mod interfaces;

pub use app::run;
pub use application::TestCaseGenerator;
pub use domain::error::{AppError, Result};
pub use domain::llm_config::{LLMConfig, LLMProvider};
pub use domain::test_suite::{Priority, TestCase, TestSuite, TestType};
pub use infrastructure::llm_clients::{LLMClient, RouterClient};
