use crate::domain::error::{AppError, Result};
use crate::domain::test_suite::TestSuite;
use std::fs;
use std::path::{Path, PathBuf};
use validator::Validate;

pub const DEFAULT_EXPORT_FILE: &str = "test_cases.json";

/// Writes the suite as pretty-printed UTF-8 JSON and returns the path written.
pub fn export_to_json(suite: &TestSuite, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(suite)
        .map_err(|e| AppError::ParseError(format!("Failed to serialize test suite: {}", e)))?;
    fs::write(path, json)?;

    tracing::info!(path = %path.display(), cases = suite.test_cases().len(), "Exported test suite");
    Ok(path.to_path_buf())
}

/// Reads a previously exported suite, applying the same checks as live output.
pub fn load_from_json(path: &Path) -> Result<TestSuite> {
    let content = fs::read_to_string(path)?;
    let suite: TestSuite = serde_json::from_str(&content).map_err(|e| {
        AppError::ParseError(format!("Invalid test suite file {}: {}", path.display(), e))
    })?;
    suite.validate()?;
    Ok(suite)
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
