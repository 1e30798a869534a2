use std::fmt;

#[derive(Debug)]
pub enum AppError {
    ConfigurationError(String),
    InputError(String),
    GenerationError(String),
    ValidationError(String),
    ParseError(String),
    LLMError(String),
    SecurityError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InputError(msg) => write!(f, "Input error: {}", msg),
            AppError::GenerationError(msg) => write!(f, "Error generating test cases: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::LLMError(msg) => write!(f, "LLM error: {}", msg),
            AppError::SecurityError(msg) => write!(f, "Security error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// Wraps any failure below the generator boundary, keeping its description.
    pub fn generation(err: AppError) -> Self {
        match err {
            AppError::GenerationError(_) => err,
            other => AppError::GenerationError(other.to_string()),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, AppError::ConfigurationError(_))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigurationError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
