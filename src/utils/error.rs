use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpiralError {
    #[error("Invalid date '{input}': {reason}")]
    InvalidDateFormat { input: String, reason: String },

    #[error("Degenerate modulus: day component is zero")]
    DegenerateModulus,

    #[error("Division by zero: signal value n is zero")]
    DivisionByZero,

    #[error("Highlight index {index} outside generated range 0..{point_count}")]
    IndexOutOfRange { index: i64, point_count: usize },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Computation,
    Config,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SpiralError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpiralError::InvalidDateFormat { .. } => ErrorCategory::Input,
            SpiralError::DegenerateModulus
            | SpiralError::DivisionByZero
            | SpiralError::IndexOutOfRange { .. }
            | SpiralError::ProcessingError { .. } => ErrorCategory::Computation,
            SpiralError::MissingConfigError { .. }
            | SpiralError::InvalidConfigValueError { .. }
            | SpiralError::ConfigValidationError { .. } => ErrorCategory::Config,
            SpiralError::ZipError(_)
            | SpiralError::CsvError(_)
            | SpiralError::IoError(_)
            | SpiralError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Config => ErrorSeverity::High,
            ErrorCategory::Computation => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SpiralError::InvalidDateFormat { .. } => {
                "Enter the date as YYYY-MM-DD, e.g. 1990-01-01".to_string()
            }
            SpiralError::DegenerateModulus => {
                "Day component must be at least 1; check how the parameters were built".to_string()
            }
            SpiralError::DivisionByZero => {
                "Signal value n must be non-zero; check how the parameters were built".to_string()
            }
            SpiralError::IndexOutOfRange { index, .. } => format!(
                "Increase the point count (or buffer) so it exceeds index {}",
                index
            ),
            SpiralError::MissingConfigError { field } => {
                format!("Add the '{}' field to the configuration", field)
            }
            SpiralError::InvalidConfigValueError { field, .. }
            | SpiralError::ConfigValidationError { field, .. } => {
                format!("Fix the '{}' field in the configuration", field)
            }
            SpiralError::IoError(_) => {
                "Check that the output path exists and is writable".to_string()
            }
            SpiralError::ZipError(_) | SpiralError::CsvError(_) => {
                "Re-run the export; if it persists the output data may be malformed".to_string()
            }
            SpiralError::SerializationError(_) => {
                "Re-run the reading; report this if it persists".to_string()
            }
            SpiralError::ProcessingError { .. } => {
                "Re-run with --verbose to see which stage failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SpiralError::InvalidDateFormat { input, .. } => {
                format!("'{}' is not a valid calendar date", input)
            }
            SpiralError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'", field)
            }
            SpiralError::InvalidConfigValueError { field, value, .. } => {
                format!("Configuration field '{}' has invalid value '{}'", field, value)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpiralError>;
