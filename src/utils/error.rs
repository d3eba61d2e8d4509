use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("File '{path}' does not have a .csv extension")]
    InvalidExtension { path: String },

    #[error("File '{path}' has unsupported content type {mime}")]
    InvalidMimeType { path: String, mime: mime::Mime },

    #[error("Unable to open '{path}': {source}")]
    UnreadableInput {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema creation failed: {message}")]
    SchemaError { message: String },

    #[error("Row at line {line} could not be decoded: {message}")]
    RowDecodeError { line: usize, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Database,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl UploadError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            UploadError::DatabaseError(_) | UploadError::SchemaError { .. } => {
                ErrorCategory::Database
            }
            UploadError::TomlError(_)
            | UploadError::ConfigError { .. }
            | UploadError::MissingConfigError { .. }
            | UploadError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            UploadError::CsvError(_)
            | UploadError::IoError(_)
            | UploadError::InvalidExtension { .. }
            | UploadError::InvalidMimeType { .. }
            | UploadError::UnreadableInput { .. } => ErrorCategory::Input,
            UploadError::RowDecodeError { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Database => ErrorSeverity::Critical,
        }
    }

    /// Row-scoped errors are reported against a single row and never stop a run.
    pub fn is_row_scoped(&self) -> bool {
        matches!(self, UploadError::RowDecodeError { .. })
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            UploadError::InvalidExtension { .. } => {
                "The file should have a .csv extension. Type --help for more details.".to_string()
            }
            UploadError::InvalidMimeType { .. } => "The file should be a valid CSV file with mime type 'text/csv' or 'text/plain'. Type --help for more details.".to_string(),
            UploadError::UnreadableInput { .. } => "Unable to open the file. Check if the file exists and has the correct permissions.".to_string(),
            UploadError::MissingConfigError { field } if field == "file" => "The --file option is not set. Please specify a CSV file to process. Type --help for more details.".to_string(),
            UploadError::MissingConfigError { field } => {
                format!("The {} option is not set. Type --help for more details.", field)
            }
            UploadError::DatabaseError(e) => format!("Connection failed: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command-line flags and the [database] section of the config file"
            }
            ErrorCategory::Input => "Pass a readable comma-separated text file ending in .csv",
            ErrorCategory::Database => {
                "Verify the database host, credentials and that the server is reachable"
            }
            ErrorCategory::Data => "Fix the offending row in the input file and run again",
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
