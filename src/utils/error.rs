use thiserror::Error;

#[derive(Error, Debug)]
pub enum BizMapError {
    #[error("Directory request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Business directory unavailable ({source_desc}): {message}")]
    DirectoryUnavailable {
        source_desc: String,
        message: String,
    },

    #[error("Unreadable directory data in {source_desc}: {message}")]
    DirectoryFormatError {
        source_desc: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    System,
    Dependency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// 部署時顯示給管理者的通知
pub const DIRECTORY_REQUIRED_NOTICE: &str =
    "Business Maps requires a business directory source to be available.";

impl BizMapError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BizMapError::HttpError(_) => ErrorCategory::Network,
            BizMapError::CsvError(_)
            | BizMapError::SerializationError(_)
            | BizMapError::DirectoryFormatError { .. } => ErrorCategory::Data,
            BizMapError::IoError(_) => ErrorCategory::System,
            BizMapError::ConfigValidationError { .. }
            | BizMapError::InvalidConfigValueError { .. }
            | BizMapError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BizMapError::DirectoryUnavailable { .. } => ErrorCategory::Dependency,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System | ErrorCategory::Dependency => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            BizMapError::HttpError(_) => {
                "Check that the directory endpoint is reachable and retry".to_string()
            }
            BizMapError::CsvError(_) => {
                "Check the CSV header: id,title,latitude,longitude,address,permalink,maps_uri,thumbnail,categories".to_string()
            }
            BizMapError::SerializationError(_) => {
                "Check that the directory returns a JSON array of business records".to_string()
            }
            BizMapError::IoError(_) => {
                "Check file paths and permissions".to_string()
            }
            BizMapError::ConfigValidationError { field, .. }
            | BizMapError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in the config file or CLI flags", field)
            }
            BizMapError::MissingConfigError { field } => {
                format!("Provide '{}' in the config file or on the command line", field)
            }
            BizMapError::DirectoryUnavailable { .. } => {
                "Install or start the business directory, then run again".to_string()
            }
            BizMapError::DirectoryFormatError { .. } => {
                "Re-export the directory data; supported formats are .csv and .json".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BizMapError::DirectoryUnavailable { .. } => DIRECTORY_REQUIRED_NOTICE.to_string(),
            BizMapError::MissingConfigError { field } => {
                format!("Missing setting: {}", field)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BizMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_errors_are_critical() {
        let err = BizMapError::DirectoryUnavailable {
            source_desc: "csv:missing.csv".to_string(),
            message: "not found".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Dependency);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.user_friendly_message(), DIRECTORY_REQUIRED_NOTICE);
    }

    #[test]
    fn test_config_errors_name_the_field() {
        let err = BizMapError::InvalidConfigValueError {
            field: "map.zoom".to_string(),
            value: "42".to_string(),
            reason: "Value must be between 1 and 20".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("map.zoom"));
        assert!(err.to_string().contains("42"));
    }
}
