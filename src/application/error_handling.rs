// src/application/error_handling.rs
//
// Error Handling for Commands
//
// - Maps internal errors → user-friendly responses
// - Consistent error format for UI consumers
// - Internal details go to the log, not the response

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input (400)
    Validation,

    /// Domain invariant violation (422)
    DomainError,

    /// Local database error (500)
    Database,

    /// Catalog or document store unreachable or failing (502)
    ExternalService,

    /// Missing or invalid settings (500)
    Configuration,

    /// App is in maintenance mode (503)
    Maintenance,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound => Self {
                success: false,
                error_type: ErrorType::NotFound,
                message: "Resource not found".to_string(),
                details: None,
            },

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::DomainError,
                message: "Domain validation failed".to_string(),
                details: Some(domain_error.to_string()),
            },

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Database operation failed".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Database connection failed".to_string(),
                    details: None,
                }
            }

            AppError::Serialization(serde_error) => {
                log::error!("Serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Data serialization failed".to_string(),
                    details: None,
                }
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Http(http_error) => {
                log::warn!("HTTP error: {}", http_error);

                Self {
                    success: false,
                    error_type: ErrorType::ExternalService,
                    message: "External service error".to_string(),
                    details: Some(http_error.to_string()),
                }
            }

            AppError::Config(message) => Self {
                success: false,
                error_type: ErrorType::Configuration,
                message: "Invalid configuration".to_string(),
                details: Some(message),
            },

            AppError::Other(message) => {
                if message.contains("TMDB") || message.contains("Appwrite") {
                    Self {
                        success: false,
                        error_type: ErrorType::ExternalService,
                        message: "External service error".to_string(),
                        details: Some(message),
                    }
                } else {
                    log::error!("Other error: {}", message);

                    Self {
                        success: false,
                        error_type: ErrorType::Internal,
                        message,
                        details: None,
                    }
                }
            }
        }
    }

    /// Create validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message: message.into(),
            details: None,
        }
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }

    pub fn maintenance() -> Self {
        Self {
            success: false,
            error_type: ErrorType::Maintenance,
            message: "MovieHub is under maintenance".to_string(),
            details: None,
        }
    }

    /// JSON form handed back to command callers
    pub fn into_json(self) -> String {
        serde_json::to_string(&self).unwrap_or_else(|_| "Internal error".to_string())
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| ErrorResponse::from_app_error(e).into_json())
    }
}
