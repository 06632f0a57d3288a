use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Result type for tailing and server operations
pub type WebTailResult<T> = Result<T, WebTailError>;

/// Errors raised while tailing a file or serving a poll
#[derive(thiserror::Error, Debug)]
pub enum WebTailError {
    /// The file is missing, unreadable, or not a regular file
    #[error("File not found or not readable: {path}")]
    NotFound { path: String },
    /// A read failed after the file was opened
    #[error("I/O error while reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Request validation failed: {message}")]
    ValidationError {
        message: String,
        data: serde_json::Value,
    },
    /// Logging initialization failed
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
    #[error("Configuration validation failed: {message}")]
    InvalidConfiguration { message: String },
}

impl WebTailError {
    /// Stable tag used as the `error_type` log field
    pub fn error_type(&self) -> &'static str {
        match self {
            WebTailError::NotFound { .. } => "not_found",
            WebTailError::Io { .. } => "io_error",
            WebTailError::ValidationError { .. } => "validation_error",
            WebTailError::LoggingInitialization(_) => "logging_initialization",
            WebTailError::InvalidConfiguration { .. } => "invalid_configuration",
        }
    }

    /// Structured context attached to a validation failure
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            WebTailError::ValidationError { data, .. } => Some(data),
            _ => None,
        }
    }

    /// HTTP status a poll failing with this error is answered with
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebTailError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebTailError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Details stay in the server log; the body only names the status.
        let body = match &self {
            WebTailError::ValidationError { message, .. } => message.clone(),
            _ => status
                .canonical_reason()
                .unwrap_or("Internal Server Error")
                .to_string(),
        };
        (status, body).into_response()
    }
}
