use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },
    #[error("list not found: {name}")]
    ListNotFound { name: String },
    #[error("not initialized: {message}")]
    NotInitialized { message: String },
    #[error("already initialized: {message}")]
    AlreadyInitialized { message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn list_not_found(name: impl Into<String>) -> Self {
        Self::ListNotFound { name: name.into() }
    }

    pub fn not_initialized(message: impl Into<String>) -> Self {
        Self::NotInitialized {
            message: message.into(),
        }
    }

    pub fn already_initialized(message: impl Into<String>) -> Self {
        Self::AlreadyInitialized {
            message: message.into(),
        }
    }
}
