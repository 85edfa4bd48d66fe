use axum::http::StatusCode;

/// Domain failure taxonomy. Everything a progression operation can refuse or
/// lose is one of these; handlers map them onto HTTP statuses via `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("user {0:?} not found")]
    UserNotFound(String),

    #[error("user {0:?} already exists")]
    UserExists(String),

    #[error("write conflict on {0:?} after retry")]
    WriteConflict(String),

    #[error("challenge pool is empty")]
    EmptyPool,

    #[error("challenge {0:?} is not in today's set")]
    UnknownChallenge(String),

    #[error("challenge {0:?} is already completed")]
    AlreadyCompleted(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        let status = match err {
            ProgressError::UserNotFound(_) => StatusCode::NOT_FOUND,
            ProgressError::UserExists(_)
            | ProgressError::WriteConflict(_)
            | ProgressError::AlreadyCompleted(_) => StatusCode::CONFLICT,
            ProgressError::UnknownChallenge(_) => StatusCode::BAD_REQUEST,
            ProgressError::EmptyPool | ProgressError::Unavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
