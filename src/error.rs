use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{context}: {} {reason}", .status.as_u16())]
    Status {
        context: String,
        status: StatusCode,
        reason: String,
    },

    #[error("Request error: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Invalid access token: {0}")]
    InvalidToken(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub fn status(context: impl Into<String>, status: StatusCode) -> Self {
        Self::Status {
            context: context.into(),
            status,
            reason: status.canonical_reason().unwrap_or("").to_string(),
        }
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_carries_code_and_reason() {
        let err = ApiError::status("Failed to retrieve current user profile", StatusCode::UNAUTHORIZED);
        assert_eq!(err.status_code(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(
            err.to_string(),
            "Failed to retrieve current user profile: 401 Unauthorized"
        );
    }
}
