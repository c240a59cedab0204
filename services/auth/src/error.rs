use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Auth service error variants.
///
/// Every variant except `TransientStore` is a terminal outcome for the attempt;
/// only store faults are worth retrying.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("invalid otp format")]
    InvalidFormat,
    #[error("invalid or expired code")]
    InvalidOrExpiredCode,
    #[error("user profile not found")]
    ProfileNotFound,
    #[error("unauthorized user type")]
    UnauthorizedRole,
    #[error("invalid email")]
    InvalidEmail,
    #[error("store unavailable")]
    TransientStore(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InvalidOrExpiredCode => "INVALID_OR_EXPIRED_CODE",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::UnauthorizedRole => "UNAUTHORIZED_ROLE",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::TransientStore(_) => "TRANSIENT_STORE_ERROR",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::TransientStore(_))
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidFormat | Self::InvalidEmail => StatusCode::BAD_REQUEST,
            Self::InvalidOrExpiredCode => StatusCode::UNAUTHORIZED,
            Self::UnauthorizedRole => StatusCode::FORBIDDEN,
            Self::ProfileNotFound => StatusCode::NOT_FOUND,
            Self::TransientStore(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        // 4xx are expected client outcomes and TraceLayer already records them.
        // Store faults need the anyhow chain logged so the root cause is traceable.
        if let Self::TransientStore(ref e) = self {
            tracing::error!(error = ?e, kind = self.kind(), "store error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
