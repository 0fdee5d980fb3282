use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::RecommendError;

#[derive(Debug)]
pub struct ApiError {
    err: anyhow::Error,
    status_code: StatusCode,
}

impl ApiError {
    /// 500 Internal Server Error.
    pub fn new<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn with_status<E: Into<anyhow::Error>>(status: StatusCode, err: E) -> Self {
        Self {
            err: err.into(),
            status_code: status,
        }
    }

    pub fn bad_request(msg: impl Display) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, anyhow::anyhow!("{msg}"))
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.status_code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            tracing::error!(
                status = %self.status_code,
                err = %format!("{:#}", self.err),
                "request failed"
            );
        }
        (self.status_code, format!("{:#}\n", self.err)).into_response()
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {:#}", self.status_code, self.err)
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::TitleNotFound(_) => Self::with_status(StatusCode::NOT_FOUND, err),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::new(err)
    }
}
