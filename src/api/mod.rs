//! HTTP API handlers and boundary error translation

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::Error;

pub mod analyze;
pub mod auth;
pub mod health;
pub mod records;

pub use analyze::analyze_image;
pub use auth::AdminAuth;
pub use health::{health_db, read_root};
pub use records::{delete_analysis, get_analysis, get_history};

/// Translate the error taxonomy into HTTP statuses
///
/// This is the only place status codes are assigned; everything below the
/// handlers propagates typed errors. Messages are surfaced verbatim.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::ExternalService(_) => StatusCode::BAD_GATEWAY,
            Error::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Auth => StatusCode::UNAUTHORIZED,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        if matches!(self, Error::Auth) {
            (status, [(header::WWW_AUTHENTICATE, "Basic")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
