pub mod appointments;

use apptbook_core::ApptBookError;
use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().merge(appointments::router())
}

/// A required request parameter was absent or empty.
#[derive(Debug, Error)]
#[error("The required parameter \"{0}\" is missing")]
pub struct MissingParameter(pub &'static str);

/// Convert anyhow errors to plain-text HTTP responses
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<ApptBookError>() {
            Some(ApptBookError::Format { .. }) => StatusCode::BAD_REQUEST,
            Some(ApptBookError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
            None if self.0.is::<MissingParameter>() => StatusCode::PRECONDITION_FAILED,
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        } else {
            warn!(%status, error = %self.0, "request rejected");
        }

        (status, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
