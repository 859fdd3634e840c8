//! API error-handling module

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::domain::registration::RegistrationError;

use super::handlers::submit::SubmitResponse;

/// An error raised in the API
#[derive(Debug)]
pub struct ApiError {
    /// The status code
    pub status: StatusCode,

    /// The error message
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new bad request error
    pub fn new_400(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create new internal server error
    pub fn new_500(message: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The body sent to the client
    pub fn body(&self) -> SubmitResponse {
        SubmitResponse::failure(&self.message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::NoData => ApiError::new_400("No data received"),
            RegistrationError::MissingEmail => ApiError::new_400("Email is required"),
            RegistrationError::ConfirmationNotSent => {
                ApiError::new_500("Form received but failed to send confirmation email")
            }
            RegistrationError::Render(err) => server_error(&err),
        }
    }
}

/// Logs an unexpected fault and reports it to the client.
pub fn server_error(err: &dyn fmt::Display) -> ApiError {
    error!("Error processing form submission: {err}");

    ApiError::new_500(&format!("Server error: {err}"))
}
