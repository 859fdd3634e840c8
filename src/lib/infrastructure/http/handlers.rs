//! API handler modules

use std::any::Any;

use axum::{body::Body, http::Response, response::IntoResponse};

use super::errors::server_error;

pub mod health;
pub mod submit;

/// Catch panics and return a 500 error
pub fn panic_handler(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };

    server_error(&details).into_response()
}
