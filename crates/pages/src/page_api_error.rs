//! Helper utilities for returning API errors to page clients.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Represents an error to send back to a page client. Build failures all
/// collapse into the platform's generic responses; the body never echoes
/// upstream detail.
#[derive(Debug, Serialize)]
pub struct PageApiError {
    pub status: u16,
    pub message: String,
}

impl ResponseError for PageApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status).unwrap()).json(self)
    }
}

impl PageApiError {
    /// Create a new instance of [PageApiError] with a given [StatusCode].
    /// Before creating a new [PageApiError], check for dedicated methods to
    /// return the appropriate status code.
    pub fn new(message: &str, status: StatusCode) -> Self {
        PageApiError {
            message: String::from(message),
            status: status.as_u16(),
        }
    }

    pub fn not_found() -> Self {
        Self::new("Not Found", StatusCode::NOT_FOUND)
    }

    pub fn internal_server_error() -> Self {
        Self::new("Internal Server Error", StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl Display for PageApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            serde_json::to_string(self)
                .unwrap_or_else(|_| String::from("{ message: \"Fatal Error\" }"))
        )
    }
}
