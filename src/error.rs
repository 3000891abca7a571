//! Error handling and custom error types
//!
//! Provides unified error handling across the service using thiserror. Every
//! variant maps onto an HTTP status so handlers can return `Result` directly.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("AI service error: {status}")]
    Upstream { status: u16, body: String },

    #[error("Failed to parse AI response: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Message placed in the `error` field of the JSON response body.
    pub fn client_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::Upstream { .. } => self.to_string(),
            other => format!("Classification failed: {}", other),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.client_message() }))
    }
}
