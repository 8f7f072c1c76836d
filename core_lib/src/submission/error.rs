//! Failure kinds a submission can end in

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Name and email are required")]
    MissingFields,

    #[error("Internal server error")]
    SimulatedFault,

    /// The body ran past the configured size limit and was never read.
    #[error("Request body too large")]
    PayloadTooLarge,
}

impl SubmissionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::MissingFields => StatusCode::BAD_REQUEST,
            SubmissionError::SimulatedFault => StatusCode::INTERNAL_SERVER_ERROR,
            SubmissionError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Text placed in the `error` field of the response body.
    pub fn message(&self) -> &'static str {
        match self {
            SubmissionError::MissingFields => "Name and email are required",
            SubmissionError::SimulatedFault => "Internal server error",
            SubmissionError::PayloadTooLarge => "Request body too large",
        }
    }
}
