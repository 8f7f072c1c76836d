//! Submission request handling

pub mod error;
pub mod fault;
pub mod handler;
pub mod model;
pub mod validation;

pub use error::SubmissionError;
pub use fault::{FaultInjection, DEFAULT_FAULT_SENTINEL};
pub use handler::{IncomingRequest, RequestBody, SubmissionHandler};
pub use model::{
    is_json_content_type, ResponseBody, Submission, SubmissionRequest, SubmissionResponse,
    SUCCESS_MESSAGE,
};
