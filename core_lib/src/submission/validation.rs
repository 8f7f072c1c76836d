//! Required-field validation

use super::{
    error::SubmissionError,
    model::{Submission, SubmissionRequest},
};

impl SubmissionRequest {
    /// Both `name` and `email` must be present and non-empty. Values are kept
    /// exactly as sent; whitespace is not trimmed.
    pub fn validate(self) -> Result<Submission, SubmissionError> {
        match (non_empty(self.name), non_empty(self.email)) {
            (Some(name), Some(email)) => Ok(Submission::new(name, email)),
            _ => Err(SubmissionError::MissingFields),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
