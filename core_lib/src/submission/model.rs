//! Submission payloads and the JSON responses built from them

use super::error::SubmissionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

pub const SUCCESS_MESSAGE: &str = "Request processed successfully";

/// Fields as they arrived in the request body. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl SubmissionRequest {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Decodes a raw body the way a lenient JSON body parser would.
    ///
    /// Bodies that are not declared as JSON, are not valid JSON, or are not a
    /// JSON object decode to an empty request. Only string values count as
    /// present fields.
    pub fn from_json_body(content_type: Option<&str>, body: &[u8]) -> Self {
        if !content_type.is_some_and(is_json_content_type) {
            if !body.is_empty() {
                debug!(content_type = ?content_type, "ignoring body without a JSON content type");
            }
            return Self::default();
        }

        if body.is_empty() {
            return Self::default();
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Self {
                name: string_field(&fields, "name"),
                email: string_field(&fields, "email"),
            },
            Ok(other) => {
                debug!(body = %other, "request body is not a JSON object");
                Self::default()
            }
            Err(err) => {
                debug!(error = %err, "request body is not valid JSON");
                Self::default()
            }
        }
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Accepts `application/json` and any `application/*+json` media type,
/// ignoring parameters such as `charset`.
pub fn is_json_content_type(value: &str) -> bool {
    let essence = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// A submission whose required fields are both present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    name: String,
    email: String,
}

impl Submission {
    pub(crate) fn new(name: String, email: String) -> Self {
        Self { name, email }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Failure {
        error: &'static str,
    },
    Success {
        message: &'static str,
        data: Submission,
    },
}

/// Status and body returned for one submission.
///
/// Only [`SubmissionResponse::success`] and the conversion from
/// [`SubmissionError`] build one, so a 2xx status always carries
/// `message` + `data` and an error status always carries `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResponse {
    status: StatusCode,
    body: ResponseBody,
}

impl SubmissionResponse {
    pub fn success(data: Submission) -> Self {
        Self {
            status: StatusCode::OK,
            body: ResponseBody::Success {
                message: SUCCESS_MESSAGE,
                data,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }
}

impl From<SubmissionError> for SubmissionResponse {
    fn from(err: SubmissionError) -> Self {
        Self {
            status: err.status_code(),
            body: ResponseBody::Failure {
                error: err.message(),
            },
        }
    }
}

impl IntoResponse for SubmissionResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
