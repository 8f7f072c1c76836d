//! The submission pipeline: log, validate, fault check, echo

use super::{
    error::SubmissionError,
    fault::FaultInjection,
    model::{Submission, SubmissionRequest, SubmissionResponse},
};
use crate::{
    config::SubmissionConfig,
    request_log::{incoming_request_line, RequestLog, TracingRequestLog},
};
use axum::{body::Bytes, http::Method};
use std::{fmt, sync::Arc};
use tracing::{debug, error, info, warn};

/// What the transport managed to read of the request body.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Complete(Bytes),
    /// Rejected at the size limit before it was buffered.
    TooLarge,
    /// The stream failed for any other reason; decoded as an empty body.
    Unreadable,
}

impl Default for RequestBody {
    fn default() -> Self {
        RequestBody::Complete(Bytes::new())
    }
}

/// A request as seen by the handler, before the body is decoded.
#[derive(Debug, Clone)]
pub struct IncomingRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: RequestBody,
}

impl IncomingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            content_type: None,
            body: RequestBody::default(),
        }
    }

    pub fn with_json(mut self, body: &serde_json::Value) -> Self {
        self.content_type = Some("application/json".to_string());
        self.body = RequestBody::Complete(Bytes::from(body.to_string()));
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }
}

#[derive(Clone)]
pub struct SubmissionHandler {
    log: Arc<dyn RequestLog>,
    fault_injection: FaultInjection,
}

impl fmt::Debug for SubmissionHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionHandler")
            .field("fault_injection", &self.fault_injection)
            .finish_non_exhaustive()
    }
}

impl Default for SubmissionHandler {
    fn default() -> Self {
        Self::new(Arc::new(TracingRequestLog), FaultInjection::default())
    }
}

impl SubmissionHandler {
    pub fn new(log: Arc<dyn RequestLog>, fault_injection: FaultInjection) -> Self {
        Self {
            log,
            fault_injection,
        }
    }

    pub fn from_config(config: &SubmissionConfig) -> Self {
        Self::new(
            Arc::new(TracingRequestLog),
            FaultInjection::from_config(config),
        )
    }

    pub fn fault_injection(&self) -> &FaultInjection {
        &self.fault_injection
    }

    /// Never fails: every outcome is a status and body pair.
    pub fn handle(&self, request: IncomingRequest) -> SubmissionResponse {
        let line = incoming_request_line(&request.method, &request.path);
        self.log.log(&line);

        let body = match request.body {
            RequestBody::Complete(body) => body,
            RequestBody::TooLarge => {
                warn!("submission rejected: {}", SubmissionError::PayloadTooLarge);
                return SubmissionError::PayloadTooLarge.into();
            }
            RequestBody::Unreadable => {
                debug!("request body could not be read, treating it as empty");
                Bytes::new()
            }
        };

        let payload = SubmissionRequest::from_json_body(request.content_type.as_deref(), &body);

        match self.process(payload) {
            Ok(submission) => {
                info!(name = %submission.name(), "submission accepted");
                SubmissionResponse::success(submission)
            }
            Err(err) => {
                match err {
                    SubmissionError::SimulatedFault => error!("simulated processing fault"),
                    _ => warn!("submission rejected: {}", err),
                }
                err.into()
            }
        }
    }

    fn process(&self, payload: SubmissionRequest) -> Result<Submission, SubmissionError> {
        let submission = payload.validate()?;
        self.fault_injection.check(&submission)?;
        Ok(submission)
    }
}
