//! `POST /submit`

use crate::{
    submission::{IncomingRequest, RequestBody, SubmissionResponse},
    AppState,
};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, OriginalUri, State},
    http::{header, HeaderMap, Method, StatusCode},
};

/// The body is taken as a `Result` so a rejected body still reaches the
/// handler, which logs the request before answering.
pub async fn handle_submit(
    State(state): State<AppState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> SubmissionResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let body = match body {
        Ok(bytes) => RequestBody::Complete(bytes),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            RequestBody::TooLarge
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection, "failed to read request body");
            RequestBody::Unreadable
        }
    };

    state.submissions.handle(IncomingRequest {
        method,
        path: uri.path().to_string(),
        content_type,
        body,
    })
}
