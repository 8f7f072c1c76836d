//! HTTP tracing layer for every routed request

use http::{Request, Response};
use std::time::Duration;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultOnRequest, MakeSpan, OnResponse, TraceLayer},
};
use tracing::{info_span, Span};

pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    HttpRequestSpan,
    DefaultOnRequest,
    StatusClassOnResponse,
>;

pub fn logging_layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(HttpRequestSpan)
        .on_response(StatusClassOnResponse)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpRequestSpan;

impl<B> MakeSpan<B> for HttpRequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
            version = ?request.version(),
        )
    }
}

/// Picks the event level from the status class: 2xx/3xx `info`, 4xx `warn`,
/// 5xx `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassOnResponse;

impl<B> OnResponse<B> for StatusClassOnResponse {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let latency_ms = latency.as_millis();

        if response.status().is_server_error() {
            tracing::error!(status, latency_ms, "server error response");
        } else if response.status().is_client_error() {
            tracing::warn!(status, latency_ms, "client error response");
        } else {
            tracing::info!(status, latency_ms, "request completed");
        }
    }
}
