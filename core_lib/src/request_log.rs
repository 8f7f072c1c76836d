//! Request log collaborator injected into the submission handler

use axum::http::Method;
use parking_lot::Mutex;
use std::sync::Arc;

pub const REQUEST_LOG_TARGET: &str = "submission::request";

/// Receives one line per handled request.
pub trait RequestLog: Send + Sync {
    fn log(&self, line: &str);
}

/// `Incoming Request: <METHOD> <PATH>`
pub fn incoming_request_line(method: &Method, path: &str) -> String {
    format!("Incoming Request: {} {}", method, path)
}

/// Writes lines as `info` events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRequestLog;

impl RequestLog for TracingRequestLog {
    fn log(&self, line: &str) {
        tracing::info!(target: REQUEST_LOG_TARGET, "{}", line);
    }
}

/// Keeps every line in memory. Clones share the same buffer, so a clone can
/// be handed to the handler while the original is inspected.
#[derive(Debug, Clone, Default)]
pub struct MemoryRequestLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryRequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl RequestLog for MemoryRequestLog {
    fn log(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incoming_request_line_format() {
        assert_eq!(
            incoming_request_line(&Method::POST, "/submit"),
            "Incoming Request: POST /submit"
        );
        assert_eq!(
            incoming_request_line(&Method::GET, "/health"),
            "Incoming Request: GET /health"
        );
    }

    #[test]
    fn test_memory_log_clones_share_lines() {
        let log = MemoryRequestLog::new();
        let shared: Arc<dyn RequestLog> = Arc::new(log.clone());

        assert!(log.is_empty());
        shared.log("first");
        shared.log("second");

        assert_eq!(log.len(), 2);
        assert_eq!(log.lines(), vec!["first".to_string(), "second".to_string()]);
    }
}
