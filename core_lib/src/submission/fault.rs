//! Simulated downstream failure triggered by a sentinel name

use super::{error::SubmissionError, model::Submission};
use crate::config::SubmissionConfig;

pub const DEFAULT_FAULT_SENTINEL: &str = "error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultInjection {
    sentinel: Option<String>,
}

impl Default for FaultInjection {
    fn default() -> Self {
        Self::enabled(DEFAULT_FAULT_SENTINEL)
    }
}

impl FaultInjection {
    pub fn enabled(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: Some(sentinel.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { sentinel: None }
    }

    pub fn from_config(config: &SubmissionConfig) -> Self {
        if config.fault_injection {
            Self::enabled(config.fault_sentinel.clone())
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sentinel.is_some()
    }

    /// Fails with [`SubmissionError::SimulatedFault`] when the name is an exact,
    /// case-sensitive match for the sentinel.
    pub fn check(&self, submission: &Submission) -> Result<(), SubmissionError> {
        match &self.sentinel {
            Some(sentinel) if submission.name() == sentinel.as_str() => {
                Err(SubmissionError::SimulatedFault)
            }
            _ => Ok(()),
        }
    }
}
