//! Deadline-bounding LLM wrapper.
//!
//! Wraps any [`LlmPort`] implementation with a hard wall-clock deadline so a
//! stalled generator surfaces as an error instead of hanging the pipeline.
//! Retries, if any, are the wrapped client's own concern; this layer never
//! re-issues a request.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

/// Default pipeline-visible deadline for a generation, in seconds.
pub const DEFAULT_DEADLINE_SECS: u64 = 12;

/// Wrapper that bounds every generation with a deadline.
pub struct TimeboxedLlm {
    inner: Arc<dyn LlmPort>,
    deadline: Duration,
}

impl TimeboxedLlm {
    pub fn new(inner: Arc<dyn LlmPort>, deadline_secs: u64) -> Self {
        Self {
            inner,
            deadline: Duration::from_secs(deadline_secs),
        }
    }

    /// Deadline from `LLM_TIMEOUT_SECS`, falling back to the default.
    pub fn from_env(inner: Arc<dyn LlmPort>) -> Self {
        let secs = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DEADLINE_SECS);
        Self::new(inner, secs)
    }
}

#[async_trait]
impl LlmPort for TimeboxedLlm {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let secs = self.deadline.as_secs();
        match tokio::time::timeout(self.deadline, self.inner.generate(request)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(deadline_secs = secs, "LLM generation exceeded deadline");
                Err(LlmError::Timeout(secs))
            }
        }
    }
}
