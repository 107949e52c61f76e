//! Admission control for inbound requests.

use std::time::Duration;

use async_trait::async_trait;

/// Per-client request budget.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Spend one request from `key`'s budget. `key` is the client IP at the HTTP edge.
    async fn check(&self, key: &str) -> Result<Admission, LimiterError>;
}

/// Outcome of spending one request.
#[derive(Debug, Clone)]
pub struct Admission {
    pub allowed: bool,
    /// Requests left before the client is turned away.
    pub remaining: u32,
    /// Time until another request would be admitted (for refused requests) or
    /// until the budget is full again.
    pub reset_after: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum LimiterError {
    #[error("Rate limiter unavailable: {0}")]
    Unavailable(String),
}
