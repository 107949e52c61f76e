//! Middleware modules.

pub mod auth;
pub mod error;
pub mod validation;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;
