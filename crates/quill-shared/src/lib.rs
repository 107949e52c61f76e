//! # Quill Shared
//!
//! Wire types shared between the API server and its clients: request and response
//! DTOs, the response envelope, and the validation rule sets both sides enforce.

pub mod dto;
pub mod response;
pub mod validation;

pub use response::{ApiResponse, Empty};
pub use validation::{FieldError, check};
