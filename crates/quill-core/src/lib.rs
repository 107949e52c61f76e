//! # Quill Core
//!
//! The domain layer of the Quill blog platform.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, derivation rules, ports, and the services that orchestrate them.

pub mod domain;
pub mod error;
pub mod ports;
pub mod rules;
pub mod services;

pub use error::DomainError;
