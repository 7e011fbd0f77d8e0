//! Validation and filtering system
//!
//! Client-side checks run before any insert or update reaches the backend.
//! Failures block the submission and are returned as field errors; nothing
//! is retried.

pub mod config;
pub mod filters;
pub mod validators;

pub use config::{EntityValidationConfig, Validate};
