//! Typed error handling for the admin console
//!
//! Backend collaborators return `anyhow::Result`; the console converts those
//! failures into the typed errors below so callers can match on them.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a referenced record does not exist
//! - [`ConfigError`]: configuration loading and resolution
//! - [`ValidationError`]: client-side form validation
//! - [`BackendError`]: a call to the managed backend failed
//! - [`ExportError`]: CSV export could not produce a file
//! - [`ProcessingError`]: an external verification or payment was refused
//!
//! # Example
//!
//! ```rust,ignore
//! match console.delete(kind, dialog.confirm()).await {
//!     Ok(deleted) => println!("deleted {deleted} bills"),
//!     Err(ConsoleError::Backend(e)) => eprintln!("backend refused: {e}"),
//!     Err(e) => eprintln!("other error: {e}"),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// The main error type for console operations
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    /// The console requires a signed-in administrator
    #[error("An administrator session is required")]
    Unauthorized,

    /// A delete confirmation was run against a different tab
    #[error("Confirmation for {actual} cannot delete {expected}")]
    ConfirmationMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

impl ConsoleError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::Entity(e) => e.error_code(),
            ConsoleError::Config(_) => "CONFIG_ERROR",
            ConsoleError::Validation(_) => "VALIDATION_ERROR",
            ConsoleError::Backend(_) => "BACKEND_ERROR",
            ConsoleError::Export(_) => "EXPORT_ERROR",
            ConsoleError::Processing(e) => e.error_code(),
            ConsoleError::Unauthorized => "UNAUTHORIZED",
            ConsoleError::ConfirmationMismatch { .. } => "CONFIRMATION_MISMATCH",
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to individual records
#[derive(Debug, Error)]
pub enum EntityError {
    /// Record was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// Record id already taken
    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: String, id: String },
}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    /// YAML could not be parsed
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A tab configuration names a field the record type does not have
    #[error("Unknown field '{field}' for {resource}")]
    UnknownField { resource: String, field: String },

    /// A default sort expression does not parse for the record type
    #[error("Invalid default sort '{expr}' for {resource}")]
    InvalidSort { resource: String, expr: String },

    /// Page size must be at least 1
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by client-side validation before any backend call
#[derive(Debug, Error)]
pub enum ValidationError {
    /// One or more fields failed validation
    #[error("Validation failed: {}", format_field_errors(.0))]
    FieldErrors(Vec<FieldError>),

    /// The record could not be converted for validation
    #[error("Failed to prepare record for validation: {0}")]
    Serialization(String),
}

impl ValidationError {
    /// Field errors, empty for non-field failures
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ValidationError::FieldErrors(errors) => errors,
            ValidationError::Serialization(_) => &[],
        }
    }

    /// Whether the given field has an error
    pub fn has_field(&self, field: &str) -> bool {
        self.field_errors().iter().any(|e| e.field == field)
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

// =============================================================================
// Backend Errors
// =============================================================================

/// A call to the managed backend failed
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Failed to {operation} {entity_type}: {message}")]
    OperationFailed {
        entity_type: String,
        operation: String,
        message: String,
    },
}

impl BackendError {
    pub fn operation_failed(
        entity_type: impl Into<String>,
        operation: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        BackendError::OperationFailed {
            entity_type: entity_type.into(),
            operation: operation.into(),
            message: error.to_string(),
        }
    }
}

// =============================================================================
// Export Errors
// =============================================================================

/// CSV export failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    /// Nothing to export
    #[error("No {entity_type} to export")]
    Empty { entity_type: String },
}

// =============================================================================
// Processing Errors
// =============================================================================

/// External verification or payment processing failures
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// The processor answered and refused the request
    #[error("Request declined: {reason}")]
    Declined { reason: String },

    /// The processor could not be reached or failed
    #[error("Processing failed: {message}")]
    Failed { message: String },
}

impl ProcessingError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ProcessingError::Declined { .. } => "PROCESSING_DECLINED",
            ProcessingError::Failed { .. } => "PROCESSING_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_error_display() {
        let err = EntityError::NotFound {
            entity_type: "bill".to_string(),
            id: "42".to_string(),
        };
        assert_eq!(err.to_string(), "bill with id '42' not found");
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");
    }

    #[test]
    fn test_console_error_codes() {
        let err: ConsoleError = ExportError::Empty {
            entity_type: "bills".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "EXPORT_ERROR");
        assert_eq!(err.to_string(), "No bills to export");

        assert_eq!(ConsoleError::Unauthorized.error_code(), "UNAUTHORIZED");

        let err = ConsoleError::ConfirmationMismatch {
            expected: "profiles",
            actual: "bills",
        };
        assert_eq!(err.error_code(), "CONFIRMATION_MISMATCH");
        assert_eq!(err.to_string(), "Confirmation for bills cannot delete profiles");
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldError::new("amount", "must be greater than 0"),
            FieldError::new("name", "is required"),
        ]);

        assert!(err.has_field("amount"));
        assert!(!err.has_field("email"));
        assert_eq!(
            err.to_string(),
            "Validation failed: amount: must be greater than 0; name: is required"
        );
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::operation_failed("vehicles", "delete", "connection reset");
        assert_eq!(
            err.to_string(),
            "Failed to delete vehicles: connection reset"
        );
    }
}
