//! Core module containing fundamental traits and types

pub mod auth;
pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod processing;
pub mod query;
pub mod service;
pub mod validation;

pub use auth::{AuthPolicy, AuthProvider, Role, Session, SignUp};
pub use entity::{FieldKey, Record};
pub use error::{
    BackendError, ConfigError, ConsoleError, EntityError, ExportError, FieldError,
    ProcessingError, ValidationError,
};
pub use events::{Notice, NoticeBus, NoticeLevel};
pub use field::{FieldFormat, FieldValue, ToFieldValue};
pub use processing::{ProcessOutcome, ProcessRequest, ProcessingGateway};
pub use query::{Page, PaginationMeta, SortDirection, SortDirective, ViewQuery};
pub use service::{DataService, DocumentKind, DocumentRef, DocumentStore};
