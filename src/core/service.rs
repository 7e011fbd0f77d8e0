//! Service traits for the managed backend
//!
//! The backend (hosted Postgres with generated REST access, auth and file
//! storage) is an external collaborator. These traits are the only surface
//! the console talks to; `storage::in_memory` provides implementations for
//! tests and local development.

use crate::core::entity::Record;
use crate::core::field::FieldValue;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Service trait for one backend table
///
/// Updates are identifier-scoped full writes: two concurrent editors
/// overwrite each other (last write wins).
#[async_trait]
pub trait DataService<T: Record>: Send + Sync {
    /// Select every row of the table
    async fn list(&self) -> Result<Vec<T>>;

    /// Select one row by identifier
    async fn get(&self, id: &T::Id) -> Result<Option<T>>;

    /// Select rows whose field equals the given value
    async fn search(&self, field: T::Field, value: &FieldValue) -> Result<Vec<T>>;

    /// Insert a row
    async fn create(&self, record: T) -> Result<T>;

    /// Replace the row matching `id`
    async fn update(&self, id: &T::Id, record: T) -> Result<T>;

    /// Delete the row matching `id`
    async fn delete(&self, id: &T::Id) -> Result<()>;

    /// Delete every row whose identifier is in `ids`, as one request
    ///
    /// Either the whole batch is applied or the call fails; callers must
    /// refetch to learn the actual state after an error.
    async fn delete_many(&self, ids: &[T::Id]) -> Result<()>;
}

/// Kind of document a user uploads during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    DriversLicense,
    Paystub,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::DriversLicense => "drivers_license",
            DocumentKind::Paystub => "paystub",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub user_id: Uuid,
    pub kind: DocumentKind,
    /// Storage path, `<user_id>/<kind>/<file_name>`
    pub path: String,
    pub size: usize,
}

impl DocumentRef {
    pub fn new(user_id: Uuid, kind: DocumentKind, file_name: &str, size: usize) -> Self {
        Self {
            user_id,
            kind,
            path: format!("{}/{}/{}", user_id, kind, file_name),
            size,
        }
    }
}

/// File storage keyed by user and document kind
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Upload a document, replacing any previous one at the same path
    async fn upload(
        &self,
        user_id: Uuid,
        kind: DocumentKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<DocumentRef>;

    /// List the documents uploaded by a user
    async fn list(&self, user_id: Uuid) -> Result<Vec<DocumentRef>>;
}
