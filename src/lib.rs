//! # AutoFloat Admin
//!
//! Typed tabular data engine and admin console state for the AutoFloat
//! back-office.
//!
//! ## Features
//!
//! - **Typed Records**: every entity declares its own field enum through
//!   [`impl_record!`], so column names are checked at compile time
//! - **Table Engine**: search, status and date range filters, stable
//!   type-aware sorting, pagination, selection and CSV export
//! - **Per-Tab State**: [`engine::TableView`] memoizes the filtered ordering
//!   and keeps page and selection consistent after every change
//! - **Admin Console**: concurrent loading, confirmed deletes, validated
//!   writes and external processing against pluggable backend traits
//! - **Configuration-Based**: page size and per-tab search fields from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use autofloat::prelude::*;
//!
//! let backend = InMemoryBackend::new();
//! let auth = InMemoryAuthProvider::signed_in_admin("ops@autofloat.io");
//! let mut console =
//!     AdminConsole::open(&auth, backend.backend(), &ConsoleConfig::default_config()).await?;
//!
//! console.load_all().await;
//!
//! let bills = console.bills.view_mut();
//! bills.set_status_filter("pending");
//! bills.toggle_sort(BillField::Amount);
//! let first_page = bills.page();
//! ```

pub mod config;
pub mod console;
pub mod core;
pub mod engine;
pub mod entities;
pub mod storage;

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`)
///
/// Calling it again once a subscriber is installed is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthPolicy, AuthProvider, Role, Session, SignUp},
        entity::{FieldKey, Record},
        error::{
            BackendError, ConfigError, ConsoleError, EntityError, ExportError, FieldError,
            ProcessingError, ValidationError,
        },
        events::{Notice, NoticeBus, NoticeLevel},
        field::{FieldFormat, FieldValue, ToFieldValue},
        processing::{ProcessOutcome, ProcessRequest, ProcessingGateway},
        query::{Page, PaginationMeta, STATUS_ALL, SortDirection, SortDirective, ViewQuery},
        service::{DataService, DocumentKind, DocumentRef, DocumentStore},
        validation::{EntityValidationConfig, Validate},
    };

    // === Macros ===
    pub use crate::{impl_record, status_enum};

    // === Engine ===
    pub use crate::engine::{CsvExport, Selection, SortState, TableView};

    // === Entities ===
    pub use crate::entities::{
        BankAccount, BankAccountField, Bill, BillField, BillStatus, PaymentPlan, PaymentPlanField,
        PaymentPlanStatus, Referral, ReferralField, ReferralStatus, Subscription,
        SubscriptionField, SubscriptionStatus, Tier, UserProfile, UserProfileField, Vehicle,
        VehicleField,
    };

    // === Console ===
    pub use crate::console::{
        AdminConsole, Backend, ConfirmDialog, Confirmed, EntityTab, LoadReport, TabKind,
    };

    // === Storage ===
    pub use crate::storage::{
        InMemoryAuthProvider, InMemoryBackend, InMemoryDataService, InMemoryDocumentStore,
        InMemoryProcessingGateway,
    };

    // === Config ===
    pub use crate::config::{ConsoleConfig, TabConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
