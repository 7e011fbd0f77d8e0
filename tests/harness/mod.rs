//! Shared test harness for table and console testing
//!
//! Provides `TestRecord`, a macro-declared record with fields covering the
//! `FieldValue` variants the engine compares, `LineItem`, a hand-written
//! record whose identifier is not one of its fields, and helper functions
//! for creating test data.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod harness;
//! use harness::*;
//! ```

#![allow(dead_code, unused_macros)]

#[macro_use]
pub mod data_service_tests;

use autofloat::core::entity::{FieldKey, Record};
use autofloat::core::field::FieldValue;
use autofloat::prelude::*;
use chrono::TimeZone;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// TestRecord
// ---------------------------------------------------------------------------

status_enum!(
    /// Lifecycle of a test record
    TestStatus {
        Active => "active",
        Archived => "archived",
    }
);

impl_record!(
    /// A test record with one member per comparable value kind
    TestRecord, "test_records", "test record", TestRecordField,
    {
        id: Uuid => Id,
        name: String => Name,
        email: String => Email,
        age: i64 => Age,
        score: f64 => Score,
        active: bool => Active,
        status: TestStatus => Status,
        created_at: DateTime<Utc> => CreatedAt,
    },
    search: [Name, Email],
    date: CreatedAt,
    status: |record| record.status.as_str()
);

/// Create a test record with a fresh id
pub fn create_test_record(
    name: &str,
    email: &str,
    age: i64,
    score: f64,
    active: bool,
) -> TestRecord {
    create_test_record_with_id(Uuid::new_v4(), name, email, age, score, active)
}

/// Create a test record with a specific id
pub fn create_test_record_with_id(
    id: Uuid,
    name: &str,
    email: &str,
    age: i64,
    score: f64,
    active: bool,
) -> TestRecord {
    TestRecord {
        id,
        name: name.to_string(),
        email: email.to_string(),
        age,
        score,
        active,
        status: if active {
            TestStatus::Active
        } else {
            TestStatus::Archived
        },
        created_at: Utc::now(),
    }
}

/// Generate `n` records with deterministic, distinct values
pub fn sample_batch(n: usize) -> Vec<TestRecord> {
    (0..n)
        .map(|i| {
            create_test_record(
                &format!("Record_{}", i),
                &format!("record{}@test.com", i),
                20 + i as i64,
                i as f64 * 1.5,
                i % 2 == 0,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// LineItem
// ---------------------------------------------------------------------------

/// Exported columns of [`LineItem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineItemField {
    Name,
    Amount,
}

impl FieldKey for LineItemField {
    fn all() -> &'static [Self] {
        &[LineItemField::Name, LineItemField::Amount]
    }

    fn name(&self) -> &'static str {
        match self {
            LineItemField::Name => "name",
            LineItemField::Amount => "amount",
        }
    }
}

/// A record keyed by a number that is not exported as a column
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: u32,
    pub name: String,
    pub amount: i64,
}

impl Record for LineItem {
    type Id = u32;
    type Field = LineItemField;

    fn resource_name() -> &'static str {
        "line_items"
    }

    fn resource_name_singular() -> &'static str {
        "line item"
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn field_value(&self, field: LineItemField) -> FieldValue {
        match field {
            LineItemField::Name => FieldValue::String(self.name.clone()),
            LineItemField::Amount => FieldValue::Integer(self.amount),
        }
    }
}

pub fn line_item(id: u32, name: &str, amount: i64) -> LineItem {
    LineItem {
        id,
        name: name.to_string(),
        amount,
    }
}

// ---------------------------------------------------------------------------
// Domain fixtures
// ---------------------------------------------------------------------------

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn instant(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

/// A pending bill due 2024-07-01
pub fn bill(name: &str, category: &str, amount: f64) -> Bill {
    Bill::new(Uuid::new_v4(), name, category, amount, date(2024, 7, 1))
}

pub fn bill_with_status(name: &str, amount: f64, status: BillStatus) -> Bill {
    let mut bill = bill(name, "utilities", amount);
    bill.status = status;
    bill
}

pub fn vehicle(make: &str, model: &str) -> Vehicle {
    Vehicle::new(
        Uuid::new_v4(),
        make,
        model,
        2020,
        "1HGCM82633A004352",
        "7ABC123",
    )
}

pub fn bank_account(bank_name: &str) -> BankAccount {
    BankAccount::new(Uuid::new_v4(), bank_name, "checking", "4821")
}

/// Open a console over an in-memory backend as a signed-in administrator
pub async fn open_admin_console(backend: &InMemoryBackend) -> AdminConsole {
    let auth = InMemoryAuthProvider::signed_in_admin("ops@autofloat.io");
    AdminConsole::open(&auth, backend.backend(), &ConsoleConfig::default_config())
        .await
        .expect("admin session should open the console")
}

/// Shared handle to an in-memory table, as the console holds it
pub fn shared<T: Record>(service: &InMemoryDataService<T>) -> Arc<dyn DataService<T>> {
    Arc::new(service.clone())
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Assert that a list has the expected number of records
pub fn assert_count<T>(items: &[T], expected: usize) {
    assert_eq!(
        items.len(),
        expected,
        "Expected {} items, got {}",
        expected,
        items.len()
    );
}

/// Assert the ids of a result, in order
pub fn assert_ids<T: Record>(items: &[T], expected: &[T::Id]) {
    let ids: Vec<T::Id> = items.iter().map(|item| item.id()).collect();
    assert_eq!(ids, expected, "Unexpected record order");
}

pub fn assert_field_value_string(fv: &FieldValue, expected: &str) {
    match fv {
        FieldValue::String(s) => assert_eq!(s, expected),
        other => panic!("Expected FieldValue::String({:?}), got {:?}", expected, other),
    }
}

pub fn assert_field_value_float(fv: &FieldValue, expected: f64) {
    match fv {
        FieldValue::Float(f) => assert!(
            (*f - expected).abs() < f64::EPSILON,
            "Expected FieldValue::Float({}), got FieldValue::Float({})",
            expected,
            f
        ),
        other => panic!("Expected FieldValue::Float({}), got {:?}", expected, other),
    }
}
