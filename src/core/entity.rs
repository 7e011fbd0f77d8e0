//! Record traits defining the typed row abstraction used by every admin table

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use std::borrow::Cow;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A typed column key for a record type.
///
/// Each entity declares its own field enum, so a sort directive or a search
/// field list for bills can only name bill fields. The order of
/// [`FieldKey::all`] is the record's key order, which drives CSV headers.
pub trait FieldKey: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Every field of the record, in declaration order
    fn all() -> &'static [Self];

    /// Column name as stored by the backend (e.g. "created_at")
    fn name(&self) -> &'static str;

    /// Resolve a column name back to its key
    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|field| field.name() == name)
    }
}

/// Base trait for every row shown in an admin table.
///
/// A record has:
/// - an opaque identifier, unique within its collection
/// - a typed set of fields readable as [`FieldValue`]s
/// - optionally a status label used by the categorical filter
/// - optionally a date field used by the date range filter
pub trait Record: Clone + Send + Sync + 'static {
    /// Identifier type (usually `Uuid`)
    type Id: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Typed field enum for this record
    type Field: FieldKey;

    /// The backend table name (e.g. "bills", "payment_plans")
    fn resource_name() -> &'static str;

    /// The singular display name (e.g. "bill", "payment plan")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Self::Id;

    /// Get the value of a field
    fn field_value(&self, field: Self::Field) -> FieldValue;

    /// Status label compared by the status filter.
    ///
    /// What "status" means varies per entity: an enum value for bills, or a
    /// label derived from a boolean such as `verified` for vehicles.
    fn status(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// Field checked by the date range filter
    fn date_field() -> Option<Self::Field> {
        None
    }

    /// Default free-text search fields. Empty means every field.
    fn search_fields() -> &'static [Self::Field] {
        &[]
    }

    /// Instant stored in the date field, if any
    fn date_value(&self) -> Option<DateTime<Utc>> {
        Self::date_field().and_then(|field| self.field_value(field).as_datetime())
    }

    /// Human-readable label used in confirmation dialogs
    fn label(&self) -> String {
        format!("{} {}", Self::resource_name_singular(), self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum NoteField {
        Id,
        Title,
        CreatedAt,
    }

    impl FieldKey for NoteField {
        fn all() -> &'static [Self] {
            &[NoteField::Id, NoteField::Title, NoteField::CreatedAt]
        }

        fn name(&self) -> &'static str {
            match self {
                NoteField::Id => "id",
                NoteField::Title => "title",
                NoteField::CreatedAt => "created_at",
            }
        }
    }

    #[derive(Debug, Clone)]
    struct Note {
        id: Uuid,
        title: String,
        created_at: DateTime<Utc>,
    }

    impl Record for Note {
        type Id = Uuid;
        type Field = NoteField;

        fn resource_name() -> &'static str {
            "notes"
        }

        fn resource_name_singular() -> &'static str {
            "note"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn field_value(&self, field: NoteField) -> FieldValue {
            match field {
                NoteField::Id => FieldValue::Uuid(self.id),
                NoteField::Title => FieldValue::String(self.title.clone()),
                NoteField::CreatedAt => FieldValue::DateTime(self.created_at),
            }
        }

        fn date_field() -> Option<NoteField> {
            Some(NoteField::CreatedAt)
        }
    }

    #[test]
    fn test_field_key_from_name() {
        assert_eq!(NoteField::from_name("title"), Some(NoteField::Title));
        assert_eq!(NoteField::from_name("missing"), None);
    }

    #[test]
    fn test_record_defaults() {
        let created_at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let note = Note {
            id: Uuid::new_v4(),
            title: "Hello".to_string(),
            created_at,
        };

        assert!(note.status().is_none());
        assert!(Note::search_fields().is_empty());
        assert_eq!(note.date_value(), Some(created_at));
        assert!(note.label().starts_with("note "));
    }
}
