//! CSV export of a record collection

use crate::core::entity::{FieldKey, Record};
use crate::core::error::ExportError;
use crate::core::field::FieldValue;
use chrono::NaiveDate;

/// A rendered CSV file ready to be handed to the browser download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
    pub rows: usize,
}

/// Serialize records to CSV
///
/// The header is the key set of the first record in declaration order and
/// every row lists values in that order. Strings and dates are
/// double-quoted with embedded quotes doubled; numbers and booleans use
/// their default string form; nulls are empty cells. Lines are joined
/// with `\n` and there is no trailing newline.
pub fn to_csv<T: Record>(records: &[T]) -> Result<String, ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty {
            entity_type: T::resource_name().to_string(),
        });
    }

    let fields = T::Field::all();
    let mut lines = Vec::with_capacity(records.len() + 1);

    lines.push(
        fields
            .iter()
            .map(|field| field.name())
            .collect::<Vec<_>>()
            .join(","),
    );

    for record in records {
        lines.push(
            fields
                .iter()
                .map(|field| csv_cell(&record.field_value(*field)))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    Ok(lines.join("\n"))
}

/// Render one CSV cell
pub fn csv_cell(value: &FieldValue) -> String {
    match value {
        FieldValue::String(_)
        | FieldValue::Uuid(_)
        | FieldValue::DateTime(_)
        | FieldValue::Date(_) => quote(&value.to_string()),
        FieldValue::Integer(_) | FieldValue::Float(_) | FieldValue::Boolean(_) => value.to_string(),
        FieldValue::Null => String::new(),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Download file name, e.g. `bills_export_2024-06-01.csv`
pub fn export_file_name(resource: &str, day: NaiveDate) -> String {
    format!("{}_export_{}.csv", resource, day.format("%Y-%m-%d"))
}

/// Render records into a [`CsvExport`] named after their resource
pub fn export_records<T: Record>(records: &[T], day: NaiveDate) -> Result<CsvExport, ExportError> {
    let content = to_csv(records)?;
    Ok(CsvExport {
        file_name: export_file_name(T::resource_name(), day),
        content,
        rows: records.len(),
    })
}
