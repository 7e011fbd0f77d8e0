//! Search, status and date range filtering

use crate::core::entity::{FieldKey, Record};
use crate::core::query::ViewQuery;

/// Check a record against every part of a view query
///
/// `search_fields` restricts the free-text match; an empty slice searches
/// every field of the record.
pub fn matches<T: Record>(record: &T, query: &ViewQuery, search_fields: &[T::Field]) -> bool {
    matches_search(record, query, search_fields)
        && matches_status(record, query)
        && matches_date_range(record, query)
}

/// Case-insensitive substring match over the configured fields
pub fn matches_search<T: Record>(
    record: &T,
    query: &ViewQuery,
    search_fields: &[T::Field],
) -> bool {
    let Some(term) = query.search_term() else {
        return true;
    };

    let fields = if search_fields.is_empty() {
        T::Field::all()
    } else {
        search_fields
    };

    fields.iter().any(|field| {
        record
            .field_value(*field)
            .search_text()
            .is_some_and(|text| text.contains(&term))
    })
}

/// Exact status equality, skipped for the `"all"` wildcard
pub fn matches_status<T: Record>(record: &T, query: &ViewQuery) -> bool {
    match query.status_filter() {
        None => true,
        Some(wanted) => record.status().is_some_and(|status| status == wanted),
    }
}

/// Inclusive day-granular range check on the record's date field
///
/// Records without a readable date are excluded as soon as either bound is
/// set.
pub fn matches_date_range<T: Record>(record: &T, query: &ViewQuery) -> bool {
    if !query.has_date_range() {
        return true;
    }

    let Some(date) = record.date_value() else {
        return false;
    };

    let after_start = query.lower_bound().is_none_or(|start| date >= start);
    let before_end = query.upper_bound().is_none_or(|end| date < end);
    after_start && before_end
}

/// Positions (into `records`) of the records matching the query, in input
/// order
pub fn filter_positions<T: Record>(
    records: &[T],
    query: &ViewQuery,
    search_fields: &[T::Field],
) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches(*record, query, search_fields))
        .map(|(position, _)| position)
        .collect()
}

/// Filtered copy of `records`, preserving input order
pub fn apply_filters<T: Record>(
    records: &[T],
    query: &ViewQuery,
    search_fields: &[T::Field],
) -> Vec<T> {
    records
        .iter()
        .filter(|record| matches(*record, query, search_fields))
        .cloned()
        .collect()
}
