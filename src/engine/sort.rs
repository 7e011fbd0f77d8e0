//! Type-aware column sorting

use crate::core::entity::{FieldKey, Record};
use crate::core::field::FieldValue;
use crate::core::query::{SortDirection, SortDirective};
use std::cmp::Ordering;

/// Compare two field values for a sort direction
///
/// Nulls sort last whatever the direction; non-null values follow
/// [`FieldValue::compare`].
pub fn compare_values(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ordering = a.compare(b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Reorder positions into `records` according to a directive
///
/// The sort is stable: records with equal keys keep their relative order.
pub fn sort_positions<T: Record>(
    records: &[T],
    positions: &mut [usize],
    directive: Option<&SortDirective<T::Field>>,
) {
    let Some(directive) = directive else {
        return;
    };

    // Read each key once instead of once per comparison
    let keys: Vec<FieldValue> = positions
        .iter()
        .map(|&position| records[position].field_value(directive.field))
        .collect();

    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by(|&a, &b| compare_values(&keys[a], &keys[b], directive.direction));

    let sorted: Vec<usize> = order.into_iter().map(|i| positions[i]).collect();
    positions.copy_from_slice(&sorted);
}

/// Sorted copy of `records`; the input is left untouched
///
/// Without a directive the input order is returned unchanged.
pub fn apply_sort<T: Record>(records: &[T], directive: Option<&SortDirective<T::Field>>) -> Vec<T> {
    let mut positions: Vec<usize> = (0..records.len()).collect();
    sort_positions(records, &mut positions, directive);
    positions.into_iter().map(|p| records[p].clone()).collect()
}

/// The single active sort directive of a view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    directive: Option<SortDirective<F>>,
}

impl<F> Default for SortState<F> {
    fn default() -> Self {
        Self { directive: None }
    }
}

impl<F: FieldKey> SortState<F> {
    pub fn new(directive: Option<SortDirective<F>>) -> Self {
        Self { directive }
    }

    /// Activate sorting on a column
    ///
    /// Selecting the active column flips its direction; selecting another
    /// column sorts ascending by it.
    pub fn toggle(&mut self, field: F) {
        self.directive = Some(match self.directive {
            Some(current) if current.field == field => SortDirective {
                field,
                direction: current.direction.flip(),
            },
            _ => SortDirective::asc(field),
        });
    }

    /// Return to input order
    pub fn clear(&mut self) {
        self.directive = None;
    }

    pub fn directive(&self) -> Option<&SortDirective<F>> {
        self.directive.as_ref()
    }

    /// Direction of `field` if it is the active column (for header arrows)
    pub fn direction_of(&self, field: F) -> Option<SortDirection> {
        self.directive
            .filter(|d| d.field == field)
            .map(|d| d.direction)
    }
}
