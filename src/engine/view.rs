//! Per-tab table state combining filter, sort, pagination and selection

use crate::core::entity::Record;
use crate::core::error::ExportError;
use crate::core::query::{DEFAULT_PAGE_SIZE, Page, SortDirective, ViewQuery};
use crate::engine::export::{CsvExport, export_records};
use crate::engine::filter::filter_positions;
use crate::engine::paginate::{clamp_page, paginate, total_pages};
use crate::engine::selection::Selection;
use crate::engine::sort::{SortState, sort_positions};
use chrono::{NaiveDate, Utc};
use std::sync::OnceLock;

/// State of one admin table
///
/// Each entity tab owns its own `TableView`; nothing is shared between
/// tabs. The filtered and sorted ordering is computed lazily and cached
/// until the records, the query or the sort change, so repeated reads
/// (page rendering, selection checks) do not refilter.
///
/// Invariants kept after every mutation:
/// - the current page is within `[1, total_pages]`
/// - selected ids all belong to the filtered set
#[derive(Debug)]
pub struct TableView<T: Record> {
    records: Vec<T>,
    query: ViewQuery,
    sort: SortState<T::Field>,
    search_fields: Vec<T::Field>,
    page: usize,
    page_size: usize,
    selection: Selection<T::Id>,
    ordering: OnceLock<Vec<usize>>,
}

impl<T: Record> Default for TableView<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T: Record> TableView<T> {
    /// Empty view using the record type's default search fields
    pub fn new(page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            query: ViewQuery::default(),
            sort: SortState::default(),
            search_fields: T::search_fields().to_vec(),
            page: 1,
            page_size: page_size.max(1),
            selection: Selection::new(),
            ordering: OnceLock::new(),
        }
    }

    /// Override the free-text search fields (empty searches every field)
    pub fn with_search_fields(mut self, fields: Vec<T::Field>) -> Self {
        self.search_fields = fields;
        self.invalidate();
        self
    }

    // === Records ===

    /// Replace the collection with freshly fetched records
    pub fn set_records(&mut self, records: Vec<T>) {
        self.records = records;
        self.after_change();
    }

    /// The full, unfiltered collection in fetch order
    pub fn records(&self) -> &[T] {
        &self.records
    }

    // === Query ===

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn set_query(&mut self, query: ViewQuery) {
        if self.query != query {
            self.query = query;
            self.after_change();
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let query = self.query.clone().with_search(search);
        self.set_query(query);
    }

    pub fn set_status_filter(&mut self, status: impl Into<String>) {
        let query = self.query.clone().with_status(status);
        self.set_query(query);
    }

    pub fn set_date_range(&mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) {
        let query = self.query.clone().with_date_range(from, to);
        self.set_query(query);
    }

    // === Sort ===

    /// Activate or flip sorting on a column
    pub fn toggle_sort(&mut self, field: T::Field) {
        self.sort.toggle(field);
        self.invalidate();
    }

    pub fn clear_sort(&mut self) {
        self.sort.clear();
        self.invalidate();
    }

    /// Replace the active sort (used for configured defaults)
    pub fn set_sort(&mut self, directive: Option<SortDirective<T::Field>>) {
        self.sort = SortState::new(directive);
        self.invalidate();
    }

    pub fn sort_state(&self) -> &SortState<T::Field> {
        &self.sort
    }

    pub fn sort_directive(&self) -> Option<&SortDirective<T::Field>> {
        self.sort.directive()
    }

    // === Derived rows ===

    /// Positions of the filtered records in display order
    fn ordering(&self) -> &[usize] {
        self.ordering.get_or_init(|| {
            let mut positions = filter_positions(&self.records, &self.query, &self.search_fields);
            sort_positions(&self.records, &mut positions, self.sort.directive());
            positions
        })
    }

    /// Whether the filtered ordering is currently cached
    pub fn is_memoized(&self) -> bool {
        self.ordering.get().is_some()
    }

    /// Filtered and sorted records
    pub fn filtered(&self) -> Vec<T> {
        self.ordering()
            .iter()
            .map(|&position| self.records[position].clone())
            .collect()
    }

    /// Identifiers of the filtered records in display order
    pub fn filtered_ids(&self) -> Vec<T::Id> {
        self.ordering()
            .iter()
            .map(|&position| self.records[position].id())
            .collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.ordering().len()
    }

    // === Pagination ===

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.filtered_count(), self.page_size)
    }

    /// Move to a page, clamped into `[1, total_pages]`
    pub fn go_to_page(&mut self, page: i64) -> usize {
        self.page = clamp_page(page, self.total_pages());
        self.page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.page as i64 + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.page as i64 - 1)
    }

    /// The rows of the current page
    pub fn page(&self) -> Page<T> {
        let window = paginate(self.ordering(), self.page as i64, self.page_size);
        Page {
            data: window
                .data
                .into_iter()
                .map(|position| self.records[position].clone())
                .collect(),
            pagination: window.pagination,
        }
    }

    // === Selection ===

    /// Flip one row; ids hidden by the active filter cannot be selected
    pub fn toggle_selected(&mut self, id: T::Id) -> bool {
        if !self.selection.is_selected(&id) && !self.is_filtered(&id) {
            return false;
        }
        self.selection.toggle(id)
    }

    /// Select every record matching the current filter, or clear
    pub fn select_all(&mut self, checked: bool) {
        let ids = self.filtered_ids();
        self.selection.select_all(checked, ids);
    }

    /// Unselect the given ids, leaving the rest of the selection alone
    pub fn deselect(&mut self, ids: &[T::Id]) {
        self.selection.deselect(ids);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: &T::Id) -> bool {
        self.selection.is_selected(id)
    }

    pub fn selected_ids(&self) -> Vec<T::Id> {
        self.selection.ids()
    }

    pub fn selection(&self) -> &Selection<T::Id> {
        &self.selection
    }

    /// Header checkbox state: every filtered record is selected
    pub fn all_filtered_selected(&self) -> bool {
        let ids = self.filtered_ids();
        self.selection.covers(ids.iter())
    }

    // === Export ===

    /// CSV of the full unfiltered collection
    pub fn export_csv(&self) -> Result<CsvExport, ExportError> {
        export_records(&self.records, Utc::now().date_naive())
    }

    // === Internals ===

    fn is_filtered(&self, id: &T::Id) -> bool {
        self.ordering()
            .iter()
            .any(|&position| self.records[position].id() == *id)
    }

    fn invalidate(&mut self) {
        self.ordering = OnceLock::new();
    }

    /// Recompute after records or filters changed and restore invariants
    fn after_change(&mut self) {
        self.invalidate();

        let visible = self.filtered_ids();
        self.selection.retain_matching(visible.iter());

        if self.page > self.total_pages() {
            self.page = 1;
        }
    }
}
