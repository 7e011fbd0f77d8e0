//! Client-side table engine
//!
//! Everything an admin table does to an already fetched collection:
//! filtering, type-aware sorting, pagination, multi-row selection and CSV
//! export. The functions here are pure; [`view::TableView`] ties them
//! together into per-tab state.

pub mod export;
pub mod filter;
pub mod paginate;
pub mod selection;
pub mod sort;
pub mod view;

pub use export::{CsvExport, csv_cell, export_file_name, export_records, to_csv};
pub use filter::{apply_filters, matches};
pub use paginate::{clamp_page, paginate, total_pages};
pub use selection::Selection;
pub use sort::{SortState, apply_sort, compare_values};
pub use view::TableView;
