//! View query parameters, sort directives and pagination types

use crate::core::entity::FieldKey;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Status filter value that disables the categorical filter
pub const STATUS_ALL: &str = "all";

/// Page size used by every admin table
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Search and filter state of one table view
///
/// All filters combine with logical AND. Every part is optional:
/// a blank search, the `"all"` status and unset date bounds each match
/// every record.
///
/// # Example
/// ```rust,ignore
/// let query = ViewQuery::default()
///     .with_search("rent")
///     .with_status("pending")
///     .with_date_range(Some(from), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
    /// Free-text search term, matched case-insensitively as a substring
    pub search: String,

    /// Status filter value, or `"all"`
    pub status: String,

    /// Inclusive start day of the date range
    pub date_from: Option<NaiveDate>,

    /// Inclusive end day of the date range
    pub date_to: Option<NaiveDate>,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: STATUS_ALL.to_string(),
            date_from: None,
            date_to: None,
        }
    }
}

impl ViewQuery {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Normalized search term, `None` when the search box is blank
    pub fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        if term.is_empty() {
            None
        } else {
            Some(term.to_lowercase())
        }
    }

    /// Status value to match, `None` for the wildcard
    pub fn status_filter(&self) -> Option<&str> {
        let status = self.status.trim();
        if status.is_empty() || status == STATUS_ALL {
            None
        } else {
            Some(status)
        }
    }

    /// Start of the `from` day (inclusive)
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.date_from
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Start of the day after `to` (exclusive), i.e. the `to` day is
    /// included up to its last instant
    pub fn upper_bound(&self) -> Option<DateTime<Utc>> {
        self.date_to
            .and_then(|day| day.succ_opt())
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Whether any date bound is set
    pub fn has_date_range(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    /// Whether the query filters anything at all
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none() && self.status_filter().is_none() && !self.has_date_range()
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// A (field, direction) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortDirective<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: FieldKey> SortDirective<F> {
    pub fn asc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Parse a sort expression
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    ///
    /// Returns `None` for unknown fields or directions.
    pub fn parse(expr: &str) -> Option<Self> {
        let (name, direction) = match expr.split_once(':') {
            Some((name, "asc")) => (name, SortDirection::Asc),
            Some((name, "desc")) => (name, SortDirection::Desc),
            Some(_) => return None,
            None => (expr, SortDirection::Asc),
        };

        F::from_name(name.trim()).map(|field| Self { field, direction })
    }
}

impl<F: FieldKey> std::fmt::Display for SortDirective<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.field.name(), self.direction.as_str())
    }
}

/// One page of a table
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The rows of this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, at least 1 even for an empty table
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata for an already clamped page
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit).max(1);
        let page = page.clamp(1, total_pages);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Index of the first row of the page
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }
}
