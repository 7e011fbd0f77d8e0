//! Fixed-size pagination

use crate::core::query::{Page, PaginationMeta};

/// Number of pages for `total` rows, never less than 1
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a requested page number into `[1, total_pages]`
///
/// Zero and negative requests land on page 1.
pub fn clamp_page(requested: i64, total_pages: usize) -> usize {
    let last = total_pages.max(1);
    if requested < 1 {
        1
    } else {
        usize::try_from(requested).map_or(last, |page| page.min(last))
    }
}

/// The window `[(page-1)*size, page*size)` of `rows`, after clamping
pub fn paginate<T: Clone>(rows: &[T], page: i64, page_size: usize) -> Page<T> {
    let pages = total_pages(rows.len(), page_size);
    let meta = PaginationMeta::new(clamp_page(page, pages), page_size, rows.len());
    let start = meta.offset().min(rows.len());
    let end = (start + meta.limit).min(rows.len());

    Page {
        data: rows[start..end].to_vec(),
        pagination: meta,
    }
}
