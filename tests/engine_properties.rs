//! Behavioural properties of the table engine
//!
//! Exercises the pure filter, sort, pagination, selection and export
//! functions together, then the same flows through `TableView`.

mod harness;

use autofloat::core::entity::Record;
use autofloat::engine::{apply_filters, apply_sort, clamp_page, paginate, to_csv, total_pages};
use autofloat::prelude::*;
use harness::*;

fn mixed_records() -> Vec<TestRecord> {
    vec![
        create_test_record("Carol", "carol@autofloat.io", 41, 7.5, true),
        create_test_record("alice", "alice@example.com", 29, 3.0, false),
        create_test_record("Bob", "bob@autofloat.io", 29, 9.25, true),
        create_test_record("dave", "dave@example.com", 35, 1.0, true),
        create_test_record("Erin", "erin@autofloat.io", 29, 4.0, false),
        create_test_record("Frank", "frank@example.com", 52, 6.5, true),
        create_test_record("grace", "grace@autofloat.io", 35, 2.25, false),
    ]
}

fn search_fields() -> &'static [TestRecordField] {
    TestRecord::search_fields()
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_filter_is_idempotent() {
    let records = mixed_records();
    let queries = [
        ViewQuery::default().with_search("autofloat"),
        ViewQuery::default().with_status("archived"),
        ViewQuery::default().with_search("A").with_status("active"),
        ViewQuery::default(),
    ];

    for query in &queries {
        let once = apply_filters(&records, query, search_fields());
        let twice = apply_filters(&once, query, search_fields());
        assert_eq!(once, twice, "query {:?} is not idempotent", query);
    }
}

#[test]
fn test_filters_combine_with_and() {
    let records = mixed_records();
    let query = ViewQuery::default()
        .with_search("autofloat")
        .with_status("active");

    let names: Vec<String> = apply_filters(&records, &query, search_fields())
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Carol", "Bob"]);
}

#[test]
fn test_date_range_is_inclusive_by_day() {
    let mut records = sample_batch(3);
    records[0].created_at = instant(2024, 5, 31, 23);
    records[1].created_at = instant(2024, 6, 1, 0);
    records[2].created_at = instant(2024, 6, 30, 23);

    let query =
        ViewQuery::default().with_date_range(Some(date(2024, 6, 1)), Some(date(2024, 6, 30)));
    let filtered = apply_filters(&records, &query, search_fields());

    assert_ids(&filtered, &[records[1].id, records[2].id]);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_equal_keys_form_contiguous_blocks() {
    let records = mixed_records();
    let sorted = apply_sort(&records, Some(&SortDirective::asc(TestRecordField::Age)));

    let ages: Vec<i64> = sorted.iter().map(|r| r.age).collect();
    assert_eq!(ages, vec![29, 29, 29, 35, 35, 41, 52]);

    // Ties keep their input order
    let tied: Vec<&str> = sorted.iter().take(3).map(|r| r.name.as_str()).collect();
    assert_eq!(tied, vec!["alice", "Bob", "Erin"]);
}

#[test]
fn test_ascending_reversed_equals_descending() {
    let records = mixed_records();

    for field in [TestRecordField::Score, TestRecordField::CreatedAt] {
        let mut records = records.clone();
        for (hour, record) in records.iter_mut().enumerate() {
            record.created_at = instant(2024, 3, 1 + (hour as u32 * 3) % 7, hour as u32);
        }

        let mut ascending = apply_sort(&records, Some(&SortDirective::asc(field)));
        ascending.reverse();
        let descending = apply_sort(&records, Some(&SortDirective::desc(field)));

        assert_eq!(ascending, descending, "round trip failed for {:?}", field);
    }
}

#[test]
fn test_text_sort_ignores_case_first() {
    let records = mixed_records();
    let sorted = apply_sort(&records, Some(&SortDirective::asc(TestRecordField::Name)));

    let names: Vec<&str> = sorted.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["alice", "Bob", "Carol", "dave", "Erin", "Frank", "grace"]);
}

#[test]
fn test_sort_leaves_input_untouched() {
    let records = mixed_records();
    let before = records.clone();

    let _ = apply_sort(&records, Some(&SortDirective::desc(TestRecordField::Age)));

    assert_eq!(records, before);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_pages_cover_sequence_exactly_once() {
    let records = apply_sort(&sample_batch(23), Some(&SortDirective::desc(TestRecordField::Age)));

    for page_size in [1, 4, 10, 23, 50] {
        let pages = total_pages(records.len(), page_size);
        let rebuilt: Vec<TestRecord> = (1..=pages as i64)
            .flat_map(|page| paginate(&records, page, page_size).data)
            .collect();

        assert_eq!(rebuilt, records, "page size {} lost or repeated rows", page_size);
    }
}

#[test]
fn test_page_requests_are_clamped() {
    let records = sample_batch(25);

    assert_eq!(clamp_page(0, 3), 1);
    assert_eq!(clamp_page(-4, 3), 1);
    assert_eq!(clamp_page(9, 3), 3);

    let last = paginate(&records, 99, 10);
    assert_eq!(last.pagination.page, 3);
    assert_count(&last.data, 5);
    assert!(!last.pagination.has_next);

    let first = paginate(&records, -1, 10);
    assert_eq!(first.pagination.page, 1);
    assert!(!first.pagination.has_prev);
}

#[test]
fn test_empty_collection_is_page_one() {
    let empty: Vec<TestRecord> = Vec::new();

    let page = paginate(&empty, 5, 10);
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.total_pages, 1);
    assert_eq!(page.pagination.total, 0);
    assert!(page.data.is_empty());
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_all_then_narrow_filter() {
    let records = mixed_records();
    let mut view = TableView::<TestRecord>::default();
    view.set_records(records.clone());

    view.set_search("autofloat");
    view.select_all(true);
    assert_eq!(view.selection().len(), 4);
    assert!(view.all_filtered_selected());

    view.set_status_filter("active");
    let narrowed = view.filtered_ids();
    let selected = view.selected_ids();

    assert!(selected.iter().all(|id| narrowed.contains(id)));
    assert_eq!(selected.len(), narrowed.len());
    for record in records.iter().filter(|r| !narrowed.contains(&r.id)) {
        assert!(!view.is_selected(&record.id));
    }
}

#[test]
fn test_select_all_toggle_off_clears() {
    let mut view = TableView::<TestRecord>::default();
    view.set_records(sample_batch(6));

    view.select_all(true);
    view.select_all(false);

    assert!(view.selected_ids().is_empty());
    assert!(!view.all_filtered_selected());
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_bills_tab_scenario() {
    let paid = bill_with_status("Gym", 50.0, BillStatus::Paid);
    let internet = bill_with_status("Internet", 200.0, BillStatus::Pending);
    let water = bill_with_status("Water", 10.0, BillStatus::Pending);

    let mut view = TableView::<Bill>::new(10);
    view.set_records(vec![paid, internet.clone(), water.clone()]);

    view.set_status_filter("pending");
    view.toggle_sort(BillField::Amount);
    assert_ids(&view.filtered(), &[water.id, internet.id]);

    let mut paged = TableView::<Bill>::new(1);
    paged.set_records(view.records().to_vec());
    paged.set_status_filter("pending");
    paged.toggle_sort(BillField::Amount);
    paged.go_to_page(2);

    let page = paged.page();
    assert_ids(&page.data, &[internet.id]);
    assert_eq!(page.pagination.total_pages, 2);
}

#[test]
fn test_csv_scenario() {
    let csv = to_csv(&[line_item(1, "Rent", 1200)]).unwrap();

    assert_eq!(csv, "name,amount\n\"Rent\",1200");
    assert_eq!(csv.lines().count(), 2);
}

#[test]
fn test_csv_empty_collection_is_an_error() {
    let result = to_csv::<LineItem>(&[]);

    assert_eq!(
        result,
        Err(ExportError::Empty {
            entity_type: "line_items".to_string()
        })
    );
}

#[test]
fn test_view_page_resets_when_filter_shrinks() {
    let mut view = TableView::<TestRecord>::new(2);
    view.set_records(sample_batch(10));

    assert_eq!(view.go_to_page(5), 5);
    view.set_search("Record_1");

    assert_eq!(view.current_page(), 1);
    assert_eq!(view.filtered_count(), 1);
}
