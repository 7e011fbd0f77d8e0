//! Macro-generated test suite for `DataService<TestRecord>` contract validation.
//!
//! The `data_service_tests!` macro generates a test module that validates any
//! `DataService<TestRecord>` implementation against the contract the console
//! relies on: CRUD operations, equality search across value kinds, batch
//! deletes, and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod harness;
//!
//! use harness::*;
//!
//! data_service_tests!(InMemoryDataService::<TestRecord>::new());
//! ```

/// Generate a full `DataService<TestRecord>` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty instance implementing
/// `DataService<TestRecord>`. It is re-evaluated for each test. For the
/// concurrent access test the service must also be `Clone + 'static`
/// with shared state.
macro_rules! data_service_tests {
    ($factory:expr) => {
        mod data_service_contract_tests {
            use super::*;
            use autofloat::core::entity::Record;
            use autofloat::core::field::FieldValue;
            use autofloat::core::service::DataService;
            use uuid::Uuid;

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let service = $factory;
                let record = create_test_record("Alice", "alice@test.com", 30, 4.5, true);
                let original_id = record.id;

                let created = service.create(record).await.unwrap();
                assert_eq!(created.id(), original_id);
                assert_eq!(created.name, "Alice");
                assert_eq!(created.status().as_deref(), Some("active"));

                let retrieved = service.get(&original_id).await.unwrap();
                let retrieved = retrieved.expect("record should exist after create");
                assert_eq!(retrieved, created);
                assert!((retrieved.score - 4.5).abs() < f64::EPSILON);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let service = $factory;

                let result = service.get(&Uuid::new_v4()).await.unwrap();
                assert!(result.is_none(), "Getting an unknown id should return None");
            }

            #[tokio::test]
            async fn test_list_empty() {
                let service = $factory;

                let all = service.list().await.unwrap();
                assert!(all.is_empty());
            }

            #[tokio::test]
            async fn test_list_keeps_insertion_order() {
                let service = $factory;
                let batch = sample_batch(5);
                let expected: Vec<Uuid> = batch.iter().map(|r| r.id).collect();

                for record in batch {
                    service.create(record).await.unwrap();
                }

                let all = service.list().await.unwrap();
                assert_count(&all, 5);
                assert_ids(&all, &expected);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let service = $factory;
                let mut record = create_test_record("Alice", "alice@test.com", 25, 3.0, true);
                let id = record.id;
                service.create(record.clone()).await.unwrap();

                record.name = "Alice Updated".to_string();
                record.age = 26;

                let updated = service.update(&id, record).await.unwrap();
                assert_eq!(updated.name, "Alice Updated");

                let retrieved = service.get(&id).await.unwrap().unwrap();
                assert_eq!(retrieved.name, "Alice Updated");
                assert_eq!(retrieved.age, 26);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let service = $factory;
                let record = create_test_record("Ghost", "ghost@test.com", 0, 0.0, false);
                let id = record.id;

                let result = service.update(&id, record).await;
                assert!(result.is_err(), "Updating an unknown id should fail");
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let service = $factory;
                let record = create_test_record("Bob", "bob@test.com", 40, 2.0, true);
                let id = record.id;
                service.create(record).await.unwrap();

                service.delete(&id).await.unwrap();

                assert!(service.get(&id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_many() {
                let service = $factory;
                let batch = sample_batch(4);
                let ids: Vec<Uuid> = batch.iter().map(|r| r.id).collect();
                for record in batch {
                    service.create(record).await.unwrap();
                }

                service.delete_many(&ids[1..3]).await.unwrap();

                let remaining = service.list().await.unwrap();
                assert_ids(&remaining, &[ids[0], ids[3]]);
            }

            #[tokio::test]
            async fn test_delete_many_ignores_unknown_ids() {
                let service = $factory;
                let record = create_test_record("Keep", "keep@test.com", 30, 1.0, true);
                let id = record.id;
                service.create(record).await.unwrap();

                service.delete_many(&[Uuid::new_v4()]).await.unwrap();

                assert_count(&service.list().await.unwrap(), 1);
                assert!(service.get(&id).await.unwrap().is_some());
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[tokio::test]
            async fn test_search_string_field() {
                let service = $factory;
                for record in sample_batch(3) {
                    service.create(record).await.unwrap();
                }

                let found = service
                    .search(
                        TestRecordField::Email,
                        &FieldValue::String("record1@test.com".into()),
                    )
                    .await
                    .unwrap();
                assert_count(&found, 1);
                assert_eq!(found[0].name, "Record_1");
            }

            #[tokio::test]
            async fn test_search_integer_field() {
                let service = $factory;
                for record in sample_batch(3) {
                    service.create(record).await.unwrap();
                }

                let found = service
                    .search(TestRecordField::Age, &FieldValue::Integer(22))
                    .await
                    .unwrap();
                assert_count(&found, 1);
                assert_eq!(found[0].name, "Record_2");
            }

            #[tokio::test]
            async fn test_search_boolean_field() {
                let service = $factory;
                for record in sample_batch(4) {
                    service.create(record).await.unwrap();
                }

                let found = service
                    .search(TestRecordField::Active, &FieldValue::Boolean(true))
                    .await
                    .unwrap();
                assert_count(&found, 2);
                assert!(found.iter().all(|r| r.active));
            }

            #[tokio::test]
            async fn test_search_status_field() {
                let service = $factory;
                for record in sample_batch(5) {
                    service.create(record).await.unwrap();
                }

                let found = service
                    .search(
                        TestRecordField::Status,
                        &FieldValue::String("archived".into()),
                    )
                    .await
                    .unwrap();
                assert_count(&found, 2);
            }

            #[tokio::test]
            async fn test_search_no_results() {
                let service = $factory;
                for record in sample_batch(3) {
                    service.create(record).await.unwrap();
                }

                let found = service
                    .search(
                        TestRecordField::Name,
                        &FieldValue::String("nobody".into()),
                    )
                    .await
                    .unwrap();
                assert!(found.is_empty());
            }

            // ==================================================================
            // Edge cases
            // ==================================================================

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let service = $factory;
                let id = Uuid::new_v4();
                let first = create_test_record_with_id(id, "First", "a@test.com", 20, 1.0, true);
                let second = create_test_record_with_id(id, "Second", "b@test.com", 21, 2.0, true);

                service.create(first).await.unwrap();
                let result = service.create(second).await;

                assert!(result.is_err(), "Inserting a duplicate id should fail");
                let stored = service.get(&id).await.unwrap().unwrap();
                assert_eq!(stored.name, "First");
            }

            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_access() {
                let service = $factory;
                let s1 = service.clone();
                let s2 = service.clone();

                let r1 = create_test_record("Concurrent_A", "ca@test.com", 20, 1.0, true);
                let r2 = create_test_record("Concurrent_B", "cb@test.com", 30, 2.0, false);
                let id1 = r1.id;
                let id2 = r2.id;

                let h1 = tokio::spawn(async move { s1.create(r1).await });
                let h2 = tokio::spawn(async move { s2.create(r2).await });

                let (c1, c2) = tokio::time::timeout(std::time::Duration::from_secs(30), async {
                    tokio::try_join!(h1, h2).unwrap()
                })
                .await
                .expect("Concurrent creates timed out");

                c1.unwrap();
                c2.unwrap();

                let ids: Vec<Uuid> = service.list().await.unwrap().iter().map(|r| r.id()).collect();
                assert_eq!(ids.len(), 2);
                assert!(ids.contains(&id1));
                assert!(ids.contains(&id2));
            }
        }
    };
}
