//! Integration tests for the in-memory backend services.
//!
//! Invokes `data_service_tests!` to validate that InMemoryDataService fully
//! conforms to the DataService<T> contract, then covers the outage switch
//! shared by clones.

#[macro_use]
mod harness;

use autofloat::storage::InMemoryDataService;
use harness::*;

data_service_tests!(InMemoryDataService::<TestRecord>::new());

mod outage_tests {
    use super::*;
    use autofloat::core::service::DataService;

    #[tokio::test]
    async fn test_failing_switch_is_shared_by_clones() {
        let service = InMemoryDataService::with_records(sample_batch(2));
        let handle = shared(&service);

        service.set_failing(true);
        assert!(handle.list().await.is_err());
        assert!(handle.delete_many(&[]).await.is_err());

        service.set_failing(false);
        assert_count(&handle.list().await.unwrap(), 2);
    }

    #[test]
    fn test_with_records_counts_rows() {
        let service = InMemoryDataService::with_records(sample_batch(3));
        assert_eq!(service.len(), 3);
        assert!(!service.is_empty());
        assert!(InMemoryDataService::<TestRecord>::new().is_empty());
    }
}
