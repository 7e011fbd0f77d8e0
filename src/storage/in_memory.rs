//! In-memory implementations of the backend services for testing and development

use crate::console::Backend;
use crate::core::auth::{AuthProvider, Role, Session, SignUp};
use crate::core::entity::Record;
use crate::core::error::EntityError;
use crate::core::field::FieldValue;
use crate::core::processing::{ProcessOutcome, ProcessRequest, ProcessingGateway};
use crate::core::service::{DataService, DocumentKind, DocumentRef, DocumentStore};
use crate::entities::{
    BankAccount, Bill, PaymentPlan, Referral, Subscription, UserProfile, Vehicle,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

// =============================================================================
// Tables
// =============================================================================

/// In-memory table implementation
///
/// Rows are kept in insertion order so `list` is deterministic. Uses RwLock
/// for thread-safe access; clones share the same table.
#[derive(Clone)]
pub struct InMemoryDataService<T: Record> {
    rows: Arc<RwLock<IndexMap<T::Id, T>>>,
    failing: Arc<AtomicBool>,
}

impl<T: Record> InMemoryDataService<T> {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(IndexMap::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a table pre-filled with rows
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| (record.id(), record))
            .collect();
        Self {
            rows: Arc::new(RwLock::new(rows)),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every following call fail, simulating an unreachable backend
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of stored rows
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self, operation: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(anyhow!(
                "Backend unavailable while trying to {} {}",
                operation,
                T::resource_name()
            ));
        }
        Ok(())
    }
}

impl<T: Record> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> DataService<T> for InMemoryDataService<T> {
    async fn list(&self) -> Result<Vec<T>> {
        self.check_available("list")?;
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.values().cloned().collect())
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>> {
        self.check_available("get")?;
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.get(id).cloned())
    }

    async fn search(&self, field: T::Field, value: &FieldValue) -> Result<Vec<T>> {
        self.check_available("search")?;
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows
            .values()
            .filter(|row| &row.field_value(field) == value)
            .cloned()
            .collect())
    }

    async fn create(&self, record: T) -> Result<T> {
        self.check_available("create")?;
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = record.id();
        if rows.contains_key(&id) {
            return Err(EntityError::AlreadyExists {
                entity_type: T::resource_name_singular().to_string(),
                id: id.to_string(),
            }
            .into());
        }

        rows.insert(id, record.clone());

        Ok(record)
    }

    async fn update(&self, id: &T::Id, record: T) -> Result<T> {
        self.check_available("update")?;
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let slot = rows.get_mut(id).ok_or_else(|| EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id: id.to_string(),
        })?;

        *slot = record.clone();

        Ok(record)
    }

    async fn delete(&self, id: &T::Id) -> Result<()> {
        self.check_available("delete")?;
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        rows.shift_remove(id);

        Ok(())
    }

    async fn delete_many(&self, ids: &[T::Id]) -> Result<()> {
        self.check_available("delete")?;
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        // Missing ids are ignored, like `DELETE ... WHERE id IN (...)`
        rows.retain(|id, _| !ids.contains(id));

        Ok(())
    }
}

// =============================================================================
// Documents
// =============================================================================

/// In-memory document storage keyed by path
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    files: Arc<RwLock<IndexMap<String, (DocumentRef, Vec<u8>)>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw bytes stored at a path
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.read().ok()?;
        files.get(path).map(|(_, bytes)| bytes.clone())
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn upload(
        &self,
        user_id: Uuid,
        kind: DocumentKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<DocumentRef> {
        if file_name.trim().is_empty() {
            return Err(anyhow!("File name must not be empty"));
        }

        let mut files = self
            .files
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let document = DocumentRef::new(user_id, kind, file_name, bytes.len());
        files.insert(document.path.clone(), (document.clone(), bytes));

        Ok(document)
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<DocumentRef>> {
        let files = self
            .files
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(files
            .values()
            .filter(|(document, _)| document.user_id == user_id)
            .map(|(document, _)| document.clone())
            .collect())
    }
}

// =============================================================================
// Authentication
// =============================================================================

struct Account {
    password: String,
    session: Session,
}

/// In-memory account store with a single current session
#[derive(Clone, Default)]
pub struct InMemoryAuthProvider {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    current: Arc<RwLock<Option<Session>>>,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account with the given role (not signed in)
    pub fn with_account(self, email: &str, password: &str, role: Role) -> Self {
        if let Ok(mut accounts) = self.accounts.write() {
            accounts.insert(
                email.to_lowercase(),
                Account {
                    password: password.to_string(),
                    session: Session {
                        user_id: Uuid::new_v4(),
                        email: email.to_lowercase(),
                        role,
                    },
                },
            );
        }
        self
    }

    /// Provider already signed in as a fresh administrator
    pub fn signed_in_admin(email: &str) -> Self {
        let provider = Self::new();
        if let Ok(mut current) = provider.current.write() {
            *current = Some(Session {
                user_id: Uuid::new_v4(),
                email: email.to_lowercase(),
                role: Role::Admin,
            });
        }
        provider
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn current_user(&self) -> Result<Option<Session>> {
        let current = self
            .current
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(current.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let session = {
            let accounts = self
                .accounts
                .read()
                .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

            match accounts.get(&email.to_lowercase()) {
                Some(account) if account.password == password => account.session.clone(),
                _ => return Err(anyhow!("Invalid login credentials")),
            }
        };

        let mut current = self
            .current
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        *current = Some(session.clone());

        Ok(session)
    }

    async fn sign_up(&self, form: SignUp) -> Result<Session> {
        let email = form.email.trim().to_lowercase();
        let session = Session {
            user_id: Uuid::new_v4(),
            email: email.clone(),
            role: Role::Member,
        };

        {
            let mut accounts = self
                .accounts
                .write()
                .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

            if accounts.contains_key(&email) {
                return Err(anyhow!("User already registered"));
            }

            accounts.insert(
                email,
                Account {
                    password: form.password,
                    session: session.clone(),
                },
            );
        }

        let mut current = self
            .current
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        *current = Some(session.clone());

        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        let mut current = self
            .current
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        *current = None;

        Ok(())
    }
}

// =============================================================================
// Processing
// =============================================================================

/// Scripted processing gateway
///
/// Answers queued outcomes first, then approves everything. Every submitted
/// request is recorded for inspection.
#[derive(Clone, Default)]
pub struct InMemoryProcessingGateway {
    script: Arc<RwLock<VecDeque<std::result::Result<ProcessOutcome, String>>>>,
    submitted: Arc<RwLock<Vec<ProcessRequest>>>,
}

impl InMemoryProcessingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the outcome of the next unanswered request
    pub fn push_outcome(&self, outcome: ProcessOutcome) {
        if let Ok(mut script) = self.script.write() {
            script.push_back(Ok(outcome));
        }
    }

    /// Make the next unanswered request fail to reach the processor
    pub fn push_failure(&self, message: impl Into<String>) {
        if let Ok(mut script) = self.script.write() {
            script.push_back(Err(message.into()));
        }
    }

    /// Requests received so far
    pub fn submitted(&self) -> Vec<ProcessRequest> {
        self.submitted
            .read()
            .map(|submitted| submitted.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ProcessingGateway for InMemoryProcessingGateway {
    async fn submit(&self, request: ProcessRequest) -> Result<ProcessOutcome> {
        self.submitted
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .push(request.clone());

        let next = self
            .script
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .pop_front();

        match next {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(ProcessOutcome::Approved {
                reference: format!("{}-{}", request.kind(), request.target_id().simple()),
            }),
        }
    }
}

// =============================================================================
// Whole backend
// =============================================================================

/// Every backend collaborator, in memory
///
/// Keeps the concrete services so tests can seed tables, simulate outages
/// and script processor outcomes while the console holds trait objects of
/// the same shared state.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    pub users: InMemoryDataService<UserProfile>,
    pub bills: InMemoryDataService<Bill>,
    pub vehicles: InMemoryDataService<Vehicle>,
    pub subscriptions: InMemoryDataService<Subscription>,
    pub payment_plans: InMemoryDataService<PaymentPlan>,
    pub bank_accounts: InMemoryDataService<BankAccount>,
    pub referrals: InMemoryDataService<Referral>,
    pub documents: InMemoryDocumentStore,
    pub processing: InMemoryProcessingGateway,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trait-object handles sharing this backend's state
    pub fn backend(&self) -> Backend {
        Backend {
            users: Arc::new(self.users.clone()),
            bills: Arc::new(self.bills.clone()),
            vehicles: Arc::new(self.vehicles.clone()),
            subscriptions: Arc::new(self.subscriptions.clone()),
            payment_plans: Arc::new(self.payment_plans.clone()),
            bank_accounts: Arc::new(self.bank_accounts.clone()),
            referrals: Arc::new(self.referrals.clone()),
            documents: Arc::new(self.documents.clone()),
            processing: Arc::new(self.processing.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bill, BillField, BillStatus};
    use chrono::NaiveDate;

    fn bill(name: &str) -> Bill {
        Bill::new(
            Uuid::new_v4(),
            name,
            "utilities",
            25.0,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_and_list_in_insertion_order() {
        let service = InMemoryDataService::new();
        let water = service.create(bill("Water")).await.unwrap();
        let power = service.create(bill("Power")).await.unwrap();

        let listed = service.list().await.unwrap();
        assert_eq!(listed.iter().map(|b| b.id).collect::<Vec<_>>(), vec![water.id, power.id]);
    }

    #[tokio::test]
    async fn test_create_duplicate_id_fails() {
        let service = InMemoryDataService::new();
        let water = service.create(bill("Water")).await.unwrap();
        assert!(service.create(water).await.is_err());
    }

    #[tokio::test]
    async fn test_update_missing_row_fails() {
        let service: InMemoryDataService<Bill> = InMemoryDataService::new();
        let orphan = bill("Ghost");
        let err = service.update(&orphan.id, orphan.clone()).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_search_by_field_value() {
        let mut paid = bill("Gas");
        paid.status = BillStatus::Paid;
        let service = InMemoryDataService::with_records(vec![bill("Water"), paid.clone()]);

        let found = service
            .search(BillField::Status, &FieldValue::String("paid".into()))
            .await
            .unwrap();
        assert_eq!(found, vec![paid]);
    }

    #[tokio::test]
    async fn test_delete_many_ignores_missing_ids() {
        let water = bill("Water");
        let power = bill("Power");
        let service = InMemoryDataService::with_records(vec![water.clone(), power.clone()]);

        service
            .delete_many(&[water.id, Uuid::new_v4()])
            .await
            .unwrap();
        assert_eq!(service.len(), 1);
        assert!(service.get(&power.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failing_backend() {
        let service = InMemoryDataService::with_records(vec![bill("Water")]);
        service.set_failing(true);
        assert!(service.list().await.is_err());
        assert!(service.delete_many(&[]).await.is_err());

        service.set_failing(false);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_document_upload_and_list() {
        let store = InMemoryDocumentStore::new();
        let user_id = Uuid::new_v4();
        let doc = store
            .upload(user_id, DocumentKind::Paystub, "june.pdf", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(doc.size, 3);
        assert_eq!(store.contents(&doc.path), Some(vec![1, 2, 3]));
        assert_eq!(store.list(user_id).await.unwrap(), vec![doc]);
        assert!(store.list(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_auth_sign_in_flow() {
        let auth =
            InMemoryAuthProvider::new().with_account("Admin@AutoFloat.io", "s3cret", Role::Admin);
        assert!(auth.current_user().await.unwrap().is_none());
        assert!(auth.sign_in("admin@autofloat.io", "wrong").await.is_err());

        let session = auth.sign_in("admin@autofloat.io", "s3cret").await.unwrap();
        assert!(session.is_admin());
        assert_eq!(auth.current_user().await.unwrap(), Some(session));

        auth.sign_out().await.unwrap();
        assert!(auth.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_auth_sign_up_rejects_duplicates() {
        let auth = InMemoryAuthProvider::new();
        let form = SignUp {
            email: "new@example.com".to_string(),
            password: "pw".to_string(),
            full_name: "New Member".to_string(),
        };
        let session = auth.sign_up(form.clone()).await.unwrap();
        assert_eq!(session.role, Role::Member);
        assert!(auth.sign_up(form).await.is_err());
    }

    #[tokio::test]
    async fn test_gateway_script_then_approve() {
        let gateway = InMemoryProcessingGateway::new();
        gateway.push_outcome(ProcessOutcome::Declined {
            reason: "insufficient funds".to_string(),
        });
        gateway.push_failure("timeout");

        let request = ProcessRequest::VerifyVehicle {
            vehicle_id: Uuid::new_v4(),
        };
        assert!(!gateway.submit(request.clone()).await.unwrap().is_approved());
        assert!(gateway.submit(request.clone()).await.is_err());
        assert!(gateway.submit(request).await.unwrap().is_approved());
        assert_eq!(gateway.submitted().len(), 3);
    }
}
