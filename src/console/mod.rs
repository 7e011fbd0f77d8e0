//! The admin back-office
//!
//! [`AdminConsole`] owns one [`EntityTab`] per record type. Tabs are
//! independent: switching the active tab never touches another tab's
//! query, page, sort or selection.

pub mod confirm;
pub mod tab;

pub use confirm::{ConfirmDialog, Confirmed};
pub use tab::EntityTab;

use crate::config::ConsoleConfig;
use crate::core::auth::{AuthPolicy, AuthProvider, Session};
use crate::core::entity::Record;
use crate::core::error::{BackendError, ConsoleError, ProcessingError};
use crate::core::events::NoticeBus;
use crate::core::processing::{ProcessOutcome, ProcessRequest, ProcessingGateway};
use crate::core::service::{DataService, DocumentKind, DocumentRef, DocumentStore};
use crate::engine::export::CsvExport;
use crate::entities::{
    BankAccount, Bill, BillStatus, PaymentPlan, Referral, Subscription, UserProfile, Vehicle,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Handles to every backend collaborator the console talks to
#[derive(Clone)]
pub struct Backend {
    pub users: Arc<dyn DataService<UserProfile>>,
    pub bills: Arc<dyn DataService<Bill>>,
    pub vehicles: Arc<dyn DataService<Vehicle>>,
    pub subscriptions: Arc<dyn DataService<Subscription>>,
    pub payment_plans: Arc<dyn DataService<PaymentPlan>>,
    pub bank_accounts: Arc<dyn DataService<BankAccount>>,
    pub referrals: Arc<dyn DataService<Referral>>,
    pub documents: Arc<dyn DocumentStore>,
    pub processing: Arc<dyn ProcessingGateway>,
}

/// The admin tabs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TabKind {
    #[default]
    Users,
    Bills,
    Vehicles,
    Subscriptions,
    PaymentPlans,
    BankAccounts,
    Referrals,
}

impl TabKind {
    pub const ALL: [TabKind; 7] = [
        TabKind::Users,
        TabKind::Bills,
        TabKind::Vehicles,
        TabKind::Subscriptions,
        TabKind::PaymentPlans,
        TabKind::BankAccounts,
        TabKind::Referrals,
    ];

    /// Backend table shown by the tab
    pub fn resource_name(&self) -> &'static str {
        match self {
            TabKind::Users => UserProfile::resource_name(),
            TabKind::Bills => Bill::resource_name(),
            TabKind::Vehicles => Vehicle::resource_name(),
            TabKind::Subscriptions => Subscription::resource_name(),
            TabKind::PaymentPlans => PaymentPlan::resource_name(),
            TabKind::BankAccounts => BankAccount::resource_name(),
            TabKind::Referrals => Referral::resource_name(),
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource_name())
    }
}

/// Outcome of [`AdminConsole::load_all`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Tabs that loaded, with their row counts
    pub loaded: Vec<(TabKind, usize)>,
    /// Tabs whose fetch failed and kept their previous rows
    pub failed: Vec<TabKind>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn count(&self, kind: TabKind) -> Option<usize> {
        self.loaded
            .iter()
            .find(|(loaded, _)| *loaded == kind)
            .map(|(_, count)| *count)
    }
}

/// Run the same generic expression against the tab selected by a `TabKind`
macro_rules! with_tab {
    ($console:expr, $kind:expr, |$tab:ident| $body:expr) => {
        match $kind {
            TabKind::Users => {
                let $tab = &mut $console.users;
                $body
            }
            TabKind::Bills => {
                let $tab = &mut $console.bills;
                $body
            }
            TabKind::Vehicles => {
                let $tab = &mut $console.vehicles;
                $body
            }
            TabKind::Subscriptions => {
                let $tab = &mut $console.subscriptions;
                $body
            }
            TabKind::PaymentPlans => {
                let $tab = &mut $console.payment_plans;
                $body
            }
            TabKind::BankAccounts => {
                let $tab = &mut $console.bank_accounts;
                $body
            }
            TabKind::Referrals => {
                let $tab = &mut $console.referrals;
                $body
            }
        }
    };
}

/// The admin back-office session
pub struct AdminConsole {
    session: Session,
    notices: NoticeBus,
    documents: Arc<dyn DocumentStore>,
    processing: Arc<dyn ProcessingGateway>,
    active: TabKind,

    pub users: EntityTab<UserProfile>,
    pub bills: EntityTab<Bill>,
    pub vehicles: EntityTab<Vehicle>,
    pub subscriptions: EntityTab<Subscription>,
    pub payment_plans: EntityTab<PaymentPlan>,
    pub bank_accounts: EntityTab<BankAccount>,
    pub referrals: EntityTab<Referral>,
}

impl AdminConsole {
    /// Open the console for the current session
    ///
    /// Requires a signed-in administrator. Tabs start empty; call
    /// [`AdminConsole::load_all`] to populate them.
    pub async fn open(
        auth: &dyn AuthProvider,
        backend: Backend,
        config: &ConsoleConfig,
    ) -> Result<Self, ConsoleError> {
        config.validate()?;

        let session = auth
            .current_user()
            .await
            .map_err(|e| BackendError::operation_failed("session", "load", e))?;

        if !AuthPolicy::AdminOnly.check(session.as_ref()) {
            tracing::warn!(
                email = session.as_ref().map(|s| s.email.as_str()),
                "console access denied"
            );
            return Err(ConsoleError::Unauthorized);
        }
        let session = session.ok_or(ConsoleError::Unauthorized)?;

        tracing::info!(email = %session.email, "admin console opened");

        Ok(Self {
            session,
            notices: NoticeBus::new(config.notice_capacity()),
            documents: backend.documents,
            processing: backend.processing,
            active: TabKind::default(),
            users: EntityTab::configured(backend.users, config)?,
            bills: EntityTab::configured(backend.bills, config)?,
            vehicles: EntityTab::configured(backend.vehicles, config)?,
            subscriptions: EntityTab::configured(backend.subscriptions, config)?,
            payment_plans: EntityTab::configured(backend.payment_plans, config)?,
            bank_accounts: EntityTab::configured(backend.bank_accounts, config)?,
            referrals: EntityTab::configured(backend.referrals, config)?,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn notices(&self) -> &NoticeBus {
        &self.notices
    }

    pub fn active(&self) -> TabKind {
        self.active
    }

    /// Switch the visible tab; every tab keeps its own view state
    pub fn set_active(&mut self, kind: TabKind) {
        self.active = kind;
    }

    /// Fetch every table concurrently
    ///
    /// Each successful fetch replaces its tab's rows. A failed fetch leaves
    /// that tab unchanged and raises one error notice; the others still
    /// load.
    pub async fn load_all(&mut self) -> LoadReport {
        let (users, bills, vehicles, subscriptions, payment_plans, bank_accounts, referrals) =
            tokio::join!(
                self.users.fetch(),
                self.bills.fetch(),
                self.vehicles.fetch(),
                self.subscriptions.fetch(),
                self.payment_plans.fetch(),
                self.bank_accounts.fetch(),
                self.referrals.fetch()
            );

        let mut report = LoadReport::default();
        let notices = &self.notices;
        apply_load(&mut self.users, TabKind::Users, users, &mut report, notices);
        apply_load(&mut self.bills, TabKind::Bills, bills, &mut report, notices);
        apply_load(&mut self.vehicles, TabKind::Vehicles, vehicles, &mut report, notices);
        apply_load(
            &mut self.subscriptions,
            TabKind::Subscriptions,
            subscriptions,
            &mut report,
            notices,
        );
        apply_load(
            &mut self.payment_plans,
            TabKind::PaymentPlans,
            payment_plans,
            &mut report,
            notices,
        );
        apply_load(
            &mut self.bank_accounts,
            TabKind::BankAccounts,
            bank_accounts,
            &mut report,
            notices,
        );
        apply_load(&mut self.referrals, TabKind::Referrals, referrals, &mut report, notices);

        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "console data loaded"
        );
        report
    }

    /// Refetch one tab
    pub async fn refresh(&mut self, kind: TabKind) -> Result<usize, ConsoleError> {
        let notices = &self.notices;
        with_tab!(self, kind, |tab| tab.refresh(notices).await)
    }

    /// Confirmation dialog for the selected rows of a tab
    pub fn request_bulk_delete(&self, kind: TabKind) -> Option<ConfirmDialog<Uuid>> {
        match kind {
            TabKind::Users => self.users.request_bulk_delete(),
            TabKind::Bills => self.bills.request_bulk_delete(),
            TabKind::Vehicles => self.vehicles.request_bulk_delete(),
            TabKind::Subscriptions => self.subscriptions.request_bulk_delete(),
            TabKind::PaymentPlans => self.payment_plans.request_bulk_delete(),
            TabKind::BankAccounts => self.bank_accounts.request_bulk_delete(),
            TabKind::Referrals => self.referrals.request_bulk_delete(),
        }
    }

    /// Execute a confirmed delete on a tab
    pub async fn delete(
        &mut self,
        kind: TabKind,
        confirmed: Confirmed<Uuid>,
    ) -> Result<usize, ConsoleError> {
        let notices = &self.notices;
        with_tab!(self, kind, |tab| tab.delete(confirmed, notices).await)
    }

    /// CSV of a tab's full collection
    pub fn export(&mut self, kind: TabKind) -> Option<CsvExport> {
        let notices = &self.notices;
        with_tab!(self, kind, |tab| tab.export(notices))
    }

    /// Submit an external processing request and apply its result
    ///
    /// An approved request patches the target record (verified flag or
    /// paid status) and refetches its tab. A declined or failed request
    /// raises an error notice and leaves the record unchanged.
    pub async fn process(
        &mut self,
        request: ProcessRequest,
    ) -> Result<ProcessOutcome, ConsoleError> {
        tracing::info!(kind = request.kind(), target = %request.target_id(), "processing request");

        let outcome = match self.processing.submit(request.clone()).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.notices.error(format!("Could not reach processor: {}", e));
                return Err(ProcessingError::Failed {
                    message: e.to_string(),
                }
                .into());
            }
        };

        if let ProcessOutcome::Declined { reason } = &outcome {
            self.notices.error(format!("Request declined: {}", reason));
            return Err(ProcessingError::Declined {
                reason: reason.clone(),
            }
            .into());
        }

        let notices = &self.notices;
        match request {
            ProcessRequest::VerifyBankAccount { account_id } => {
                let mut account = self.bank_accounts.fetch_one(&account_id).await?;
                account.verified = true;
                self.bank_accounts.save(account, notices).await?;
                notices.success("Bank account verified");
            }
            ProcessRequest::VerifyVehicle { vehicle_id } => {
                let mut vehicle = self.vehicles.fetch_one(&vehicle_id).await?;
                vehicle.verified = true;
                self.vehicles.save(vehicle, notices).await?;
                notices.success("Vehicle verified");
            }
            ProcessRequest::PayBill { bill_id, .. } => {
                let mut bill = self.bills.fetch_one(&bill_id).await?;
                bill.status = BillStatus::Paid;
                self.bills.save(bill, notices).await?;
                notices.success("Bill paid");
            }
        }

        Ok(outcome)
    }

    /// Upload an onboarding document for a user
    pub async fn upload_document(
        &self,
        user_id: Uuid,
        kind: DocumentKind,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<DocumentRef, ConsoleError> {
        let document = self
            .documents
            .upload(user_id, kind, file_name, bytes)
            .await
            .map_err(|e| {
                self.notices.error(format!("Failed to upload {}", kind));
                BackendError::operation_failed("documents", "upload", e)
            })?;

        tracing::info!(path = %document.path, size = document.size, "document uploaded");
        Ok(document)
    }

    /// Documents uploaded by a user
    pub async fn user_documents(&self, user_id: Uuid) -> Result<Vec<DocumentRef>, ConsoleError> {
        self.documents
            .list(user_id)
            .await
            .map_err(|e| BackendError::operation_failed("documents", "list", e).into())
    }
}

fn apply_load<T: Record>(
    tab: &mut EntityTab<T>,
    kind: TabKind,
    result: Result<Vec<T>, BackendError>,
    report: &mut LoadReport,
    notices: &NoticeBus,
) {
    match result {
        Ok(records) => {
            let count = tab.apply_fetch(records);
            report.loaded.push((kind, count));
        }
        Err(e) => {
            tracing::warn!(entity = kind.resource_name(), error = %e, "load failed");
            notices.error(format!("Failed to load {}", kind));
            report.failed.push(kind);
        }
    }
}
