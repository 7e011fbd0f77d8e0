//! The seven record types managed by the admin console

pub mod macros;

pub mod bank_account;
pub mod bill;
pub mod payment_plan;
pub mod referral;
pub mod subscription;
pub mod user;
pub mod vehicle;

pub use bank_account::{BankAccount, BankAccountField};
pub use bill::{Bill, BillField, BillStatus};
pub use payment_plan::{PaymentPlan, PaymentPlanField, PaymentPlanStatus};
pub use referral::{Referral, ReferralField, ReferralStatus};
pub use subscription::{Subscription, SubscriptionField, SubscriptionStatus, Tier};
pub use user::{UserProfile, UserProfileField};
pub use vehicle::{Vehicle, VehicleField};

/// Status label derived from a `verified` flag
pub fn verification_label(verified: bool) -> &'static str {
    if verified { "verified" } else { "pending" }
}
