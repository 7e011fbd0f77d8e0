//! Installment plans for large bills

use crate::core::validation::{EntityValidationConfig, Validate, filters, validators};
use crate::{impl_record, status_enum};
use chrono::{DateTime, Utc};
use uuid::Uuid;

status_enum!(
    PaymentPlanStatus {
        Active => "active",
        Completed => "completed",
        Defaulted => "defaulted",
    }
);

impl_record!(
    /// A bill split into equal installments
    PaymentPlan, "payment_plans", "payment plan", PaymentPlanField,
    {
        id: Uuid => Id,
        user_id: Uuid => UserId,
        bill_id: Uuid => BillId,
        total_amount: f64 => TotalAmount,
        installment_count: i32 => InstallmentCount,
        installments_paid: i32 => InstallmentsPaid,
        status: PaymentPlanStatus => Status,
        created_at: DateTime<Utc> => CreatedAt,
    },
    search: [Status],
    date: CreatedAt,
    status: |plan| plan.status.as_str()
);

impl PaymentPlan {
    pub fn new(user_id: Uuid, bill_id: Uuid, total_amount: f64, installment_count: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            bill_id,
            total_amount,
            installment_count,
            installments_paid: 0,
            status: PaymentPlanStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// Amount of one installment, rounded to cents
    pub fn installment_amount(&self) -> f64 {
        if self.installment_count <= 0 {
            return self.total_amount;
        }
        (self.total_amount / f64::from(self.installment_count) * 100.0).round() / 100.0
    }

    pub fn remaining_installments(&self) -> i32 {
        (self.installment_count - self.installments_paid).max(0)
    }
}

impl Validate for PaymentPlan {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new("payment plan")
            .filter("total_amount", filters::round_decimals(2))
            .validate("total_amount", validators::positive())
            .validate("installment_count", validators::range(1.0, 24.0))
            .validate("installments_paid", validators::non_negative())
    }
}
