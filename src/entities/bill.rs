//! Bills covered by a subscription

use crate::core::validation::{EntityValidationConfig, Validate, filters, validators};
use crate::{impl_record, status_enum};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

status_enum!(
    /// Lifecycle of a bill
    BillStatus {
        Pending => "pending",
        Paid => "paid",
        Overdue => "overdue",
        Cancelled => "cancelled",
    }
);

impl_record!(
    /// A recurring bill the service pays on the user's behalf
    Bill, "bills", "bill", BillField,
    {
        id: Uuid => Id,
        user_id: Uuid => UserId,
        name: String => Name,
        category: String => Category,
        amount: f64 => Amount,
        due_date: NaiveDate => DueDate,
        status: BillStatus => Status,
        created_at: DateTime<Utc> => CreatedAt,
    },
    search: [Name, Category, Status],
    date: CreatedAt,
    status: |bill| bill.status.as_str()
);

impl Bill {
    pub fn new(
        user_id: Uuid,
        name: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            category: category.into(),
            amount,
            due_date,
            status: BillStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// A bill past its due date that is still unpaid
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        matches!(self.status, BillStatus::Pending | BillStatus::Overdue) && self.due_date < today
    }
}

impl Validate for Bill {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new("bill")
            .filter("name", filters::trim())
            .filter("category", filters::trim())
            .filter("category", filters::lowercase())
            .filter("amount", filters::round_decimals(2))
            .validate("name", validators::required())
            .validate("name", validators::string_length(1, 120))
            .validate("category", validators::required())
            .validate("amount", validators::positive())
            .validate("due_date", validators::date_format("%Y-%m-%d"))
    }
}
