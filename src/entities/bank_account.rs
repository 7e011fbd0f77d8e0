//! Connected bank accounts

use crate::core::field::FieldFormat;
use crate::core::validation::{EntityValidationConfig, Validate, filters, validators};
use crate::entities::verification_label;
use crate::impl_record;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

/// Account types accepted for settlement
pub const ACCOUNT_TYPES: &[&str] = &["checking", "savings"];

impl_record!(
    /// A bank account used for automatic settlement
    BankAccount, "bank_accounts", "bank account", BankAccountField,
    {
        id: Uuid => Id,
        user_id: Uuid => UserId,
        bank_name: String => BankName,
        account_type: String => AccountType,
        /// Last four digits of the account number
        account_last4: String => AccountLast4,
        verified: bool => Verified,
        /// Next automatic balance clearing, once scheduled
        next_settlement: Option<NaiveDate> => NextSettlement,
        created_at: DateTime<Utc> => CreatedAt,
    },
    search: [BankName, AccountType],
    date: CreatedAt,
    status: |account| verification_label(account.verified)
);

impl BankAccount {
    pub fn new(
        user_id: Uuid,
        bank_name: impl Into<String>,
        account_type: impl Into<String>,
        account_last4: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            bank_name: bank_name.into(),
            account_type: account_type.into(),
            account_last4: account_last4.into(),
            verified: false,
            next_settlement: None,
            created_at: Utc::now(),
        }
    }
}

fn last4_format() -> FieldFormat {
    static LAST4_REGEX: OnceLock<Regex> = OnceLock::new();
    FieldFormat::Custom(
        LAST4_REGEX
            .get_or_init(|| Regex::new(r"^[0-9]{4}$").unwrap())
            .clone(),
    )
}

impl Validate for BankAccount {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new("bank account")
            .filter("bank_name", filters::trim())
            .filter("account_type", filters::trim())
            .filter("account_type", filters::lowercase())
            .filter("account_last4", filters::trim())
            .validate("bank_name", validators::required())
            .validate("account_type", validators::in_list(ACCOUNT_TYPES))
            .validate("account_last4", validators::required())
            .validate("account_last4", validators::format(last4_format()))
            .validate("next_settlement", validators::date_format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Record;

    #[test]
    fn test_valid_account() {
        let account = BankAccount::new(Uuid::new_v4(), " Chase ", "Checking", "0042")
            .validated()
            .unwrap();
        assert_eq!(account.bank_name, "Chase");
        assert_eq!(account.account_type, "checking");
        assert_eq!(account.status().as_deref(), Some("pending"));
    }

    #[test]
    fn test_invalid_type_and_digits() {
        let err = BankAccount::new(Uuid::new_v4(), "Chase", "brokerage", "42a")
            .validated()
            .unwrap_err();
        assert!(err.has_field("account_type"));
        assert!(err.has_field("account_last4"));
        assert!(!err.has_field("bank_name"));
    }
}
