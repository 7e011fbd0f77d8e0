//! User profiles

use crate::core::field::FieldFormat;
use crate::core::validation::{EntityValidationConfig, Validate, filters, validators};
use crate::entities::verification_label;
use crate::impl_record;
use chrono::{DateTime, Utc};
use uuid::Uuid;

impl_record!(
    /// Profile row of a registered user
    UserProfile, "profiles", "user", UserProfileField,
    {
        id: Uuid => Id,
        full_name: String => FullName,
        email: String => Email,
        phone: Option<String> => Phone,
        /// Identity documents have been reviewed
        verified: bool => Verified,
        is_admin: bool => IsAdmin,
        created_at: DateTime<Utc> => CreatedAt,
    },
    search: [FullName, Email, Phone],
    date: CreatedAt,
    status: |user| verification_label(user.verified)
);

impl UserProfile {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            full_name: full_name.into(),
            email: email.into(),
            phone: None,
            verified: false,
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl Validate for UserProfile {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new("user")
            .filter("full_name", filters::trim())
            .filter("email", filters::trim())
            .filter("email", filters::lowercase())
            .filter("phone", filters::trim())
            .validate("full_name", validators::required())
            .validate("full_name", validators::string_length(2, 100))
            .validate("email", validators::required())
            .validate("email", validators::format(FieldFormat::Email))
            .validate("phone", validators::format(FieldFormat::Phone))
    }
}
