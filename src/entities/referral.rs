//! Referral codes and their rewards

use crate::core::field::FieldFormat;
use crate::core::validation::{EntityValidationConfig, Validate, filters, validators};
use crate::{impl_record, status_enum};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

status_enum!(
    ReferralStatus {
        Pending => "pending",
        Completed => "completed",
        Rewarded => "rewarded",
    }
);

impl_record!(
    /// An invitation sent by an existing member
    Referral, "referrals", "referral", ReferralField,
    {
        id: Uuid => Id,
        referrer_id: Uuid => ReferrerId,
        referral_code: String => ReferralCode,
        referred_email: String => ReferredEmail,
        status: ReferralStatus => Status,
        reward_amount: f64 => RewardAmount,
        created_at: DateTime<Utc> => CreatedAt,
    },
    search: [ReferralCode, ReferredEmail],
    date: CreatedAt,
    status: |referral| referral.status.as_str()
);

impl Referral {
    pub fn new(
        referrer_id: Uuid,
        referral_code: impl Into<String>,
        referred_email: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            referrer_id,
            referral_code: referral_code.into(),
            referred_email: referred_email.into(),
            status: ReferralStatus::Pending,
            reward_amount: 0.0,
            created_at: Utc::now(),
        }
    }
}

fn code_format() -> FieldFormat {
    static CODE_REGEX: OnceLock<Regex> = OnceLock::new();
    FieldFormat::Custom(
        CODE_REGEX
            .get_or_init(|| Regex::new(r"^[A-Z0-9]{6,12}$").unwrap())
            .clone(),
    )
}

impl Validate for Referral {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new("referral")
            .filter("referral_code", filters::trim())
            .filter("referral_code", filters::uppercase())
            .filter("referred_email", filters::trim())
            .filter("referred_email", filters::lowercase())
            .filter("reward_amount", filters::round_decimals(2))
            .validate("referral_code", validators::required())
            .validate("referral_code", validators::format(code_format()))
            .validate("referred_email", validators::required())
            .validate("referred_email", validators::format(FieldFormat::Email))
            .validate("reward_amount", validators::non_negative())
    }
}
