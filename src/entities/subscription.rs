//! Subscriptions and their coverage tiers

use crate::core::validation::{EntityValidationConfig, Validate, filters, validators};
use crate::{impl_record, status_enum};
use chrono::{DateTime, Utc};
use uuid::Uuid;

status_enum!(
    /// Subscription plan level
    Tier {
        Basic => "basic",
        Plus => "plus",
        AutoPlus => "auto_plus",
    }
);

impl Tier {
    /// Spending allowance granted by the tier
    pub fn access_limit(&self) -> f64 {
        match self {
            Tier::Basic => 500.0,
            Tier::Plus => 1000.0,
            Tier::AutoPlus => 1500.0,
        }
    }
}

status_enum!(
    SubscriptionStatus {
        Active => "active",
        Paused => "paused",
        Cancelled => "cancelled",
    }
);

impl_record!(
    /// A user's coverage plan
    Subscription, "subscriptions", "subscription", SubscriptionField,
    {
        id: Uuid => Id,
        user_id: Uuid => UserId,
        tier: Tier => Tier,
        status: SubscriptionStatus => Status,
        access_limit: f64 => AccessLimit,
        access_used: f64 => AccessUsed,
        created_at: DateTime<Utc> => CreatedAt,
    },
    search: [Tier, Status],
    date: CreatedAt,
    status: |subscription| subscription.status.as_str()
);

impl Subscription {
    pub fn new(user_id: Uuid, tier: Tier) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            tier,
            status: SubscriptionStatus::Active,
            access_limit: tier.access_limit(),
            access_used: 0.0,
            created_at: Utc::now(),
        }
    }

    /// Allowance left this period, never negative
    pub fn remaining(&self) -> f64 {
        (self.access_limit - self.access_used).max(0.0)
    }

    /// Move to another tier; the stored limit follows the tier
    pub fn change_tier(&mut self, tier: Tier) {
        self.tier = tier;
        self.access_limit = tier.access_limit();
    }
}

impl Validate for Subscription {
    fn validation_config() -> EntityValidationConfig {
        EntityValidationConfig::new("subscription")
            .filter("access_used", filters::round_decimals(2))
            .validate("access_limit", validators::positive())
            .validate("access_used", validators::non_negative())
    }
}
