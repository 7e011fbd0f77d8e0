//! Configuration loading and management

use crate::core::entity::{FieldKey, Record};
use crate::core::error::ConfigError;
use crate::core::events::DEFAULT_NOTICE_CAPACITY;
use crate::core::query::{DEFAULT_PAGE_SIZE, SortDirective};
use crate::entities::{
    BankAccount, Bill, PaymentPlan, Referral, Subscription, UserProfile, Vehicle,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-tab configuration, keyed by resource name in [`ConsoleConfig::tabs`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabConfig {
    /// Column names searched by the free-text box (empty keeps the record
    /// type's defaults)
    pub search_fields: Vec<String>,

    /// Sort applied when the tab opens, e.g. `due_date:asc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_sort: Option<String>,
}

impl TabConfig {
    /// Tab configuration listing a record type's default search fields
    pub fn for_record<T: Record>() -> Self {
        Self {
            search_fields: T::search_fields()
                .iter()
                .map(|field| field.name().to_string())
                .collect(),
            default_sort: None,
        }
    }
}

/// Complete configuration for the admin console
///
/// # Example
/// ```yaml
/// page_size: 10
/// notice_capacity: 256
/// tabs:
///   bills:
///     search_fields: [name, category]
///     default_sort: due_date:asc
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Rows per table page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    /// Buffered notices per subscriber before the oldest are dropped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_capacity: Option<usize>,

    /// Tab settings by resource name (e.g. "bills")
    pub tabs: IndexMap<String, TabConfig>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: None,
            notice_capacity: None,
            tabs: IndexMap::new(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == Some(0) {
            return Err(ConfigError::InvalidPageSize(0));
        }
        Ok(())
    }

    /// Rows per table page, [`DEFAULT_PAGE_SIZE`] when unset
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Notice buffer per subscriber, [`DEFAULT_NOTICE_CAPACITY`] when unset
    pub fn notice_capacity(&self) -> usize {
        self.notice_capacity.unwrap_or(DEFAULT_NOTICE_CAPACITY)
    }

    /// Merge configurations; later ones win
    ///
    /// A scalar comes from the last configuration that sets it; omitted
    /// keys never override. Tabs are merged by resource name, a later entry
    /// replacing an earlier one entirely.
    pub fn merge(configs: Vec<ConsoleConfig>) -> Self {
        let mut merged = Self::default();
        for config in configs {
            merged.page_size = config.page_size.or(merged.page_size);
            merged.notice_capacity = config.notice_capacity.or(merged.notice_capacity);
            merged.tabs.extend(config.tabs);
        }
        merged
    }

    /// Settings of one tab, if configured
    pub fn tab(&self, resource: &str) -> Option<&TabConfig> {
        self.tabs.get(resource)
    }

    /// Typed search fields for a record type
    ///
    /// Falls back to the record's defaults when the tab is absent or lists
    /// no fields. Unknown names are an error rather than silently ignored.
    pub fn resolve_search_fields<T: Record>(&self) -> Result<Vec<T::Field>, ConfigError> {
        let names = match self.tab(T::resource_name()) {
            Some(tab) if !tab.search_fields.is_empty() => &tab.search_fields,
            _ => return Ok(T::search_fields().to_vec()),
        };

        names
            .iter()
            .map(|name| {
                T::Field::from_name(name).ok_or_else(|| ConfigError::UnknownField {
                    resource: T::resource_name().to_string(),
                    field: name.clone(),
                })
            })
            .collect()
    }

    /// Typed default sort for a record type
    pub fn resolve_default_sort<T: Record>(
        &self,
    ) -> Result<Option<SortDirective<T::Field>>, ConfigError> {
        let Some(expr) = self
            .tab(T::resource_name())
            .and_then(|tab| tab.default_sort.as_deref())
        else {
            return Ok(None);
        };

        SortDirective::parse(expr)
            .map(Some)
            .ok_or_else(|| ConfigError::InvalidSort {
                resource: T::resource_name().to_string(),
                expr: expr.to_string(),
            })
    }

    /// Create a default configuration listing every tab with its defaults
    pub fn default_config() -> Self {
        let mut config = Self::default();
        for (resource, tab) in [
            (UserProfile::resource_name(), TabConfig::for_record::<UserProfile>()),
            (Bill::resource_name(), TabConfig::for_record::<Bill>()),
            (Vehicle::resource_name(), TabConfig::for_record::<Vehicle>()),
            (Subscription::resource_name(), TabConfig::for_record::<Subscription>()),
            (PaymentPlan::resource_name(), TabConfig::for_record::<PaymentPlan>()),
            (BankAccount::resource_name(), TabConfig::for_record::<BankAccount>()),
            (Referral::resource_name(), TabConfig::for_record::<Referral>()),
        ] {
            config.tabs.insert(resource.to_string(), tab);
        }
        config
    }
}
