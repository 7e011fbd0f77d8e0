//! One admin table bound to its backend table

use crate::config::ConsoleConfig;
use crate::console::confirm::{ConfirmDialog, Confirmed};
use crate::core::entity::Record;
use crate::core::error::{BackendError, ConfigError, ConsoleError, EntityError, ExportError};
use crate::core::events::NoticeBus;
use crate::core::service::DataService;
use crate::core::validation::Validate;
use crate::engine::export::CsvExport;
use crate::engine::view::TableView;
use std::sync::Arc;

/// An entity tab: the table view of one record type plus its data service
///
/// Every mutating operation refetches the collection afterwards, so the
/// view always reflects the backend rather than a local guess.
pub struct EntityTab<T: Record> {
    service: Arc<dyn DataService<T>>,
    view: TableView<T>,
}

impl<T: Record> EntityTab<T> {
    pub fn new(service: Arc<dyn DataService<T>>, view: TableView<T>) -> Self {
        Self { service, view }
    }

    /// Build a tab with page size, search fields and default sort from config
    pub fn configured(
        service: Arc<dyn DataService<T>>,
        config: &ConsoleConfig,
    ) -> Result<Self, ConfigError> {
        let mut view = TableView::new(config.page_size())
            .with_search_fields(config.resolve_search_fields::<T>()?);
        view.set_sort(config.resolve_default_sort::<T>()?);
        Ok(Self::new(service, view))
    }

    pub fn view(&self) -> &TableView<T> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut TableView<T> {
        &mut self.view
    }

    /// Loaded record by id
    pub fn record(&self, id: &T::Id) -> Option<&T> {
        self.view.records().iter().find(|record| &record.id() == id)
    }

    // === Loading ===

    /// Fetch the whole table without touching the view
    pub async fn fetch(&self) -> Result<Vec<T>, BackendError> {
        self.service
            .list()
            .await
            .map_err(|e| BackendError::operation_failed(T::resource_name(), "load", e))
    }

    /// Replace the view's records with a fetch result
    pub fn apply_fetch(&mut self, records: Vec<T>) -> usize {
        let count = records.len();
        self.view.set_records(records);
        tracing::debug!(entity = T::resource_name(), count, "records loaded");
        count
    }

    /// Refetch the table; on failure the view keeps its previous records
    pub async fn refresh(&mut self, notices: &NoticeBus) -> Result<usize, ConsoleError> {
        match self.fetch().await {
            Ok(records) => Ok(self.apply_fetch(records)),
            Err(e) => {
                notices.error(format!("Failed to load {}", T::resource_name()));
                Err(e.into())
            }
        }
    }

    /// Refetch after a successful write; a failed refetch is reported on its
    /// own and does not turn the write into an error
    async fn refetch_after_write(&mut self, notices: &NoticeBus) {
        if let Err(e) = self.refresh(notices).await {
            tracing::warn!(entity = T::resource_name(), error = %e, "refetch after write failed");
        }
    }

    // === Delete ===

    /// Ask for confirmation before deleting one record
    pub fn request_delete(&self, id: &T::Id) -> Result<ConfirmDialog<T::Id>, EntityError> {
        let record = self.record(id).ok_or_else(|| EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id: id.to_string(),
        })?;

        Ok(ConfirmDialog::new(
            T::resource_name(),
            vec![id.clone()],
            format!(
                "This will permanently delete {}. This action cannot be undone.",
                record.label()
            ),
        ))
    }

    /// Ask for confirmation before deleting every selected record
    ///
    /// Returns `None` when nothing is selected.
    pub fn request_bulk_delete(&self) -> Option<ConfirmDialog<T::Id>> {
        let ids = self.view.selected_ids();
        if ids.is_empty() {
            return None;
        }

        let description = format!(
            "This will permanently delete {} {}. This action cannot be undone.",
            ids.len(),
            if ids.len() == 1 {
                T::resource_name_singular()
            } else {
                T::resource_name()
            }
        );
        Some(ConfirmDialog::new(T::resource_name(), ids, description))
    }

    /// Execute a confirmed delete, then refetch
    ///
    /// A single id uses `delete`; several ids go out as one `delete_many`
    /// batch. A confirmation issued by another tab is refused before any
    /// backend call. On failure nothing is assumed deleted and the
    /// selection is kept; on success the deleted ids leave the selection.
    pub async fn delete(
        &mut self,
        confirmed: Confirmed<T::Id>,
        notices: &NoticeBus,
    ) -> Result<usize, ConsoleError> {
        if confirmed.resource() != T::resource_name() {
            tracing::warn!(
                entity = T::resource_name(),
                confirmed_for = confirmed.resource(),
                "confirmation belongs to another tab"
            );
            return Err(ConsoleError::ConfirmationMismatch {
                expected: T::resource_name(),
                actual: confirmed.resource(),
            });
        }

        let ids = confirmed.into_ids();
        let count = ids.len();

        let result = match ids.as_slice() {
            [] => return Ok(0),
            [id] => self.service.delete(id).await,
            many => self.service.delete_many(many).await,
        };

        if let Err(e) = result {
            tracing::warn!(entity = T::resource_name(), count, error = %e, "delete failed");
            notices.error(format!("Failed to delete {}", T::resource_name()));
            return Err(BackendError::operation_failed(T::resource_name(), "delete", e).into());
        }

        tracing::info!(entity = T::resource_name(), count, "records deleted");
        self.view.deselect(&ids);
        notices.success(if count == 1 {
            format!("Deleted 1 {}", T::resource_name_singular())
        } else {
            format!("Deleted {} {}", count, T::resource_name())
        });

        self.refetch_after_write(notices).await;
        Ok(count)
    }

    // === Export ===

    /// CSV of the full collection, or `None` with an info notice when empty
    pub fn export(&self, notices: &NoticeBus) -> Option<CsvExport> {
        match self.view.export_csv() {
            Ok(export) => {
                tracing::info!(entity = T::resource_name(), rows = export.rows, "exported");
                notices.success(format!("Exported {} {}", export.rows, T::resource_name()));
                Some(export)
            }
            Err(ExportError::Empty { entity_type }) => {
                notices.info(format!("No {} to export", entity_type));
                None
            }
        }
    }

    // === Writes ===

    /// Write an already checked record back, then refetch
    pub(crate) async fn save(&mut self, record: T, notices: &NoticeBus) -> Result<T, ConsoleError> {
        let id = record.id();
        let saved = self.service.update(&id, record).await.map_err(|e| {
            notices.error(format!("Failed to update {}", T::resource_name_singular()));
            BackendError::operation_failed(T::resource_name(), "update", e)
        })?;

        self.refetch_after_write(notices).await;
        Ok(saved)
    }

    /// Load one record from the backend
    pub async fn fetch_one(&self, id: &T::Id) -> Result<T, ConsoleError> {
        let record = self
            .service
            .get(id)
            .await
            .map_err(|e| BackendError::operation_failed(T::resource_name(), "load", e))?;

        record.ok_or_else(|| {
            EntityError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id: id.to_string(),
            }
            .into()
        })
    }
}

impl<T: Record + Validate> EntityTab<T> {
    /// Validate and insert a new record, then refetch
    ///
    /// Validation failures return before any backend call.
    pub async fn insert(&mut self, record: T, notices: &NoticeBus) -> Result<T, ConsoleError> {
        let record = record.validated()?;

        let created = self.service.create(record).await.map_err(|e| {
            notices.error(format!("Failed to create {}", T::resource_name_singular()));
            BackendError::operation_failed(T::resource_name(), "create", e)
        })?;

        tracing::info!(entity = T::resource_name(), id = %created.id(), "record created");
        notices.success(format!("Created {}", T::resource_name_singular()));

        self.refetch_after_write(notices).await;
        Ok(created)
    }

    /// Validate and write back an edited record, then refetch
    pub async fn update(&mut self, record: T, notices: &NoticeBus) -> Result<T, ConsoleError> {
        let record = record.validated()?;
        let saved = self.save(record, notices).await?;

        tracing::info!(entity = T::resource_name(), id = %saved.id(), "record updated");
        notices.success(format!("Updated {}", T::resource_name_singular()));
        Ok(saved)
    }
}
