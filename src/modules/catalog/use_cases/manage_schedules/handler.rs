use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::modules::catalog::core::errors::CatalogError;
use crate::modules::catalog::core::schedule_group::{
    ScheduleGroupForm, ScheduleRow, ScheduleTableFilter, build_records,
};
use crate::modules::catalog::use_cases::manage_schedules::repository_port::ScheduleRepository;
use crate::shared::core::time_label::parse_time_slot;

/// Admin schedules table. Every write is followed by a full reload.
pub struct SchedulePanel {
    repository: Arc<dyn ScheduleRepository>,
    default_capacity: u32,
    rows: RwLock<Vec<ScheduleRow>>,
}

impl SchedulePanel {
    pub fn new(repository: Arc<dyn ScheduleRepository>, default_capacity: u32) -> Self {
        Self {
            repository,
            default_capacity,
            rows: RwLock::new(Vec::new()),
        }
    }

    pub async fn reload(&self) -> Result<(), CatalogError> {
        let mut rows = self.repository.list().await.map_err(|err| {
            error!(error = %err, "loading schedules failed");
            CatalogError::Load(format!("schedules: {err}"))
        })?;
        rows.sort_by(|a, b| {
            (a.record.grade, &a.record.group_name, parse_time_slot(&a.record.time_slot))
                .cmp(&(b.record.grade, &b.record.group_name, parse_time_slot(&b.record.time_slot)))
        });
        *self.rows.write().await = rows;
        Ok(())
    }

    pub async fn rows(&self, filter: &ScheduleTableFilter) -> Vec<ScheduleRow> {
        self.rows
            .read()
            .await
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect()
    }

    /// Group names of the loaded schedules, for the table's group filter.
    pub async fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .rows
            .read()
            .await
            .iter()
            .map(|row| row.record.group_name.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Saves one record per time slot, replacing the edited group when there is one.
    pub async fn save_group(&self, form: &ScheduleGroupForm) -> Result<usize, CatalogError> {
        let records = build_records(form, self.default_capacity)?;
        let count = records.len();
        self.repository
            .save_group(records, form.replacing.as_ref())
            .await?;
        info!(group = %form.group_name.trim(), slots = count, "schedule group saved");
        self.reload().await?;
        Ok(count)
    }

    /// Soft delete: the record stays for historical registrations.
    pub async fn deactivate(&self, id: &str) -> Result<(), CatalogError> {
        self.repository.deactivate(id).await?;
        info!(schedule_id = %id, "schedule deactivated");
        self.reload().await
    }
}
