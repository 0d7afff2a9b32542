use async_trait::async_trait;

use crate::modules::catalog::core::errors::CatalogError;
use crate::modules::catalog::core::schedule_group::{ScheduleGroupKey, ScheduleRecord, ScheduleRow};

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<ScheduleRow>>;

    /// Inserts `records`, first removing the group named by `replacing`. Fails with
    /// `AlreadyExists` when a record clashes with another active one.
    async fn save_group(
        &self,
        records: Vec<ScheduleRecord>,
        replacing: Option<&ScheduleGroupKey>,
    ) -> Result<(), CatalogError>;

    async fn deactivate(&self, id: &str) -> Result<(), CatalogError>;
}
