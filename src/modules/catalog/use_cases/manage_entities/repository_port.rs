use async_trait::async_trait;

use crate::modules::catalog::core::entity::CatalogKind;
use crate::modules::catalog::core::errors::CatalogError;
use crate::shared::core::catalog_entity::CatalogEntity;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Every row of the table, inactive teachers included.
    async fn list(&self, kind: CatalogKind) -> anyhow::Result<Vec<CatalogEntity>>;

    async fn create(&self, kind: CatalogKind, name: &str) -> Result<CatalogEntity, CatalogError>;

    async fn rename(&self, kind: CatalogKind, id: &str, name: &str) -> Result<CatalogEntity, CatalogError>;

    /// Repoints dependents to the fallback entity before removing the row. Teachers are
    /// deactivated instead of removed.
    async fn delete_and_reassign(&self, kind: CatalogKind, id: &str) -> Result<(), CatalogError>;
}
