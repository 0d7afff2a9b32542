use async_trait::async_trait;

use crate::modules::registration::core::offering::Offering;
use crate::shared::core::catalog_entity::CatalogEntity;

#[async_trait]
pub trait OfferingSource: Send + Sync {
    /// Active offerings with teacher, material and center names joined in.
    async fn active_offerings(&self) -> anyhow::Result<Vec<Offering>>;

    /// Every teacher, inactive ones included.
    async fn teachers(&self) -> anyhow::Result<Vec<CatalogEntity>>;

    async fn active_materials(&self) -> anyhow::Result<Vec<CatalogEntity>>;

    async fn active_centers(&self) -> anyhow::Result<Vec<CatalogEntity>>;
}
