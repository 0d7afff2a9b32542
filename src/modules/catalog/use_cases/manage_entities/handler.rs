use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::modules::catalog::core::entity::{CatalogKind, validate_name};
use crate::modules::catalog::core::errors::CatalogError;
use crate::modules::catalog::use_cases::manage_entities::repository_port::CatalogRepository;
use crate::modules::catalog::use_cases::manage_schedules::handler::SchedulePanel;
use crate::shared::core::catalog_entity::CatalogEntity;

/// Teacher, material and center lists of the admin panel.
///
/// A save only touches the affected entry of the local list. A safe delete reassigns
/// dependents on the backend, so both this list and the schedules are reloaded.
pub struct CatalogPanel {
    repository: Arc<dyn CatalogRepository>,
    schedules: Arc<SchedulePanel>,
    lists: RwLock<HashMap<CatalogKind, Vec<CatalogEntity>>>,
}

impl CatalogPanel {
    pub fn new(repository: Arc<dyn CatalogRepository>, schedules: Arc<SchedulePanel>) -> Self {
        Self {
            repository,
            schedules,
            lists: RwLock::new(HashMap::new()),
        }
    }

    pub async fn reload(&self, kind: CatalogKind) -> Result<Vec<CatalogEntity>, CatalogError> {
        let mut entities = self.repository.list(kind).await.map_err(|err| {
            error!(%kind, error = %err, "loading catalog failed");
            CatalogError::Load(format!("{kind} list: {err}"))
        })?;
        entities.sort_by(|a, b| a.name.cmp(&b.name));
        self.lists.write().await.insert(kind, entities.clone());
        Ok(entities)
    }

    pub async fn entries(&self, kind: CatalogKind) -> Vec<CatalogEntity> {
        self.lists
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    /// Creates when `id` is `None`, renames otherwise.
    pub async fn save(
        &self,
        kind: CatalogKind,
        id: Option<&str>,
        name: &str,
    ) -> Result<CatalogEntity, CatalogError> {
        let name = validate_name(name)?;
        let saved = match id {
            None => self.repository.create(kind, &name).await?,
            Some(id) => {
                self.ensure_not_fallback(kind, id).await?;
                self.repository.rename(kind, id, &name).await?
            }
        };

        let mut lists = self.lists.write().await;
        let entries = lists.entry(kind).or_default();
        match entries.iter_mut().find(|e| e.id == saved.id) {
            Some(entry) => *entry = saved.clone(),
            None => entries.push(saved.clone()),
        }
        info!(%kind, id = %saved.id, "catalog entry saved");
        Ok(saved)
    }

    pub async fn delete(&self, kind: CatalogKind, id: &str) -> Result<(), CatalogError> {
        self.ensure_not_fallback(kind, id).await?;
        self.repository.delete_and_reassign(kind, id).await?;
        info!(%kind, %id, "catalog entry deleted, dependents reassigned");

        self.reload(kind).await?;
        if let Err(err) = self.schedules.reload().await {
            warn!(error = %err, "schedule reload after delete failed");
        }
        Ok(())
    }

    async fn ensure_not_fallback(&self, kind: CatalogKind, id: &str) -> Result<(), CatalogError> {
        let lists = self.lists.read().await;
        let is_fallback = lists
            .get(&kind)
            .and_then(|entries| entries.iter().find(|e| e.id == id))
            .is_some_and(CatalogEntity::is_fallback);
        if is_fallback {
            return Err(CatalogError::FallbackProtected);
        }
        Ok(())
    }
}

#[cfg(test)]
mod catalog_panel_tests {
    use super::*;
    use crate::modules::catalog::core::schedule_group::ScheduleTableFilter;
    use crate::shared::infrastructure::backend::in_memory::InMemoryBackend;
    use crate::tests::fixtures::backend::seeded_backend;
    use rstest::{fixture, rstest};

    type BeforeEachReturn = (Arc<InMemoryBackend>, Arc<SchedulePanel>, CatalogPanel);

    #[fixture]
    async fn before_each() -> BeforeEachReturn {
        let backend = Arc::new(seeded_backend().await);
        let schedules = Arc::new(SchedulePanel::new(backend.clone(), 145));
        schedules.reload().await.unwrap();
        let panel = CatalogPanel::new(backend.clone(), schedules.clone());
        for kind in CatalogKind::ALL {
            panel.reload(kind).await.unwrap();
        }
        (backend, schedules, panel)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_add_a_created_entry_to_the_local_list(#[future] before_each: BeforeEachReturn) {
        let (_, _, panel) = before_each.await;
        let created = panel.save(CatalogKind::Material, None, "  Physics ").await.unwrap();
        assert_eq!(created.name, "Physics");
        assert!(panel.entries(CatalogKind::Material).await.contains(&created));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_replace_a_renamed_entry_in_place(#[future] before_each: BeforeEachReturn) {
        let (_, _, panel) = before_each.await;
        panel.save(CatalogKind::Teacher, Some("t-adel"), "Dr. Adel").await.unwrap();
        let teachers = panel.entries(CatalogKind::Teacher).await;
        assert_eq!(teachers.len(), 3);
        assert!(teachers.iter().any(|t| t.id == "t-adel" && t.name == "Dr. Adel"));
    }

    #[rstest]
    #[case::short("x")]
    #[case::blank("   ")]
    #[tokio::test]
    async fn it_should_reject_a_short_name(
        #[future] before_each: BeforeEachReturn,
        #[case] name: &str,
    ) {
        let (_, _, panel) = before_each.await;
        let result = panel.save(CatalogKind::Center, None, name).await;
        assert!(matches!(result, Err(CatalogError::NameTooShort)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_duplicate_name(#[future] before_each: BeforeEachReturn) {
        let (_, _, panel) = before_each.await;
        let result = panel.save(CatalogKind::Center, None, "downtown").await;
        assert!(matches!(result, Err(CatalogError::AlreadyExists)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_protect_the_general_center(#[future] before_each: BeforeEachReturn) {
        let (_, _, panel) = before_each.await;
        let result = panel.delete(CatalogKind::Center, "general-center").await;
        assert!(matches!(result, Err(CatalogError::FallbackProtected)));
        let result = panel
            .save(CatalogKind::Center, Some("general-center"), "Main")
            .await;
        assert!(matches!(result, Err(CatalogError::FallbackProtected)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reload_entities_and_schedules_after_a_safe_delete(#[future] before_each: BeforeEachReturn) {
        let (_, schedules, panel) = before_each.await;
        panel.delete(CatalogKind::Material, "m-algebra").await.unwrap();
        let materials = panel.entries(CatalogKind::Material).await;
        assert!(materials.iter().all(|m| m.id != "m-algebra"));

        let rows = schedules.rows(&ScheduleTableFilter::default()).await;
        let reassigned = rows.iter().find(|r| r.record.id == "s-algebra-sat").unwrap();
        assert_eq!(reassigned.record.material_id, None);
        assert_eq!(reassigned.material_name, None);
    }
}
