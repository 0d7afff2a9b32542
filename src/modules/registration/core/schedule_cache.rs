use crate::modules::registration::core::offering::Offering;
use crate::shared::core::catalog_entity::CatalogEntity;

/// Everything one page view needs, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub offerings: Vec<Offering>,
    pub teachers: Vec<CatalogEntity>,
    pub materials: Vec<CatalogEntity>,
    pub centers: Vec<CatalogEntity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    Empty,
    Ready,
    Failed(String),
}

/// In-memory offering list owned by a single page. Replaced wholesale, never patched.
#[derive(Debug, Clone)]
pub struct ScheduleCache {
    status: CacheStatus,
    snapshot: CatalogSnapshot,
}

impl Default for ScheduleCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleCache {
    pub fn new() -> Self {
        Self {
            status: CacheStatus::Empty,
            snapshot: CatalogSnapshot::default(),
        }
    }

    pub fn replace(&mut self, snapshot: CatalogSnapshot) {
        self.snapshot = snapshot;
        self.status = CacheStatus::Ready;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.snapshot = CatalogSnapshot::default();
        self.status = CacheStatus::Failed(message.into());
    }

    pub fn status(&self) -> &CacheStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == CacheStatus::Ready
    }

    pub fn offerings(&self) -> &[Offering] {
        &self.snapshot.offerings
    }

    pub fn teachers(&self) -> &[CatalogEntity] {
        &self.snapshot.teachers
    }

    pub fn materials(&self) -> &[CatalogEntity] {
        &self.snapshot.materials
    }

    pub fn centers(&self) -> &[CatalogEntity] {
        &self.snapshot.centers
    }

    pub fn find_offering(&self, offering_id: &str) -> Option<&Offering> {
        self.snapshot.offerings.iter().find(|o| o.id == offering_id)
    }

    pub fn center_name(&self, center_id: &str) -> Option<&str> {
        self.snapshot
            .centers
            .iter()
            .find(|c| c.id == center_id)
            .map(|c| c.name.as_str())
    }
}
