use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::catalog::core::entity::{CatalogKind, same_name};
use crate::modules::catalog::core::errors::CatalogError;
use crate::modules::catalog::core::schedule_group::{
    ScheduleGroupKey, ScheduleRecord, ScheduleRow,
};
use crate::modules::catalog::use_cases::manage_entities::repository_port::CatalogRepository;
use crate::modules::catalog::use_cases::manage_schedules::repository_port::ScheduleRepository;
use crate::modules::registration::core::offering::{CenterRef, MaterialRef, Offering, TeacherRef};
use crate::modules::registration::core::outcome::RegistrationOutcome;
use crate::modules::registration::use_cases::load_offerings::source_port::OfferingSource;
use crate::modules::registration::use_cases::submit_registration::command::RegisterStudent;
use crate::modules::registration::use_cases::submit_registration::gateway_port::RegistrationGateway;
use crate::modules::students::core::filter::StudentQuery;
use crate::modules::students::core::student::{GradeCounts, StudentPage, StudentRow};
use crate::modules::students::use_cases::delete_student::remover_port::RegistrationRemover;
use crate::modules::students::use_cases::list_students::queries_port::StudentDirectory;
use crate::shared::core::catalog_entity::{CatalogEntity, FALLBACK_NAMES};
use crate::shared::infrastructure::backend::{BackendError, NOT_FOUND};

#[derive(Default)]
struct Tables {
    teachers: Vec<CatalogEntity>,
    materials: Vec<CatalogEntity>,
    centers: Vec<CatalogEntity>,
    schedules: Vec<ScheduleRecord>,
    registrations: Vec<StudentRow>,
}

impl Tables {
    fn entities(&self, kind: CatalogKind) -> &Vec<CatalogEntity> {
        match kind {
            CatalogKind::Teacher => &self.teachers,
            CatalogKind::Material => &self.materials,
            CatalogKind::Center => &self.centers,
        }
    }

    fn entities_mut(&mut self, kind: CatalogKind) -> &mut Vec<CatalogEntity> {
        match kind {
            CatalogKind::Teacher => &mut self.teachers,
            CatalogKind::Material => &mut self.materials,
            CatalogKind::Center => &mut self.centers,
        }
    }

    fn name_of(entities: &[CatalogEntity], id: Option<&str>) -> Option<String> {
        let id = id?;
        entities.iter().find(|e| e.id == id).map(|e| e.name.clone())
    }

    fn registered_for(&self, record: &ScheduleRecord) -> u32 {
        self.registrations
            .iter()
            .filter(|r| {
                r.grade == record.grade
                    && r.material_id == record.material_id
                    && r.teacher_id == record.teacher_id
                    && r.center_id == record.center_id
                    && r.group_name == record.group_name
                    && r.time_slot == record.time_slot
            })
            .count() as u32
    }

    fn offering(&self, record: &ScheduleRecord) -> Offering {
        let material = record.material_id.as_ref().map(|id| MaterialRef {
            id: id.clone(),
            name: Self::name_of(&self.materials, Some(id)).unwrap_or_else(|| id.clone()),
        });
        let teacher = record.teacher_id.as_ref().map(|id| {
            let entity = self.teachers.iter().find(|t| &t.id == id);
            TeacherRef {
                id: id.clone(),
                name: entity.map_or_else(|| id.clone(), |t| t.name.clone()),
                is_active: entity.is_some_and(|t| t.is_active),
            }
        });
        Offering {
            id: record.id.clone(),
            grade: record.grade,
            material,
            teacher,
            center: CenterRef {
                id: record.center_id.clone(),
                name: Self::name_of(&self.centers, Some(&record.center_id))
                    .unwrap_or_else(|| record.center_id.clone()),
            },
            group_name: record.group_name.clone(),
            time_slot: record.time_slot.clone(),
            capacity: record.capacity,
            registered: self.registered_for(record),
            is_active: record.is_active,
        }
    }

    fn schedule_row(&self, record: &ScheduleRecord) -> ScheduleRow {
        ScheduleRow {
            record: record.clone(),
            teacher_name: Self::name_of(&self.teachers, record.teacher_id.as_deref()),
            material_name: Self::name_of(&self.materials, record.material_id.as_deref()),
            center_name: Self::name_of(&self.centers, Some(&record.center_id)),
            registered: self.registered_for(record),
        }
    }

    fn joined(&self, row: &StudentRow) -> StudentRow {
        StudentRow {
            teacher_name: Self::name_of(&self.teachers, row.teacher_id.as_deref()),
            material_name: Self::name_of(&self.materials, row.material_id.as_deref()),
            center_name: Self::name_of(&self.centers, Some(&row.center_id)),
            ..row.clone()
        }
    }
}

/// Every backend table kept in process. Registration runs check-then-insert under one
/// write lock, which is what the hosted stored procedure guarantees too.
#[derive(Default)]
pub struct InMemoryBackend {
    tables: RwLock<Tables>,
    is_offline: AtomicBool,
    query_count: AtomicUsize,
    query_delay_ms: AtomicU64,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend holding only the "General" center that safe deletes fall back to.
    pub async fn seeded() -> Self {
        let backend = Self::new();
        backend
            .add_center(CatalogEntity::new("general-center", FALLBACK_NAMES[0]))
            .await;
        backend
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Number of student queries served so far.
    pub fn query_count(&self) -> usize {
        self.query_count.load(Ordering::SeqCst)
    }

    pub fn set_query_delay(&self, delay: Duration) {
        self.query_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub async fn add_teacher(&self, teacher: CatalogEntity) {
        self.tables.write().await.teachers.push(teacher);
    }

    pub async fn add_material(&self, material: CatalogEntity) {
        self.tables.write().await.materials.push(material);
    }

    pub async fn add_center(&self, center: CatalogEntity) {
        self.tables.write().await.centers.push(center);
    }

    pub async fn add_schedule(&self, schedule: ScheduleRecord) {
        self.tables.write().await.schedules.push(schedule);
    }

    pub async fn seed_registration(&self, row: StudentRow) {
        self.tables.write().await.registrations.push(row);
    }

    pub async fn registrations(&self) -> Vec<StudentRow> {
        self.tables.read().await.registrations.clone()
    }

    pub async fn schedules(&self) -> Vec<ScheduleRecord> {
        self.tables.read().await.schedules.clone()
    }

    fn ensure_online(&self) -> Result<(), BackendError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(BackendError::Transport("Backend offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl OfferingSource for InMemoryBackend {
    async fn active_offerings(&self) -> anyhow::Result<Vec<Offering>> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .schedules
            .iter()
            .filter(|s| s.is_active)
            .map(|s| tables.offering(s))
            .collect())
    }

    async fn teachers(&self) -> anyhow::Result<Vec<CatalogEntity>> {
        self.ensure_online()?;
        Ok(self.tables.read().await.teachers.clone())
    }

    async fn active_materials(&self) -> anyhow::Result<Vec<CatalogEntity>> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables.materials.iter().filter(|m| m.is_active).cloned().collect())
    }

    async fn active_centers(&self) -> anyhow::Result<Vec<CatalogEntity>> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables.centers.iter().filter(|c| c.is_active).cloned().collect())
    }
}

#[async_trait]
impl RegistrationGateway for InMemoryBackend {
    async fn submit(
        &self,
        command: &RegisterStudent,
    ) -> Result<RegistrationOutcome, BackendError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;

        let schedule = tables.schedules.iter().find(|s| {
            s.is_active
                && s.grade == command.grade
                && s.material_id == command.material_id
                && s.teacher_id == command.teacher_id
                && s.center_id == command.center_id
                && s.group_name == command.group_name
                && s.time_slot == command.time_slot
        });
        let Some(schedule) = schedule else {
            return Ok(RegistrationOutcome::ScheduleNotFound);
        };

        let duplicate = tables.registrations.iter().any(|r| {
            r.student_phone == command.student_phone
                && r.grade == command.grade
                && r.material_id == command.material_id
                && r.center_id == command.center_id
        });
        if duplicate {
            return Ok(RegistrationOutcome::DuplicateStudent);
        }

        if tables.registered_for(schedule) >= schedule.capacity {
            return Ok(RegistrationOutcome::GroupFull);
        }

        let row = StudentRow {
            id: Uuid::now_v7().to_string(),
            student_name: command.student_name.clone(),
            student_phone: command.student_phone.clone(),
            parent_phone: command.parent_phone.clone(),
            transaction_id: command.transaction_id.clone(),
            grade: command.grade,
            teacher_id: command.teacher_id.clone(),
            teacher_name: None,
            material_id: command.material_id.clone(),
            material_name: None,
            center_id: command.center_id.clone(),
            center_name: None,
            group_name: command.group_name.clone(),
            time_slot: command.time_slot.clone(),
            created_at: Utc::now(),
        };
        tables.registrations.push(row);
        Ok(RegistrationOutcome::Success)
    }
}

#[async_trait]
impl StudentDirectory for InMemoryBackend {
    async fn query(&self, query: &StudentQuery) -> anyhow::Result<StudentPage> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        let delay = self.query_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        self.ensure_online()?;

        let tables = self.tables.read().await;
        let joined: Vec<StudentRow> = tables
            .registrations
            .iter()
            .rev()
            .map(|row| tables.joined(row))
            .collect();

        let mut grade_counts = GradeCounts::default();
        for row in joined.iter().filter(|r| query.criteria.matches(r, true)) {
            grade_counts.add(row.grade);
        }

        let mut matching: Vec<StudentRow> = joined
            .into_iter()
            .filter(|r| query.criteria.matches(r, false))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let rows = matching
            .into_iter()
            .skip(query.offset())
            .take(query.page_size as usize)
            .collect();
        Ok(StudentPage {
            rows,
            total,
            grade_counts,
        })
    }
}

#[async_trait]
impl RegistrationRemover for InMemoryBackend {
    async fn remove_registration(&self, registration_id: &str) -> Result<(), BackendError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let before = tables.registrations.len();
        tables.registrations.retain(|r| r.id != registration_id);
        if tables.registrations.len() == before {
            return Err(BackendError::rejected(
                NOT_FOUND,
                format!("registration {registration_id} does not exist"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryBackend {
    async fn list(&self, kind: CatalogKind) -> anyhow::Result<Vec<CatalogEntity>> {
        self.ensure_online()?;
        Ok(self.tables.read().await.entities(kind).clone())
    }

    async fn create(&self, kind: CatalogKind, name: &str) -> Result<CatalogEntity, CatalogError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let entities = tables.entities_mut(kind);
        if entities.iter().any(|e| same_name(&e.name, name)) {
            return Err(CatalogError::AlreadyExists);
        }
        let entity = CatalogEntity::new(Uuid::now_v7().to_string(), name.trim());
        entities.push(entity.clone());
        Ok(entity)
    }

    async fn rename(
        &self,
        kind: CatalogKind,
        id: &str,
        name: &str,
    ) -> Result<CatalogEntity, CatalogError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let entities = tables.entities_mut(kind);
        if entities.iter().any(|e| e.id != id && same_name(&e.name, name)) {
            return Err(CatalogError::AlreadyExists);
        }
        let entity = entities
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        if entity.is_fallback() {
            return Err(CatalogError::FallbackProtected);
        }
        entity.name = name.trim().to_string();
        Ok(entity.clone())
    }

    async fn delete_and_reassign(&self, kind: CatalogKind, id: &str) -> Result<(), CatalogError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let entity = tables
            .entities(kind)
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        if entity.is_fallback() {
            return Err(CatalogError::FallbackProtected);
        }

        match kind {
            CatalogKind::Teacher => {
                for schedule in tables.schedules.iter_mut().filter(|s| s.teacher_id.as_deref() == Some(id)) {
                    schedule.teacher_id = None;
                }
                for row in tables.registrations.iter_mut().filter(|r| r.teacher_id.as_deref() == Some(id)) {
                    row.teacher_id = None;
                }
                if let Some(teacher) = tables.teachers.iter_mut().find(|t| t.id == id) {
                    teacher.is_active = false;
                }
            }
            CatalogKind::Material => {
                for schedule in tables.schedules.iter_mut().filter(|s| s.material_id.as_deref() == Some(id)) {
                    schedule.material_id = None;
                }
                for row in tables.registrations.iter_mut().filter(|r| r.material_id.as_deref() == Some(id)) {
                    row.material_id = None;
                }
                tables.materials.retain(|m| m.id != id);
            }
            CatalogKind::Center => {
                let fallback = tables
                    .centers
                    .iter()
                    .find(|c| c.is_fallback())
                    .map(|c| c.id.clone())
                    .ok_or_else(|| {
                        BackendError::rejected(NOT_FOUND, "no general center to reassign to")
                    })?;
                for schedule in tables.schedules.iter_mut().filter(|s| s.center_id == id) {
                    schedule.center_id = fallback.clone();
                }
                for row in tables.registrations.iter_mut().filter(|r| r.center_id == id) {
                    row.center_id = fallback.clone();
                }
                tables.centers.retain(|c| c.id != id);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryBackend {
    async fn list(&self) -> anyhow::Result<Vec<ScheduleRow>> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables.schedules.iter().map(|s| tables.schedule_row(s)).collect())
    }

    async fn save_group(
        &self,
        records: Vec<ScheduleRecord>,
        replacing: Option<&ScheduleGroupKey>,
    ) -> Result<(), CatalogError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let kept: Vec<ScheduleRecord> = tables
            .schedules
            .iter()
            .filter(|s| replacing.is_none_or(|key| !key.covers(s)))
            .cloned()
            .collect();
        let clash = records
            .iter()
            .any(|new| kept.iter().any(|old| old.is_active && old.same_slot(new)));
        if clash {
            return Err(CatalogError::AlreadyExists);
        }
        tables.schedules = kept;
        tables.schedules.extend(records);
        Ok(())
    }

    async fn deactivate(&self, id: &str) -> Result<(), CatalogError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let schedule = tables
            .schedules
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        schedule.is_active = false;
        Ok(())
    }
}
