use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::catalog::core::errors::CatalogError;
use crate::shared::core::grade::Grade;
use crate::shared::core::reference::RefKey;
use crate::shared::core::time_label::{group_time_label, parse_time_slot};

/// One row of the schedules table: a single (group, time slot) offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: String,
    pub grade: Grade,
    #[serde(default)]
    pub material_id: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    pub center_id: String,
    pub group_name: String,
    pub time_slot: String,
    pub capacity: u32,
    pub is_active: bool,
}

impl ScheduleRecord {
    /// Same seat in the timetable, regardless of id or active flag.
    pub fn same_slot(&self, other: &ScheduleRecord) -> bool {
        self.grade == other.grade
            && self.material_id == other.material_id
            && self.teacher_id == other.teacher_id
            && self.center_id == other.center_id
            && self.group_name == other.group_name
            && self.time_slot == other.time_slot
    }

    pub fn group_key(&self) -> ScheduleGroupKey {
        ScheduleGroupKey {
            grade: self.grade,
            group_name: self.group_name.clone(),
            teacher_id: self.teacher_id.clone(),
            material_id: self.material_id.clone(),
        }
    }
}

/// A schedule record with display names joined in, as listed in the admin table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    #[serde(flatten)]
    pub record: ScheduleRecord,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub material_name: Option<String>,
    #[serde(default)]
    pub center_name: Option<String>,
    #[serde(default)]
    pub registered: u32,
}

impl ScheduleRow {
    pub fn label(&self) -> String {
        group_time_label(&self.record.group_name, &self.record.time_slot)
    }
}

/// Identifies the records that make up one saved group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleGroupKey {
    pub grade: Grade,
    pub group_name: String,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub material_id: Option<String>,
}

impl ScheduleGroupKey {
    pub fn covers(&self, record: &ScheduleRecord) -> bool {
        self.grade == record.grade
            && self.group_name == record.group_name
            && self.teacher_id == record.teacher_id
            && self.material_id == record.material_id
    }
}

/// The schedule editor: one group name shared by one or more time slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleGroupForm {
    #[serde(default)]
    pub grade: Option<Grade>,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub time_slots: Vec<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub material_id: Option<String>,
    #[serde(default)]
    pub center_id: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Set when editing an existing group.
    #[serde(default)]
    pub replacing: Option<ScheduleGroupKey>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Expands the form into one active record per distinct time slot.
pub fn build_records(
    form: &ScheduleGroupForm,
    default_capacity: u32,
) -> Result<Vec<ScheduleRecord>, CatalogError> {
    let center_id = non_blank(form.center_id.as_deref()).ok_or(CatalogError::MissingField("center"))?;
    let grade = form.grade.ok_or(CatalogError::MissingField("grade"))?;
    let group_name = non_blank(Some(&form.group_name)).ok_or(CatalogError::MissingField("group_name"))?;

    let mut slots: Vec<String> = Vec::new();
    for slot in &form.time_slots {
        let slot = slot.trim();
        if slot.is_empty() || slots.iter().any(|s| s == slot) {
            continue;
        }
        if parse_time_slot(slot).is_none() {
            return Err(CatalogError::MissingField("time_slot"));
        }
        slots.push(slot.to_string());
    }
    if slots.is_empty() {
        return Err(CatalogError::MissingField("time_slot"));
    }

    let teacher_id = RefKey::from_id(form.teacher_id.as_deref()).as_id().map(str::to_string);
    let material_id = RefKey::from_id(form.material_id.as_deref()).as_id().map(str::to_string);
    let capacity = form.capacity.filter(|c| *c > 0).unwrap_or(default_capacity);

    Ok(slots
        .into_iter()
        .map(|time_slot| ScheduleRecord {
            id: Uuid::now_v7().to_string(),
            grade,
            material_id: material_id.clone(),
            teacher_id: teacher_id.clone(),
            center_id: center_id.clone(),
            group_name: group_name.clone(),
            time_slot,
            capacity,
            is_active: true,
        })
        .collect())
}

/// Admin-side filter of the schedules table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTableFilter {
    #[serde(default)]
    pub grade: Option<Grade>,
    #[serde(default)]
    pub teacher: Option<RefKey>,
    #[serde(default)]
    pub material: Option<RefKey>,
    #[serde(default)]
    pub group: Option<String>,
}

impl ScheduleTableFilter {
    pub fn matches(&self, row: &ScheduleRow) -> bool {
        let record = &row.record;
        self.grade.is_none_or(|g| g == record.grade)
            && self
                .teacher
                .as_ref()
                .is_none_or(|t| t.matches(record.teacher_id.as_deref()))
            && self
                .material
                .as_ref()
                .is_none_or(|m| m.matches(record.material_id.as_deref()))
            && self.group.as_ref().is_none_or(|g| g == &record.group_name)
    }
}
