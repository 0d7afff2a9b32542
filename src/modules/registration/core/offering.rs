use serde::{Deserialize, Serialize};

use crate::modules::registration::core::availability::Availability;
use crate::shared::core::grade::Grade;
use crate::shared::core::reference::RefKey;
use crate::shared::core::time_label::group_time_label;

pub const DEFAULT_CAPACITY: u32 = 145;
pub const GENERAL_LABEL: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRef {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterRef {
    pub id: String,
    pub name: String,
}

/// One bookable (grade, material, teacher, center, group, time) combination.
///
/// `material` and `teacher` are `None` when the offering is open to the "general" entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    pub id: String,
    pub grade: Grade,
    pub material: Option<MaterialRef>,
    pub teacher: Option<TeacherRef>,
    pub center: CenterRef,
    pub group_name: String,
    pub time_slot: String,
    pub capacity: u32,
    pub registered: u32,
    pub is_active: bool,
}

impl Offering {
    pub fn material_key(&self) -> RefKey {
        RefKey::from_id(self.material.as_ref().map(|m| m.id.as_str()))
    }

    pub fn teacher_key(&self) -> RefKey {
        RefKey::from_id(self.teacher.as_ref().map(|t| t.id.as_str()))
    }

    pub fn material_name(&self) -> &str {
        self.material.as_ref().map_or(GENERAL_LABEL, |m| m.name.as_str())
    }

    pub fn teacher_name(&self) -> &str {
        self.teacher.as_ref().map_or(GENERAL_LABEL, |t| t.name.as_str())
    }

    /// Active and not taught by a deactivated teacher.
    pub fn bookable(&self) -> bool {
        self.is_active && self.teacher.as_ref().is_none_or(|t| t.is_active)
    }

    pub fn availability(&self) -> Availability {
        Availability::from_counts(self.registered, self.capacity)
    }

    pub fn label(&self) -> String {
        group_time_label(&self.group_name, &self.time_slot)
    }
}
