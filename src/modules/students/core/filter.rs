use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::modules::students::core::student::StudentRow;
use crate::shared::core::grade::Grade;
use crate::shared::core::reference::RefKey;

/// A `group|time` pair as used by the admin group dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupSlot {
    pub group_name: String,
    pub time_slot: String,
}

impl fmt::Display for GroupSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.group_name, self.time_slot)
    }
}

impl FromStr for GroupSlot {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once('|') {
            Some((group, time)) if !group.trim().is_empty() => Ok(GroupSlot {
                group_name: group.trim().to_string(),
                time_slot: time.trim().to_string(),
            }),
            _ => Err(format!("expected `group|time`, got `{value}`")),
        }
    }
}

/// Every filter of the dashboard except the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCriteria {
    #[serde(default)]
    pub grade: Option<Grade>,
    #[serde(default)]
    pub teacher: Option<RefKey>,
    #[serde(default)]
    pub material: Option<RefKey>,
    #[serde(default)]
    pub center: Option<String>,
    #[serde(default)]
    pub group: Option<GroupSlot>,
    #[serde(default)]
    pub search: Option<String>,
}

impl StudentCriteria {
    /// Grade counts apply every filter but the grade itself.
    pub fn matches(&self, row: &StudentRow, ignore_grade: bool) -> bool {
        if !ignore_grade && self.grade.is_some_and(|g| g != row.grade) {
            return false;
        }
        if let Some(teacher) = &self.teacher {
            if !teacher.matches(row.teacher_id.as_deref()) {
                return false;
            }
        }
        if let Some(material) = &self.material {
            if !material.matches(row.material_id.as_deref()) {
                return false;
            }
        }
        if let Some(center) = &self.center {
            if center != &row.center_id {
                return false;
            }
        }
        if let Some(group) = &self.group {
            if group.group_name != row.group_name || group.time_slot != row.time_slot {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => {
                row.student_name.to_lowercase().contains(&term.to_lowercase())
                    || row.student_phone.contains(term)
                    || row.parent_phone.contains(term)
            }
            None => true,
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FilterChange {
    Grade(Option<Grade>),
    Teacher(Option<RefKey>),
    Material(Option<RefKey>),
    Center(Option<String>),
    Group(Option<GroupSlot>),
    Search(Option<String>),
}

/// Dashboard filter state. Changing any criterion sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentFilter {
    criteria: StudentCriteria,
    page: u32,
}

impl Default for StudentFilter {
    fn default() -> Self {
        Self {
            criteria: StudentCriteria::default(),
            page: 1,
        }
    }
}

impl StudentFilter {
    pub fn criteria(&self) -> &StudentCriteria {
        &self.criteria
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn apply(&mut self, change: FilterChange) {
        match change {
            FilterChange::Grade(value) => {
                self.criteria.grade = value;
                // the group dropdown is rebuilt per grade
                self.criteria.group = None;
            }
            FilterChange::Teacher(value) => self.criteria.teacher = value,
            FilterChange::Material(value) => self.criteria.material = value,
            FilterChange::Center(value) => self.criteria.center = value,
            FilterChange::Group(value) => self.criteria.group = value,
            FilterChange::Search(value) => self.criteria.search = value,
        }
        self.page = 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    pub fn to_query(&self, page_size: u32) -> StudentQuery {
        StudentQuery {
            criteria: self.criteria.clone(),
            page: self.page,
            page_size,
        }
    }
}

/// What the directory port receives: one page of one filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentQuery {
    pub criteria: StudentCriteria,
    pub page: u32,
    pub page_size: u32,
}

impl StudentQuery {
    pub fn offset(&self) -> usize {
        (self.page.max(1) as usize - 1) * self.page_size as usize
    }
}
