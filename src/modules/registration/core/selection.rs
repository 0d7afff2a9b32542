use serde::{Deserialize, Serialize};

use crate::shared::core::grade::Grade;
use crate::shared::core::reference::RefKey;

/// The user's partial choice along Center -> Grade -> Material -> Teacher -> Group/Time.
///
/// `None` means "not selected" and acts as a wildcard. `offering` holds the id of the
/// chosen group/time row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub center: Option<String>,
    pub grade: Option<Grade>,
    pub material: Option<RefKey>,
    pub teacher: Option<RefKey>,
    pub offering: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SelectionChange {
    Center(Option<String>),
    Grade(Option<Grade>),
    Material(Option<RefKey>),
    Teacher(Option<RefKey>),
    GroupTime(Option<String>),
}

impl Selection {
    pub fn apply(&mut self, change: SelectionChange) {
        match change {
            SelectionChange::Center(value) => self.center = value,
            SelectionChange::Grade(value) => self.grade = value,
            SelectionChange::Material(value) => self.material = value,
            SelectionChange::Teacher(value) => self.teacher = value,
            SelectionChange::GroupTime(value) => self.offering = value,
        }
    }

    /// Keeps center and grade, drops the subject and slot.
    pub fn clear_subject(&mut self) {
        self.material = None;
        self.teacher = None;
        self.offering = None;
    }
}
