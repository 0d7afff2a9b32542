// Shared test fixture for dashboard rows.

use chrono::{TimeZone, Utc};

use crate::modules::students::core::student::StudentRow;
use crate::shared::core::grade::Grade;

pub struct StudentRowBuilder {
    inner: StudentRow,
}

impl Default for StudentRowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl StudentRowBuilder {
    pub fn new() -> Self {
        Self {
            inner: StudentRow {
                id: "r-1".to_string(),
                student_name: "Mona Adel".to_string(),
                student_phone: "01012345678".to_string(),
                parent_phone: "01198765432".to_string(),
                transaction_id: None,
                grade: Grade::First,
                teacher_id: Some("t-1".to_string()),
                teacher_name: Some("T1".to_string()),
                material_id: Some("m-1".to_string()),
                material_name: Some("Algebra".to_string()),
                center_id: "c-1".to_string(),
                center_name: Some("C1".to_string()),
                group_name: "Sat-Tue".to_string(),
                time_slot: "14:00".to_string(),
                created_at: Utc.with_ymd_and_hms(2025, 9, 1, 10, 0, 0).unwrap(),
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn student_name(mut self, v: impl Into<String>) -> Self {
        self.inner.student_name = v.into();
        self
    }

    pub fn student_phone(mut self, v: impl Into<String>) -> Self {
        self.inner.student_phone = v.into();
        self
    }

    pub fn parent_phone(mut self, v: impl Into<String>) -> Self {
        self.inner.parent_phone = v.into();
        self
    }

    pub fn grade(mut self, v: Grade) -> Self {
        self.inner.grade = v;
        self
    }

    /// `None` books the general teacher.
    pub fn teacher(mut self, v: Option<(&str, &str)>) -> Self {
        self.inner.teacher_id = v.map(|(id, _)| id.to_string());
        self.inner.teacher_name = v.map(|(_, name)| name.to_string());
        self
    }

    pub fn center(mut self, id: impl Into<String>) -> Self {
        self.inner.center_id = id.into();
        self
    }

    pub fn group(mut self, group_name: impl Into<String>, time_slot: impl Into<String>) -> Self {
        self.inner.group_name = group_name.into();
        self.inner.time_slot = time_slot.into();
        self
    }

    /// Registration time as minutes after the default timestamp.
    pub fn minutes_later(mut self, v: i64) -> Self {
        self.inner.created_at += chrono::Duration::minutes(v);
        self
    }

    pub fn build(self) -> StudentRow {
        self.inner
    }
}
