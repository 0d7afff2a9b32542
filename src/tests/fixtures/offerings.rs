// Shared test fixture for offerings.
// Defaults describe one active, empty first-grade Algebra slot at center C1.

use crate::modules::registration::core::offering::{
    CenterRef, DEFAULT_CAPACITY, MaterialRef, Offering, TeacherRef,
};
use crate::shared::core::grade::Grade;

pub struct OfferingBuilder {
    inner: Offering,
}

impl Default for OfferingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl OfferingBuilder {
    pub fn new() -> Self {
        Self {
            inner: Offering {
                id: "o-1".to_string(),
                grade: Grade::First,
                material: Some(MaterialRef {
                    id: "m-1".to_string(),
                    name: "Algebra".to_string(),
                }),
                teacher: Some(TeacherRef {
                    id: "t-1".to_string(),
                    name: "T1".to_string(),
                    is_active: true,
                }),
                center: CenterRef {
                    id: "c-1".to_string(),
                    name: "C1".to_string(),
                },
                group_name: "Sat-Tue".to_string(),
                time_slot: "14:00".to_string(),
                capacity: DEFAULT_CAPACITY,
                registered: 0,
                is_active: true,
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn grade(mut self, v: Grade) -> Self {
        self.inner.grade = v;
        self
    }

    pub fn center(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.inner.center = CenterRef {
            id: id.into(),
            name: name.into(),
        };
        self
    }

    pub fn material(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.inner.material = Some(MaterialRef {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn general_material(mut self) -> Self {
        self.inner.material = None;
        self
    }

    pub fn teacher(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.inner.teacher = Some(TeacherRef {
            id: id.into(),
            name: name.into(),
            is_active: true,
        });
        self
    }

    pub fn general_teacher(mut self) -> Self {
        self.inner.teacher = None;
        self
    }

    /// Deactivates the current teacher, adding a default one when the slot is general.
    pub fn inactive_teacher(mut self) -> Self {
        let mut teacher = self.inner.teacher.take().unwrap_or(TeacherRef {
            id: "t-inactive".to_string(),
            name: "Inactive".to_string(),
            is_active: true,
        });
        teacher.is_active = false;
        self.inner.teacher = Some(teacher);
        self
    }

    pub fn group(mut self, v: impl Into<String>) -> Self {
        self.inner.group_name = v.into();
        self
    }

    pub fn time(mut self, v: impl Into<String>) -> Self {
        self.inner.time_slot = v.into();
        self
    }

    pub fn capacity(mut self, v: u32) -> Self {
        self.inner.capacity = v;
        self
    }

    pub fn registered(mut self, v: u32) -> Self {
        self.inner.registered = v;
        self
    }

    pub fn active(mut self, v: bool) -> Self {
        self.inner.is_active = v;
        self
    }

    pub fn build(self) -> Offering {
        self.inner
    }
}
