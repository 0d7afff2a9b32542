// Shared test fixture for the registration form.
// Defaults pass client-side validation.

use crate::modules::registration::use_cases::submit_registration::command::StudentDetails;

pub struct StudentDetailsBuilder {
    inner: StudentDetails,
}

impl Default for StudentDetailsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl StudentDetailsBuilder {
    pub fn new() -> Self {
        Self {
            inner: StudentDetails {
                student_name: "Mona Adel".to_string(),
                student_phone: "01012345678".to_string(),
                parent_phone: "01198765432".to_string(),
                transaction_id: None,
            },
        }
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

    pub fn transaction_id(mut self, v: impl Into<String>) -> Self {
        self.inner.transaction_id = Some(v.into());
        self
    }

    pub fn build(self) -> StudentDetails {
        self.inner
    }
}
