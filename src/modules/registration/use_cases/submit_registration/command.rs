use serde::{Deserialize, Serialize};

use crate::shared::core::grade::Grade;

/// Identity fields typed into the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDetails {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_phone: String,
    #[serde(default)]
    pub parent_phone: String,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

/// What is sent to the backend's atomic register procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterStudent {
    pub student_name: String,
    pub student_phone: String,
    pub parent_phone: String,
    pub transaction_id: Option<String>,
    pub grade: Grade,
    pub center_id: String,
    pub material_id: Option<String>,
    pub teacher_id: Option<String>,
    pub group_name: String,
    pub time_slot: String,
}
