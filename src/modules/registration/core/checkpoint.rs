use serde::{Deserialize, Serialize};

use crate::shared::core::grade::Grade;

/// Session storage key for the in-progress two-step math registration.
pub const PENDING_REGISTRATION_KEY: &str = "pendingSecondMathRegistration";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub material_name: String,
    pub group_name: String,
    pub time_label: String,
}

/// Written after the first leg of a math pair succeeds; consumed by the second leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub student_name: String,
    pub student_phone: String,
    pub parent_phone: String,
    pub grade: Grade,
    pub center_id: String,
    pub first_material_id: String,
    pub first_booking: BookingSummary,
}
