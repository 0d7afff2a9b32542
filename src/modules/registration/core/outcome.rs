use serde::Serialize;

pub const DUPLICATE_STUDENT: &str = "DUPLICATE_STUDENT";
pub const GROUP_FULL: &str = "GROUP_FULL";
pub const SCHEDULE_NOT_FOUND: &str = "SCHEDULE_NOT_FOUND";

/// Result of an atomic submit, decoded once at the backend boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "code", rename_all = "snake_case")]
pub enum RegistrationOutcome {
    Success,
    DuplicateStudent,
    GroupFull,
    ScheduleNotFound,
    Unknown(String),
}

impl RegistrationOutcome {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            DUPLICATE_STUDENT => RegistrationOutcome::DuplicateStudent,
            GROUP_FULL => RegistrationOutcome::GroupFull,
            SCHEDULE_NOT_FOUND => RegistrationOutcome::ScheduleNotFound,
            other => RegistrationOutcome::Unknown(other.to_string()),
        }
    }

    /// Decodes the `{ success, error_code }` shape the stored procedure returns.
    pub fn from_reply(success: bool, error_code: Option<&str>) -> Self {
        if success {
            RegistrationOutcome::Success
        } else {
            RegistrationOutcome::from_code(error_code.unwrap_or_default())
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            RegistrationOutcome::Success => None,
            RegistrationOutcome::DuplicateStudent => Some(DUPLICATE_STUDENT),
            RegistrationOutcome::GroupFull => Some(GROUP_FULL),
            RegistrationOutcome::ScheduleNotFound => Some(SCHEDULE_NOT_FOUND),
            RegistrationOutcome::Unknown(code) => Some(code),
        }
    }
}
