use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::modules::registration::core::math::MathSubject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    StudentName,
    StudentPhone,
    ParentPhone,
    Center,
    Grade,
    Material,
    Teacher,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::StudentName => "student name",
            FormField::StudentPhone => "student phone",
            FormField::ParentPhone => "parent phone",
            FormField::Center => "center",
            FormField::Grade => "grade",
            FormField::Material => "material",
            FormField::Teacher => "teacher",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "field", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(FormField),

    #[error("{0} must be 11 digits starting with 01")]
    InvalidPhone(FormField),

    #[error("student name must be at least 2 characters")]
    NameTooShort,

    #[error("choose a group and time")]
    GroupTimeMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    AwaitSecondStep { required: MathSubject },
    CompletePair,
    CompleteSingle,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecideError {
    #[error("student is already registered")]
    DuplicateStudent,

    #[error("group is full")]
    GroupFull,

    #[error("schedule no longer exists")]
    ScheduleNotFound,

    #[error("unexpected backend code: {0}")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted(NextStep),
    Rejected { reason: DecideError },
}
