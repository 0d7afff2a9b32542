use crate::modules::registration::core::math::MathSubject;
use crate::modules::registration::core::offering::Offering;
use crate::modules::registration::core::outcome::RegistrationOutcome;
use crate::modules::registration::core::schedule_cache::ScheduleCache;
use crate::modules::registration::core::selection::Selection;
use crate::modules::registration::use_cases::submit_registration::command::{
    RegisterStudent, StudentDetails,
};
use crate::modules::registration::use_cases::submit_registration::decision::{
    DecideError, Decision, FormField, NextStep, ValidationError,
};

pub const MIN_NAME_LEN: usize = 2;

/// A submission that passed the local checks, with the chosen offering resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub command: RegisterStudent,
    pub offering: Offering,
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 11 && phone.starts_with("01") && phone.chars().all(|c| c.is_ascii_digit())
}

/// Local checks that run before any network call.
pub fn validate_submission(
    details: &StudentDetails,
    selection: &Selection,
    cache: &ScheduleCache,
) -> Result<ValidatedSubmission, Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = details.student_name.trim();
    if name.is_empty() {
        errors.push(ValidationError::Required(FormField::StudentName));
    } else if name.chars().count() < MIN_NAME_LEN {
        errors.push(ValidationError::NameTooShort);
    }
    for (field, phone) in [
        (FormField::StudentPhone, details.student_phone.trim()),
        (FormField::ParentPhone, details.parent_phone.trim()),
    ] {
        if phone.is_empty() {
            errors.push(ValidationError::Required(field));
        } else if !is_valid_phone(phone) {
            errors.push(ValidationError::InvalidPhone(field));
        }
    }
    if selection.center.is_none() {
        errors.push(ValidationError::Required(FormField::Center));
    }
    if selection.grade.is_none() {
        errors.push(ValidationError::Required(FormField::Grade));
    }
    if selection.material.is_none() {
        errors.push(ValidationError::Required(FormField::Material));
    }
    if selection.teacher.is_none() {
        errors.push(ValidationError::Required(FormField::Teacher));
    }
    let offering = selection
        .offering
        .as_deref()
        .and_then(|id| cache.find_offering(id));
    if offering.is_none() {
        errors.push(ValidationError::GroupTimeMissing);
    }

    match offering {
        Some(offering) if errors.is_empty() => Ok(ValidatedSubmission {
            command: RegisterStudent {
                student_name: name.to_string(),
                student_phone: details.student_phone.trim().to_string(),
                parent_phone: details.parent_phone.trim().to_string(),
                transaction_id: details
                    .transaction_id
                    .as_deref()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
                grade: offering.grade,
                center_id: offering.center.id.clone(),
                material_id: offering.material.as_ref().map(|m| m.id.clone()),
                teacher_id: offering.teacher.as_ref().map(|t| t.id.clone()),
                group_name: offering.group_name.clone(),
                time_slot: offering.time_slot.clone(),
            },
            offering: offering.clone(),
        }),
        _ => Err(errors),
    }
}

/// Routes an accepted or rejected submit. `math` is the subject when the submission is
/// one leg of the upper-grade math pair.
pub fn decide_after_submit(
    outcome: RegistrationOutcome,
    math: Option<MathSubject>,
    has_pending: bool,
) -> Decision {
    match outcome {
        RegistrationOutcome::Success => match (math, has_pending) {
            (Some(subject), false) => Decision::Accepted(NextStep::AwaitSecondStep {
                required: subject.paired(),
            }),
            (Some(_), true) => Decision::Accepted(NextStep::CompletePair),
            (None, _) => Decision::Accepted(NextStep::CompleteSingle),
        },
        RegistrationOutcome::DuplicateStudent => Decision::Rejected {
            reason: DecideError::DuplicateStudent,
        },
        RegistrationOutcome::GroupFull => Decision::Rejected {
            reason: DecideError::GroupFull,
        },
        RegistrationOutcome::ScheduleNotFound => Decision::Rejected {
            reason: DecideError::ScheduleNotFound,
        },
        RegistrationOutcome::Unknown(code) => Decision::Rejected {
            reason: DecideError::Unknown(code),
        },
    }
}
