// Registration page controller.
//
// Purpose
// - Owns the state of one visitor's registration form: the schedule cache, the cascading
//   selection, the identity fields, the submit control and the pending math checkpoint.
//
// Responsibilities
// - Load the cache on open and restore a pending checkpoint (prefill + lock).
// - Recompute every dropdown after each selection change.
// - Validate, submit, and route the outcome through the single or two-step math flow.
// - Restore the submit control whatever the outcome.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::modules::registration::adapters::outbound::checkpoint_store::{
    CheckpointError, CheckpointStore,
};
use crate::modules::registration::core::cascade::{CascadeOptions, cascade};
use crate::modules::registration::core::checkpoint::{BookingSummary, PendingRegistration};
use crate::modules::registration::core::fees::{FeeQuote, quote};
use crate::modules::registration::core::math::{MathSubject, is_math_registration};
use crate::modules::registration::core::offering::Offering;
use crate::modules::registration::core::schedule_cache::{CacheStatus, ScheduleCache};
use crate::modules::registration::core::selection::{Selection, SelectionChange};
use crate::modules::registration::use_cases::load_offerings::handler::LoadOfferingsHandler;
use crate::modules::registration::use_cases::load_offerings::source_port::OfferingSource;
use crate::modules::registration::use_cases::submit_registration::command::{
    RegisterStudent, StudentDetails,
};
use crate::modules::registration::use_cases::submit_registration::decide::{
    decide_after_submit, validate_submission,
};
use crate::modules::registration::use_cases::submit_registration::decision::{
    DecideError, Decision, NextStep, ValidationError,
};
use crate::modules::registration::use_cases::submit_registration::gateway_port::RegistrationGateway;
use crate::shared::core::time_label::time_label;

pub const SUBMIT_LABEL: &str = "Register";
pub const SUBMITTING_LABEL: &str = "Registering...";
pub const GROUP_FULL_MESSAGE: &str =
    "Sorry, this group is full. Please choose another group.";
pub const SCHEDULE_NOT_FOUND_MESSAGE: &str =
    "This group is no longer available. Please choose another group.";
pub const GENERIC_FAILURE_MESSAGE: &str = "An unexpected error occurred. Please try again.";

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    #[error("{0}")]
    NotLoaded(String),

    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: String,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            disabled: false,
            label: SUBMIT_LABEL.to_string(),
        }
    }
}

/// Disables the control for its lifetime. Dropping it restores the default state, even
/// when the surrounding future is cancelled.
struct InFlight<'a>(&'a mut SubmitControl);

impl<'a> InFlight<'a> {
    fn engage(control: &'a mut SubmitControl) -> Self {
        control.disabled = true;
        control.label = SUBMITTING_LABEL.to_string();
        Self(control)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = SubmitControl::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationSummary {
    pub student_name: String,
    pub student_phone: String,
    pub parent_phone: String,
    pub grade_name: String,
    pub material_name: String,
    pub center_name: String,
    pub group_name: String,
    pub time_label: String,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionReport {
    Invalid {
        errors: Vec<ValidationError>,
    },
    Registered {
        summary: RegistrationSummary,
        fees: FeeQuote,
    },
    /// `resumable` is false when the checkpoint could not be stored: the second step then
    /// has to be finished before the page is reloaded.
    SecondStepRequired {
        first_material: String,
        required_material: String,
        first_booking: BookingSummary,
        resumable: bool,
    },
    PairRegistered {
        student_name: String,
        student_phone: String,
        bookings: Vec<BookingSummary>,
        fees: FeeQuote,
    },
    Duplicate {
        student_phone: String,
    },
    GroupFull {
        message: String,
    },
    ScheduleNotFound {
        message: String,
    },
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingStep {
    pub first_booking: BookingSummary,
    pub required_material: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationView {
    pub options: CascadeOptions,
    pub selection: Selection,
    pub details: StudentDetails,
    pub locked: bool,
    pub pending: Option<PendingStep>,
    pub math_warning: bool,
    pub submit: SubmitControl,
    pub load_error: Option<String>,
}

pub struct RegistrationPage {
    session_id: String,
    loader: LoadOfferingsHandler,
    gateway: Arc<dyn RegistrationGateway>,
    checkpoints: CheckpointStore,
    cache: ScheduleCache,
    selection: Selection,
    options: CascadeOptions,
    details: StudentDetails,
    locked: bool,
    pending: Option<PendingRegistration>,
    submit: SubmitControl,
    load_error: Option<String>,
}

impl RegistrationPage {
    pub fn new(
        session_id: impl Into<String>,
        source: Arc<dyn OfferingSource>,
        gateway: Arc<dyn RegistrationGateway>,
        checkpoints: CheckpointStore,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            loader: LoadOfferingsHandler::new(source),
            gateway,
            checkpoints,
            cache: ScheduleCache::new(),
            selection: Selection::default(),
            options: CascadeOptions::default(),
            details: StudentDetails::default(),
            locked: false,
            pending: None,
            submit: SubmitControl::default(),
            load_error: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// A page load: restores any pending checkpoint, then fetches the cache.
    pub async fn open(&mut self) -> Result<(), WorkflowError> {
        self.pending = None;
        self.locked = false;
        self.details = StudentDetails::default();
        self.selection = Selection::default();
        match self.checkpoints.load(&self.session_id).await {
            Ok(Some(pending)) => {
                info!(session_id = %self.session_id, "restoring pending math registration");
                self.prime_second_step(pending);
            }
            Ok(None) => {}
            Err(err) => {
                warn!(session_id = %self.session_id, error = %err, "pending registration unreadable")
            }
        }

        let loaded = self.loader.handle(&mut self.cache).await;
        self.load_error = match self.cache.status() {
            CacheStatus::Failed(message) => Some(message.clone()),
            _ => None,
        };
        self.recompute();
        loaded.map_err(|_| {
            WorkflowError::NotLoaded(self.load_error.clone().unwrap_or_default())
        })
    }

    /// While a second math step is pending the grade stays pinned to the first booking's.
    pub fn select(&mut self, change: SelectionChange) {
        let pinned = self.pending.as_ref().map(|p| p.grade);
        if matches!(&change, SelectionChange::Grade(grade) if pinned.is_some_and(|g| *grade != Some(g))) {
            warn!(session_id = %self.session_id, "grade change ignored during the second math step");
            return;
        }
        self.selection.apply(change);
        self.recompute();
    }

    /// Locked identity fields keep their prefilled values.
    pub fn edit_details(&mut self, details: StudentDetails) {
        if self.locked {
            self.details.transaction_id = details.transaction_id;
        } else {
            self.details = details;
        }
    }

    pub fn view(&self) -> RegistrationView {
        RegistrationView {
            options: self.options.clone(),
            selection: self.selection.clone(),
            details: self.details.clone(),
            locked: self.locked,
            pending: self.pending.as_ref().map(|p| PendingStep {
                first_booking: p.first_booking.clone(),
                required_material: MathSubject::detect(&p.first_booking.material_name)
                    .map(|s| s.paired().display_name().to_string()),
            }),
            math_warning: self.math_warning(),
            submit: self.submit.clone(),
            load_error: self.load_error.clone(),
        }
    }

    pub async fn submit(&mut self) -> Result<SubmissionReport, WorkflowError> {
        let submission = match validate_submission(&self.details, &self.selection, &self.cache) {
            Ok(submission) => submission,
            Err(errors) => return Ok(SubmissionReport::Invalid { errors }),
        };

        let result = {
            let _in_flight = InFlight::engage(&mut self.submit);
            self.gateway.submit(&submission.command).await
        };
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(session_id = %self.session_id, error = %err, "registration submit failed");
                return Ok(SubmissionReport::Failed {
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                });
            }
        };

        let offering = submission.offering;
        let command = submission.command;
        let material_name = offering.material_name().to_string();
        let math = if is_math_registration(offering.grade, &material_name) {
            MathSubject::detect(&material_name)
        } else {
            None
        };
        let booking = BookingSummary {
            material_name: material_name.clone(),
            group_name: offering.group_name.clone(),
            time_label: time_label(&offering.time_slot),
        };

        match decide_after_submit(outcome, math, self.pending.is_some()) {
            Decision::Accepted(NextStep::AwaitSecondStep { required }) => {
                let pending = PendingRegistration {
                    student_name: command.student_name,
                    student_phone: command.student_phone,
                    parent_phone: command.parent_phone,
                    grade: offering.grade,
                    center_id: offering.center.id.clone(),
                    first_material_id: offering
                        .material
                        .as_ref()
                        .map(|m| m.id.clone())
                        .unwrap_or_default(),
                    first_booking: booking.clone(),
                };
                let resumable = match self.checkpoints.save(&self.session_id, &pending).await {
                    Ok(()) => true,
                    Err(err) => {
                        error!(session_id = %self.session_id, error = %err, "could not persist pending registration");
                        false
                    }
                };
                info!(session_id = %self.session_id, first = %material_name, resumable, "awaiting second math registration");
                self.prime_second_step(pending);
                self.recompute();
                Ok(SubmissionReport::SecondStepRequired {
                    first_material: material_name,
                    required_material: required.display_name().to_string(),
                    first_booking: booking,
                    resumable,
                })
            }
            Decision::Accepted(NextStep::CompletePair) => {
                let first = self
                    .pending
                    .as_ref()
                    .map(|p| p.first_booking.clone())
                    .unwrap_or_else(|| booking.clone());
                let fees = quote(
                    offering.grade,
                    [first.material_name.as_str(), material_name.as_str()],
                );
                info!(session_id = %self.session_id, "math pair registered");
                self.reset_after_success().await;
                Ok(SubmissionReport::PairRegistered {
                    student_name: command.student_name,
                    student_phone: command.student_phone,
                    bookings: vec![first, booking],
                    fees,
                })
            }
            Decision::Accepted(NextStep::CompleteSingle) => {
                let summary = self.summary_for(&offering, command, booking);
                let fees = quote(offering.grade, [material_name.as_str()]);
                info!(session_id = %self.session_id, offering = %offering.id, "student registered");
                self.reset_after_success().await;
                Ok(SubmissionReport::Registered { summary, fees })
            }
            Decision::Rejected { reason } => {
                Ok(self.report_rejection(reason, command.student_phone))
            }
        }
    }

    /// Abandons the pending second step and starts over.
    pub async fn cancel_pending(&mut self) -> Result<(), WorkflowError> {
        self.checkpoints.clear(&self.session_id).await?;
        self.reset_form();
        Ok(())
    }

    fn report_rejection(&self, reason: DecideError, student_phone: String) -> SubmissionReport {
        match reason {
            DecideError::DuplicateStudent => {
                warn!(session_id = %self.session_id, "duplicate registration rejected");
                SubmissionReport::Duplicate { student_phone }
            }
            DecideError::GroupFull => SubmissionReport::GroupFull {
                message: GROUP_FULL_MESSAGE.to_string(),
            },
            DecideError::ScheduleNotFound => SubmissionReport::ScheduleNotFound {
                message: SCHEDULE_NOT_FOUND_MESSAGE.to_string(),
            },
            DecideError::Unknown(code) => {
                error!(session_id = %self.session_id, %code, "unexpected registration outcome");
                SubmissionReport::Failed {
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                }
            }
        }
    }

    fn summary_for(
        &self,
        offering: &Offering,
        command: RegisterStudent,
        booking: BookingSummary,
    ) -> RegistrationSummary {
        RegistrationSummary {
            student_name: command.student_name,
            student_phone: command.student_phone,
            parent_phone: command.parent_phone,
            grade_name: offering.grade.display_name().to_string(),
            material_name: booking.material_name,
            center_name: self
                .cache
                .center_name(&offering.center.id)
                .unwrap_or(&offering.center.name)
                .to_string(),
            group_name: booking.group_name,
            time_label: booking.time_label,
            transaction_id: command.transaction_id,
        }
    }

    /// Prefills and locks the identity fields; keeps center and grade, clears the rest.
    fn prime_second_step(&mut self, pending: PendingRegistration) {
        self.details = StudentDetails {
            student_name: pending.student_name.clone(),
            student_phone: pending.student_phone.clone(),
            parent_phone: pending.parent_phone.clone(),
            transaction_id: None,
        };
        self.selection.clear_subject();
        self.selection.center = Some(pending.center_id.clone());
        self.selection.grade = Some(pending.grade);
        self.locked = true;
        self.pending = Some(pending);
    }

    async fn reset_after_success(&mut self) {
        if self.pending.is_some() {
            if let Err(err) = self.checkpoints.clear(&self.session_id).await {
                error!(session_id = %self.session_id, error = %err, "could not clear pending registration");
            }
        }
        self.reset_form();
    }

    fn reset_form(&mut self) {
        self.pending = None;
        self.locked = false;
        self.details = StudentDetails::default();
        self.selection = Selection::default();
        self.recompute();
    }

    fn recompute(&mut self) {
        let excluded = self.pending.as_ref().map(|p| p.first_material_id.as_str());
        let result = cascade(&self.cache, &self.selection, excluded);
        self.selection = result.selection;
        self.options = result.options;
    }

    fn math_warning(&self) -> bool {
        if self.pending.is_some() {
            return false;
        }
        let (Some(grade), Some(material)) = (self.selection.grade, &self.selection.material) else {
            return false;
        };
        self.options
            .materials
            .iter()
            .find(|m| &m.value == material)
            .is_some_and(|m| is_math_registration(grade, &m.label))
    }
}
