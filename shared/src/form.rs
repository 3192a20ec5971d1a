//! Submission form state machine
//!
//! ```text
//! Editing --submit, invalid--> Editing (field errors)
//! Editing --submit, valid----> Submitting --ok---> Submitted
//!                                         --err--> Editing (toast)
//! ```
//!
//! The transport itself is not owned here: [`SubmitForm::begin_submit`] hands
//! out the payload and [`SubmitForm::finish_submit`] takes the transport's
//! result, so the caller decides how the POST is made.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{SubmissionPayload, SubmitFormValues};
use crate::types::SiteContext;
use crate::validation::{validate_submission, FieldErrors};

pub const SUBMIT_ERROR_MESSAGE: &str = "There was an error submitting your form. Please try again.";

/// How long the failure toast stays on screen
pub const SUBMIT_ERROR_AUTO_HIDE_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    Editing,
    Submitting,
    Submitted,
}

impl std::fmt::Display for FormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormState::Editing => write!(f, "editing"),
            FormState::Submitting => write!(f, "submitting"),
            FormState::Submitted => write!(f, "submitted"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Negative,
}

/// Transient, auto-dismissing notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub auto_hide_ms: u64,
}

impl Toast {
    pub fn submit_failed() -> Self {
        Self {
            kind: ToastKind::Negative,
            message: SUBMIT_ERROR_MESSAGE.to_string(),
            auto_hide_ms: SUBMIT_ERROR_AUTO_HIDE_MS,
        }
    }
}

/// Why the submission POST failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("submission request failed: {0}")]
    Network(String),

    #[error("submission rejected with status {0}")]
    Status(u16),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Validation error: {0}")]
    Invalid(FieldErrors),

    #[error("Form is {0}")]
    NotEditable(FormState),

    #[error("No submission in flight")]
    NotSubmitting,
}

/// Result of a completed submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Carries the values as the user entered them, before transformation
    Submitted(SubmitFormValues),
    Failed(Toast),
}

/// A business submission form and its UI state
#[derive(Debug, Clone)]
pub struct SubmitForm {
    values: SubmitFormValues,
    state: FormState,
    errors: FieldErrors,
    notice: Option<Toast>,
}

impl SubmitForm {
    pub fn new(site: &SiteContext) -> Self {
        Self::with_values(SubmitFormValues::new(site))
    }

    pub fn with_values(values: SubmitFormValues) -> Self {
        Self {
            values,
            state: FormState::Editing,
            errors: FieldErrors::default(),
            notice: None,
        }
    }

    pub fn values(&self) -> &SubmitFormValues {
        &self.values
    }

    /// Mutable access for user edits, only while editing
    pub fn values_mut(&mut self) -> Result<&mut SubmitFormValues, FormError> {
        match self.state {
            FormState::Editing => Ok(&mut self.values),
            other => Err(FormError::NotEditable(other)),
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Inline errors from the last submit attempt
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Notice from the last failed POST
    pub fn notice(&self) -> Option<&Toast> {
        self.notice.as_ref()
    }

    /// Disables the submit control while true
    pub fn is_submitting(&self) -> bool {
        self.state == FormState::Submitting
    }

    /// Validate and, if every rule holds, move to `Submitting` and return the
    /// payload to POST. Invalid input leaves the form editing with errors set.
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, FormError> {
        if self.state != FormState::Editing {
            return Err(FormError::NotEditable(self.state));
        }

        self.notice = None;
        if let Err(errors) = validate_submission(&self.values) {
            self.errors = errors.clone();
            return Err(FormError::Invalid(errors));
        }

        self.errors = FieldErrors::default();
        self.state = FormState::Submitting;
        Ok(self.values.to_payload())
    }

    /// Record the transport result of an in-flight submission
    pub fn finish_submit(
        &mut self,
        result: Result<(), TransportError>,
    ) -> Result<SubmitOutcome, FormError> {
        if self.state != FormState::Submitting {
            return Err(FormError::NotSubmitting);
        }

        match result {
            Ok(()) => {
                self.state = FormState::Submitted;
                Ok(SubmitOutcome::Submitted(self.values.clone()))
            }
            Err(_) => {
                let toast = Toast::submit_failed();
                self.state = FormState::Editing;
                self.notice = Some(toast.clone());
                Ok(SubmitOutcome::Failed(toast))
            }
        }
    }
}
