//! Client-side behaviour of the multi-step booking form.
//!
//! The flow starts at [`BookingStep::Identity`]. [`BookingFlow::next`] only
//! advances after the fields of the current step validate, so a step is never
//! skipped even if later fields are already filled in. Going back keeps the
//! recorded errors of later steps untouched; they are re-validated only when
//! the visitor reaches those steps again.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    inquiry::{AppointmentForm, AppointmentSubmission, BookingStep},
    validate::{Field, ValidationErrors},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingFlow {
    step: BookingStep,
    form: AppointmentForm,
    errors: ValidationErrors,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingFlowError {
    #[error("The booking form can only be submitted from the last step.")]
    NotLastStep(BookingStep),
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            step: BookingStep::Identity,
            form: AppointmentForm::default(),
            errors: ValidationErrors::new(),
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn form(&self) -> &AppointmentForm {
        &self.form
    }

    /// Errors currently displayed next to the fields.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Updates a field and clears its displayed error.
    pub fn update(&mut self, field: Field, value: impl Into<String>) {
        if self.form.set(field, value) {
            self.errors.remove(field);
        }
    }

    /// Validates the current step and advances to the next one.
    ///
    /// On the last step this only validates. The returned errors replace the
    /// displayed ones.
    pub fn next(&mut self, today: NaiveDate) -> Result<BookingStep, ValidationErrors> {
        self.validate_current(today)?;
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    /// Returns to the previous step without validating anything.
    pub fn back(&mut self) -> BookingStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Validates the last step and produces the submission for the
    /// appointment endpoint.
    pub fn submit(&mut self, today: NaiveDate) -> Result<AppointmentSubmission, BookingFlowError> {
        if self.step != BookingStep::Details {
            return Err(BookingFlowError::NotLastStep(self.step));
        }

        self.validate_current(today)?;
        self.form.validate(today).map_err(|errors| {
            self.errors = errors.clone();
            errors.into()
        })
    }

    fn validate_current(&mut self, today: NaiveDate) -> Result<(), ValidationErrors> {
        match self.form.validate_step(self.step, today) {
            Ok(()) => {
                self.errors = ValidationErrors::new();
                Ok(())
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }
}
