use std::future::Future;

use kerith_email_contracts::EmailSendError;
use kerith_models::{
    inquiry::{AppointmentForm, ContactForm},
    validate::{Field, ValidationErrors},
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait InquiryService: Send + Sync + 'static {
    /// Validate a contact form submission and forward it to the team.
    fn send_contact(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<(), InquirySendError>> + Send;

    /// Validate a consultation request and forward it to the team.
    fn send_appointment(
        &self,
        form: AppointmentForm,
    ) -> impl Future<Output = Result<(), InquirySendError>> + Send;
}

#[derive(Debug, Error)]
pub enum InquirySendError {
    /// At least one of the hard required fields is empty.
    #[error("Missing required fields")]
    MissingFields(Vec<Field>),
    #[error(transparent)]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Send(#[from] EmailSendError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockInquiryService {
    pub fn with_send_contact(
        mut self,
        form: ContactForm,
        result: Result<(), InquirySendError>,
    ) -> Self {
        self.expect_send_contact()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_send_appointment(
        mut self,
        form: AppointmentForm,
        result: Result<(), InquirySendError>,
    ) -> Self {
        self.expect_send_appointment()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
