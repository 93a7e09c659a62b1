use std::sync::Arc;

use chrono::Days;
use kerith_core_inquiry_contracts::{InquiryService, InquirySendError};
use kerith_email_contracts::{ContentType, Email, EmailSendError, EmailService};
use kerith_models::{
    email_address::EmailAddress,
    inquiry::{AppointmentForm, ContactForm},
};
use kerith_shared_contracts::time::TimeService;
use kerith_templates_contracts::TemplateService;
use tracing::info;

pub mod compose;

/// Visitors west of the server may still be on the previous day, so event
/// dates are checked against the server date minus this tolerance.
pub const EVENT_DATE_TOLERANCE: Days = Days::new(1);

#[cfg(test)]
mod tests;

#[derive(Debug, Clone)]
pub struct InquiryServiceImpl<Time, Email, Template> {
    pub time: Time,
    pub email: Email,
    pub template: Template,
    pub config: InquiryServiceConfig,
}

#[derive(Debug, Clone)]
pub struct InquiryServiceConfig {
    /// Address all inquiries are delivered to.
    pub recipient: Option<Arc<EmailAddress>>,
}

impl<Time, EmailS, Template> InquiryServiceImpl<Time, EmailS, Template>
where
    EmailS: EmailService,
{
    async fn deliver(
        &self,
        subject: String,
        body: String,
        sender_name: String,
        reply_to: EmailAddress,
    ) -> Result<(), InquirySendError> {
        let recipient = self
            .config
            .recipient
            .as_deref()
            .cloned()
            .ok_or(EmailSendError::NotConfigured)?;

        self.email
            .send(Email {
                recipient,
                subject,
                body,
                content_type: ContentType::Html,
                sender_name: Some(sender_name),
                reply_to: Some(reply_to),
            })
            .await
            .map_err(Into::into)
    }
}

impl<Time, EmailS, Template> InquiryService for InquiryServiceImpl<Time, EmailS, Template>
where
    Time: TimeService,
    EmailS: EmailService,
    Template: TemplateService,
{
    async fn send_contact(&self, form: ContactForm) -> Result<(), InquirySendError> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(InquirySendError::MissingFields(missing));
        }

        let submission = form.validate().map_err(InquirySendError::Invalid)?;

        let subject = compose::contact_subject(&submission);
        let body = self
            .template
            .render(&compose::contact_template(&submission))?;

        self.deliver(subject, body, submission.name, submission.email)
            .await?;

        info!("Forwarded contact form submission");
        Ok(())
    }

    async fn send_appointment(&self, form: AppointmentForm) -> Result<(), InquirySendError> {
        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(InquirySendError::MissingFields(missing));
        }

        let today = self.time.today();
        let earliest = today
            .checked_sub_days(EVENT_DATE_TOLERANCE)
            .unwrap_or(today);
        let submission = form
            .validate(earliest)
            .map_err(InquirySendError::Invalid)?;

        let subject = compose::appointment_subject(&submission);
        let body = self
            .template
            .render(&compose::appointment_template(&submission))?;

        self.deliver(subject, body, submission.full_name(), submission.email)
            .await?;

        info!(event_type = %submission.event_type, "Forwarded consultation request");
        Ok(())
    }
}
