use kerith_core_inquiry_contracts::{InquiryService, InquirySendError};
use kerith_email_contracts::{ContentType, Email, EmailSendError, MockEmailService};
use kerith_models::{inquiry::ContactForm, validate::Field};
use kerith_shared_contracts::time::MockTimeService;
use kerith_templates_contracts::{ContactTemplate, MockTemplateService};
use kerith_utils::assert_matches;
use pretty_assertions::assert_eq;

use super::Sut;
use crate::InquiryServiceConfig;

#[tokio::test]
async fn ok() {
    // Arrange
    let template =
        MockTemplateService::new().with_render(template(), "<html>contact</html>".into());

    let email = MockEmailService::new().with_send(expected_email(), Ok(()));

    let sut = Sut {
        time: MockTimeService::new(),
        email,
        template,
        config: Default::default(),
    };

    // Act
    let result = sut.send_contact(form()).await;

    // Assert
    result.unwrap();
}

#[tokio::test]
async fn missing_fields() {
    // Arrange
    let sut = Sut {
        time: MockTimeService::new(),
        email: MockEmailService::new(),
        template: MockTemplateService::new(),
        config: Default::default(),
    };

    // Act
    let result = sut
        .send_contact(ContactForm {
            name: "  ".into(),
            message: String::new(),
            ..form()
        })
        .await;

    // Assert
    assert_matches!(
        result,
        Err(InquirySendError::MissingFields(fields)) if fields == &[Field::Name, Field::Message]
    );
}

#[tokio::test]
async fn invalid_fields() {
    // Arrange
    let sut = Sut {
        time: MockTimeService::new(),
        email: MockEmailService::new(),
        template: MockTemplateService::new(),
        config: Default::default(),
    };

    // Act
    let result = sut
        .send_contact(ContactForm {
            email: "jane@example".into(),
            message: "Hi there".into(),
            ..form()
        })
        .await;

    // Assert
    let errors = match result {
        Err(InquirySendError::Invalid(errors)) => errors,
        other => panic!("unexpected result {other:?}"),
    };
    assert_eq!(
        errors.iter().collect::<Vec<_>>(),
        [
            (Field::Email, "Please enter a valid email address"),
            (Field::Message, "Message must be at least 10 characters"),
        ]
    );
}

#[tokio::test]
async fn no_recipient() {
    // Arrange
    let sut = Sut {
        time: MockTimeService::new(),
        email: MockEmailService::new(),
        template: MockTemplateService::new()
            .with_render(template(), "<html>contact</html>".into()),
        config: InquiryServiceConfig { recipient: None },
    };

    // Act
    let result = sut.send_contact(form()).await;

    // Assert
    assert_matches!(
        result,
        Err(InquirySendError::Send(EmailSendError::NotConfigured))
    );
}

#[tokio::test]
async fn rejected() {
    // Arrange
    let sut = Sut {
        time: MockTimeService::new(),
        email: MockEmailService::new().with_send(
            expected_email(),
            Err(EmailSendError::Rejected("Sender not verified".into())),
        ),
        template: MockTemplateService::new()
            .with_render(template(), "<html>contact</html>".into()),
        config: Default::default(),
    };

    // Act
    let result = sut.send_contact(form()).await;

    // Assert
    assert_matches!(
        result,
        Err(InquirySendError::Send(EmailSendError::Rejected(detail))) if detail == "Sender not verified"
    );
}

fn form() -> ContactForm {
    ContactForm {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        phone: String::new(),
        message: "I would love to hear about your services.".into(),
    }
}

fn template() -> ContactTemplate {
    ContactTemplate {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        phone: None,
        message: "I would love to hear about your services.".into(),
    }
}

fn expected_email() -> Email {
    Email {
        recipient: "team@example.com".parse().unwrap(),
        subject: "New Contact Form Submission from Jane Doe".into(),
        body: "<html>contact</html>".into(),
        content_type: ContentType::Html,
        sender_name: Some("Jane Doe".into()),
        reply_to: Some("jane@example.com".parse().unwrap()),
    }
}
