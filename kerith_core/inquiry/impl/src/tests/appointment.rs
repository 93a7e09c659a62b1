use chrono::NaiveDate;
use kerith_core_inquiry_contracts::{InquiryService, InquirySendError};
use kerith_email_contracts::{ContentType, Email, MockEmailService};
use kerith_models::{inquiry::AppointmentForm, validate::Field};
use kerith_shared_contracts::time::MockTimeService;
use kerith_templates_contracts::{AppointmentTemplate, MockTemplateService};
use kerith_templates_impl::TemplateServiceImpl;
use kerith_utils::assert_matches;
use pretty_assertions::assert_eq;

use super::Sut;
use crate::InquiryServiceImpl;

#[tokio::test]
async fn ok() {
    // Arrange
    let template = MockTemplateService::new().with_render(
        AppointmentTemplate {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            phone: Some("(555) 123-4567".into()),
            event_type: "Wedding".into(),
            event_date: "Saturday, June 14, 2025".into(),
            guest_count: Some(120),
            budget: Some("$25000 - $50000".into()),
            venue: Some("The Orchard House".into()),
            details: "Garden ceremony followed by a reception in the barn.".into(),
            how_heard: Some("Instagram".into()),
        },
        "<html>appointment</html>".into(),
    );

    let email = MockEmailService::new().with_send(
        Email {
            recipient: "team@example.com".parse().unwrap(),
            subject: "New Consultation Request from Jane Doe".into(),
            body: "<html>appointment</html>".into(),
            content_type: ContentType::Html,
            sender_name: Some("Jane Doe".into()),
            reply_to: Some("jane@example.com".parse().unwrap()),
        },
        Ok(()),
    );

    let sut = Sut {
        time: MockTimeService::new().with_today(today()),
        email,
        template,
        config: Default::default(),
    };

    // Act
    let result = sut.send_appointment(form()).await;

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
        .send_appointment(AppointmentForm {
            event_type: String::new(),
            details: String::new(),
            ..form()
        })
        .await;

    // Assert
    assert_matches!(
        result,
        Err(InquirySendError::MissingFields(fields)) if fields == &[Field::EventType, Field::Details]
    );
}

#[tokio::test]
async fn past_event_date() {
    // Arrange
    let sut = Sut {
        time: MockTimeService::new().with_today(today()),
        email: MockEmailService::new(),
        template: MockTemplateService::new(),
        config: Default::default(),
    };

    // Act
    let result = sut
        .send_appointment(AppointmentForm {
            event_date: "2025-01-13".into(),
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
        [(Field::EventDate, "Event date cannot be in the past")]
    );
}

#[tokio::test]
async fn renders_real_template() {
    // Arrange
    let mut email = MockEmailService::new();
    email
        .expect_send()
        .once()
        .withf(|email| {
            email.body.contains("$10000 - $25000")
                && !email.body.contains(">Venue<")
                && !email.body.contains("Phone Number")
                && email.body.contains("Not specified")
                && email.body.contains("First line<br>Second line, with more words")
                && !email.body.contains("<script>")
        })
        .return_once(|_| Box::pin(std::future::ready(Ok(()))));

    let sut = InquiryServiceImpl {
        time: MockTimeService::new().with_today(today()),
        email,
        template: TemplateServiceImpl::new().unwrap(),
        config: Default::default(),
    };

    // Act
    let result = sut
        .send_appointment(AppointmentForm {
            phone: String::new(),
            event_date: String::new(),
            budget: "10000-25000".into(),
            venue: " ".into(),
            details: "First line\nSecond line, with more words <script>".into(),
            ..form()
        })
        .await;

    // Assert
    result.unwrap();
}

#[tokio::test]
async fn event_date_one_day_behind_server() {
    // Arrange
    let mut email = MockEmailService::new();
    email
        .expect_send()
        .once()
        .withf(|email| email.body.contains("Tuesday, January 14, 2025"))
        .return_once(|_| Box::pin(std::future::ready(Ok(()))));

    let sut = InquiryServiceImpl {
        time: MockTimeService::new().with_today(today()),
        email,
        template: TemplateServiceImpl::new().unwrap(),
        config: Default::default(),
    };

    // Act
    let result = sut
        .send_appointment(AppointmentForm {
            event_date: "2025-01-14".into(),
            ..form()
        })
        .await;

    // Assert
    result.unwrap();
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

fn form() -> AppointmentForm {
    AppointmentForm {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        email: "jane@example.com".into(),
        phone: "(555) 123-4567".into(),
        event_type: "Wedding".into(),
        event_date: "2025-06-14".into(),
        guest_count: "120".into(),
        budget: "25000-50000".into(),
        venue: "The Orchard House".into(),
        details: "Garden ceremony followed by a reception in the barn.".into(),
        how_heard: "instagram".into(),
    }
}
