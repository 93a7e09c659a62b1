//! Turns validated submissions into display ready notification templates.

use chrono::NaiveDate;
use kerith_models::inquiry::{AppointmentSubmission, BudgetRange, ContactSubmission};
use kerith_templates_contracts::{AppointmentTemplate, ContactTemplate};

pub const DATE_NOT_SPECIFIED: &str = "Not specified";

pub fn contact_subject(submission: &ContactSubmission) -> String {
    format!("New Contact Form Submission from {}", submission.name)
}

pub fn appointment_subject(submission: &AppointmentSubmission) -> String {
    format!(
        "New Consultation Request from {} {}",
        submission.first_name, submission.last_name
    )
}

pub fn contact_template(submission: &ContactSubmission) -> ContactTemplate {
    ContactTemplate {
        name: submission.name.clone(),
        email: submission.email.to_string(),
        phone: submission.phone.clone(),
        message: submission.message.clone(),
    }
}

pub fn appointment_template(submission: &AppointmentSubmission) -> AppointmentTemplate {
    AppointmentTemplate {
        full_name: submission.full_name(),
        email: submission.email.to_string(),
        phone: submission.phone.clone(),
        event_type: submission.event_type.to_string(),
        event_date: format_event_date(submission.event_date),
        guest_count: submission.guest_count.map(|x| x.get()),
        budget: submission.budget.map(format_budget),
        venue: submission.venue.clone(),
        details: submission.details.clone(),
        how_heard: submission
            .how_heard
            .map(|source| capitalize(source.as_str())),
    }
}

/// `10000-25000` becomes `$10000 - $25000`, open ended ranges like `100000+`
/// just get the currency sign.
pub fn format_budget(budget: BudgetRange) -> String {
    match budget.as_str().split_once('-') {
        Some((from, to)) => format!("${from} - ${to}"),
        None => format!("${budget}"),
    }
}

/// Formats the date like `Wednesday, January 1, 2025`.
pub fn format_event_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(date) => date.format("%A, %B %-d, %Y").to_string(),
        None => DATE_NOT_SPECIFIED.into(),
    }
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
