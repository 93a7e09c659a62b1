//! Field validators shared by the contact form, the booking flow and the
//! submission endpoints.
//!
//! Every validator is a pure function of its input. On success it returns the
//! normalized value, on failure the message shown next to the field.

use std::{num::NonZeroU32, str::FromStr, sync::LazyLock};

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::{
    email_address::EmailAddress,
    inquiry::{BudgetRange, EventType, ReferralSource},
};

pub const CONTACT_MESSAGE_MIN_LENGTH: usize = 10;
pub const BOOKING_DETAILS_MIN_LENGTH: usize = 20;

pub const PHONE_MIN_DIGITS: usize = 7;
pub const PHONE_MAX_DIGITS: usize = 14;

/// Optional leading `+`, up to two optionally parenthesized groups and a
/// trailing digit run, separated by `-`, `.` or whitespace.
pub static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\(?[0-9]{1,4}\)?[-\s.]?\(?[0-9]{1,4}\)?[-\s.]?[0-9]{1,9}$").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    FirstName,
    LastName,
    Email,
    Phone,
    Message,
    EventType,
    EventDate,
    GuestCount,
    Budget,
    Venue,
    Details,
    HowHeard,
}

impl Field {
    /// The name of the field in request payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
            Self::EventType => "eventType",
            Self::EventDate => "eventDate",
            Self::GuestCount => "guestCount",
            Self::Budget => "budget",
            Self::Venue => "venue",
            Self::Details => "details",
            Self::HowHeard => "howHeard",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

/// Field-scoped validation failures, at most one message per field, in the
/// order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .0.first().map(|(_, message)| message.as_str()).unwrap_or_default())]
pub struct ValidationErrors(Vec<(Field, String)>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the error of `result` for `field` (unless the field already
    /// failed) and returns the validated value otherwise.
    pub fn check<T>(&mut self, field: Field, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.insert(field, message);
                None
            }
        }
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.0.push((field, message.into()));
        }
    }

    pub fn remove(&mut self, field: Field) {
        self.0.retain(|(f, _)| *f != field);
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn first(&self) -> Option<(Field, &str)> {
        self.0
            .first()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Non-empty after trimming.
pub fn required(value: &str, label: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{label} is required"));
    }
    Ok(value.into())
}

/// A single-line name: runs of whitespace (including line breaks) collapse into
/// one space and other control characters are dropped.
pub fn name(value: &str, label: &str) -> Result<String, String> {
    let value = single_line(value);
    required(&value, label)
}

/// Collapses `value` onto a single line without control characters.
pub fn single_line(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn email(value: &str) -> Result<EmailAddress, String> {
    if value.trim().is_empty() {
        return Err("Email is required".into());
    }
    value
        .parse()
        .map_err(|_| "Please enter a valid email address".into())
}

/// Empty input is accepted, the phone number is optional.
pub fn phone(value: &str) -> Result<Option<String>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let compact = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    let digits = compact.chars().filter(char::is_ascii_digit).count();

    if PHONE_REGEX.is_match(&compact) && (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
        Ok(Some(value.into()))
    } else {
        Err("Please enter a valid phone number".into())
    }
}

/// Trimmed length (in characters) of at least `min`.
pub fn min_length(value: &str, label: &str, min: usize) -> Result<String, String> {
    let value = required(value, label)?;
    if value.chars().count() < min {
        return Err(format!("{label} must be at least {min} characters"));
    }
    Ok(value)
}

pub fn contact_message(value: &str) -> Result<String, String> {
    min_length(value, "Message", CONTACT_MESSAGE_MIN_LENGTH)
}

pub fn booking_details(value: &str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Please share details about your event".into());
    }
    if value.chars().count() < BOOKING_DETAILS_MIN_LENGTH {
        return Err(format!(
            "Please provide more details (at least {BOOKING_DETAILS_MIN_LENGTH} characters)"
        ));
    }
    Ok(value.into())
}

pub fn event_type(value: &str) -> Result<EventType, String> {
    EventType::from_str(value.trim()).map_err(|_| "Please select an event type".into())
}

/// Optional `YYYY-MM-DD` date which must not lie before `today`.
pub fn event_date(value: &str, today: NaiveDate) -> Result<Option<NaiveDate>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| String::from("Please enter a valid event date"))?;
    if date < today {
        return Err("Event date cannot be in the past".into());
    }
    Ok(Some(date))
}

pub fn guest_count(value: &str) -> Result<Option<NonZeroU32>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    value
        .parse::<i64>()
        .ok()
        .and_then(|count| u32::try_from(count).ok())
        .and_then(NonZeroU32::new)
        .map(Some)
        .ok_or_else(|| "Guest count must be a positive number".into())
}

pub fn budget(value: &str) -> Result<Option<BudgetRange>, String> {
    optional_choice(value, "Please select a valid budget range")
}

pub fn referral_source(value: &str) -> Result<Option<ReferralSource>, String> {
    optional_choice(value, "Please select a valid option")
}

/// Trimmed free text, `None` if empty.
pub fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.into())
}

fn optional_choice<T: FromStr>(value: &str, message: &str) -> Result<Option<T>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| message.into())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn required_trims() {
        assert_eq!(required("  Jane ", "Name"), Ok("Jane".into()));
        assert_eq!(required(" \t\n", "Name"), Err("Name is required".into()));
        assert_eq!(
            required("", "First name"),
            Err("First name is required".into())
        );
    }

    #[test]
    fn name_is_single_line() {
        assert_eq!(name("Jane\nDoe", "Name"), Ok("Jane Doe".into()));
        assert_eq!(
            name(" Jane \r\n\t Doe\u{7}", "First name"),
            Ok("Jane Doe".into())
        );
        assert_eq!(name("\u{0}\r\n", "Name"), Err("Name is required".into()));
    }

    #[test]
    fn email_rejects_missing_at_or_dot() {
        for input in [
            "jane.example.com",
            "jane@example",
            "jane@localhost",
            "jane@@example.com",
            "jane doe@example.com",
        ] {
            assert_eq!(
                email(input),
                Err("Please enter a valid email address".into()),
                "{input:?}"
            );
        }
        assert_eq!(email("   "), Err("Email is required".into()));
        assert_eq!(email("jane@example.com").unwrap().as_str(), "jane@example.com");
    }

    #[test]
    fn phone_is_optional() {
        assert_eq!(phone(""), Ok(None));
        assert_eq!(phone("   "), Ok(None));
    }

    #[test]
    fn phone_formats() {
        for input in [
            "(123) 456-7890",
            "123-456-7890",
            "1234567890",
            "+1 123 456 7890",
            "+44 (20) 79460958",
            "555-1234",
        ] {
            assert_eq!(phone(input), Ok(Some(input.into())), "{input:?}");
        }

        for input in [
            "12-34",
            "phone",
            "123456789012345",
            "+1 (123) 456 7890 ext 5",
            "1-2-3",
        ] {
            assert_eq!(
                phone(input),
                Err("Please enter a valid phone number".into()),
                "{input:?}"
            );
        }
    }

    #[test]
    fn contact_message_min_length() {
        assert_eq!(contact_message(""), Err("Message is required".into()));
        assert_eq!(
            contact_message("  too short "),
            Err("Message must be at least 10 characters".into())
        );
        assert_eq!(contact_message("Hello there"), Ok("Hello there".into()));
    }

    #[test]
    fn booking_details_threshold() {
        let nineteen = "a".repeat(19);
        let twenty = "a".repeat(20);
        assert_eq!(
            booking_details(&format!("   {nineteen}   ")),
            Err("Please provide more details (at least 20 characters)".into())
        );
        assert_eq!(booking_details(&twenty), Ok(twenty.clone()));
        assert_eq!(
            booking_details(""),
            Err("Please share details about your event".into())
        );
    }

    #[test]
    fn event_date_not_in_past() {
        let today = date("2025-06-15");
        assert_eq!(event_date("", today), Ok(None));
        assert_eq!(event_date("2025-06-15", today), Ok(Some(today)));
        assert_eq!(
            event_date("2025-06-16", today),
            Ok(Some(date("2025-06-16")))
        );
        assert_eq!(
            event_date("2025-06-14", today),
            Err("Event date cannot be in the past".into())
        );
        assert_eq!(
            event_date("next friday", today),
            Err("Please enter a valid event date".into())
        );
    }

    #[test]
    fn guest_count_positive() {
        assert_eq!(guest_count(""), Ok(None));
        assert_eq!(guest_count(" 120 "), Ok(NonZeroU32::new(120)));
        for input in ["0", "-5", "many", "1.5"] {
            assert_eq!(
                guest_count(input),
                Err("Guest count must be a positive number".into()),
                "{input:?}"
            );
        }
    }

    #[test]
    fn choices() {
        assert_eq!(event_type("Baby Shower"), Ok(EventType::BabyShower));
        assert_eq!(event_type(""), Err("Please select an event type".into()));
        assert_eq!(budget("100000+"), Ok(Some(BudgetRange::Over100000)));
        assert_eq!(budget(""), Ok(None));
        assert_eq!(
            budget("1-2"),
            Err("Please select a valid budget range".into())
        );
        assert_eq!(
            referral_source("instagram"),
            Ok(Some(ReferralSource::Instagram))
        );
        assert_eq!(
            referral_source("tiktok"),
            Err("Please select a valid option".into())
        );
    }

    #[test]
    fn errors_keep_first_message_per_field() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Email, "first");
        errors.insert(Field::Email, "second");
        errors.insert(Field::Name, "name");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get(Field::Email), Some("first"));
        assert_eq!(errors.to_string(), "first");

        errors.remove(Field::Email);
        assert_eq!(errors.first(), Some((Field::Name, "name")));
    }
}
