use std::{num::NonZeroU32, str::FromStr};

use chrono::NaiveDate;
use thiserror::Error;

use crate::{
    email_address::EmailAddress,
    validate::{self, Field, ValidationErrors},
};

macro_rules! choice {
    ($(#[$meta:meta])* $vis:vis enum $ident:ident { $($variant:ident => $token:literal,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $ident {
            $($variant,)*
        }

        impl $ident {
            pub const ALL: &[Self] = &[$(Self::$variant,)*];

            /// The token submitted by the form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $token,)*
                }
            }
        }

        impl FromStr for $ident {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok(Self::$variant),)*
                    _ => Err(UnknownChoice),
                }
            }
        }

        impl std::fmt::Display for $ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.as_str().fmt(f)
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown choice")]
pub struct UnknownChoice;

choice! {
    pub enum EventType {
        Wedding => "Wedding",
        BabyShower => "Baby Shower",
        BirthdayCelebration => "Birthday Celebration",
        CorporateEvent => "Corporate Event",
        Anniversary => "Anniversary",
        SocialGathering => "Social Gathering",
        Other => "Other",
    }
}

choice! {
    /// Budget buckets offered by the booking form, as `min-max` or `min+`.
    pub enum BudgetRange {
        From5000To10000 => "5000-10000",
        From10000To25000 => "10000-25000",
        From25000To50000 => "25000-50000",
        From50000To100000 => "50000-100000",
        Over100000 => "100000+",
    }
}

choice! {
    /// How the client heard about the business.
    pub enum ReferralSource {
        Instagram => "instagram",
        Facebook => "facebook",
        Google => "google",
        Referral => "referral",
        Vendor => "vendor",
        Other => "other",
    }
}

/// Raw values of the contact form, as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub message: String,
}

impl ContactForm {
    /// Returns the required fields which are empty.
    pub fn missing_fields(&self) -> Vec<Field> {
        missing(&[
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Message, &self.message),
        ])
    }

    pub fn validate(&self) -> Result<ContactSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors.check(Field::Name, validate::name(&self.name, "Name"));
        let email = errors.check(Field::Email, validate::email(&self.email));
        let phone = errors.check(Field::Phone, validate::phone(&self.phone));
        let message = errors.check(Field::Message, validate::contact_message(&self.message));

        match (name, email, phone, message) {
            (Some(name), Some(email), Some(phone), Some(message)) => Ok(ContactSubmission {
                name,
                email,
                phone,
                message,
            }),
            _ => Err(errors),
        }
    }
}

/// Raw values of the booking form, as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub event_date: String,
    pub guest_count: String,
    pub budget: String,
    pub venue: String,
    pub details: String,
    pub how_heard: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: EmailAddress,
    pub phone: Option<String>,
    pub event_type: EventType,
    pub event_date: Option<NaiveDate>,
    pub guest_count: Option<NonZeroU32>,
    pub budget: Option<BudgetRange>,
    pub venue: Option<String>,
    pub details: String,
    pub how_heard: Option<ReferralSource>,
}

impl AppointmentSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The three groups of the booking form. Each group gates advancement to the
/// next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookingStep {
    /// Name, email and phone.
    Identity,
    /// Event type, date, guest count and budget.
    Event,
    /// Venue, details and how the client heard about us.
    Details,
}

impl BookingStep {
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Identity => Some(Self::Event),
            Self::Event => Some(Self::Details),
            Self::Details => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            Self::Identity => None,
            Self::Event => Some(Self::Identity),
            Self::Details => Some(Self::Event),
        }
    }
}

struct Identity {
    first_name: String,
    last_name: String,
    email: EmailAddress,
    phone: Option<String>,
}

struct EventInfo {
    event_type: EventType,
    event_date: Option<NaiveDate>,
    guest_count: Option<NonZeroU32>,
    budget: Option<BudgetRange>,
}

struct Details {
    venue: Option<String>,
    details: String,
    how_heard: Option<ReferralSource>,
}

impl AppointmentForm {
    /// Returns the required fields which are empty.
    pub fn missing_fields(&self) -> Vec<Field> {
        missing(&[
            (Field::FirstName, &self.first_name),
            (Field::LastName, &self.last_name),
            (Field::Email, &self.email),
            (Field::EventType, &self.event_type),
            (Field::Details, &self.details),
        ])
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.field(field).map(|x| x.as_str())
    }

    /// Sets the raw value of `field`. Returns `false` if the booking form has
    /// no such field.
    pub fn set(&mut self, field: Field, value: impl Into<String>) -> bool {
        match self.field_mut(field) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Validates the fields of a single step.
    pub fn validate_step(
        &self,
        step: BookingStep,
        today: NaiveDate,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        match step {
            BookingStep::Identity => {
                self.check_identity(&mut errors);
            }
            BookingStep::Event => {
                self.check_event(&mut errors, today);
            }
            BookingStep::Details => {
                self.check_details(&mut errors);
            }
        }
        errors.into_result(())
    }

    /// Validates all steps.
    pub fn validate(&self, today: NaiveDate) -> Result<AppointmentSubmission, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let identity = self.check_identity(&mut errors);
        let event = self.check_event(&mut errors, today);
        let details = self.check_details(&mut errors);

        let (Some(identity), Some(event), Some(details)) = (identity, event, details) else {
            return Err(errors);
        };

        Ok(AppointmentSubmission {
            first_name: identity.first_name,
            last_name: identity.last_name,
            email: identity.email,
            phone: identity.phone,
            event_type: event.event_type,
            event_date: event.event_date,
            guest_count: event.guest_count,
            budget: event.budget,
            venue: details.venue,
            details: details.details,
            how_heard: details.how_heard,
        })
    }

    fn check_identity(&self, errors: &mut ValidationErrors) -> Option<Identity> {
        let first_name = errors.check(
            Field::FirstName,
            validate::name(&self.first_name, "First name"),
        );
        let last_name = errors.check(
            Field::LastName,
            validate::name(&self.last_name, "Last name"),
        );
        let email = errors.check(Field::Email, validate::email(&self.email));
        let phone = errors.check(Field::Phone, validate::phone(&self.phone));

        Some(Identity {
            first_name: first_name?,
            last_name: last_name?,
            email: email?,
            phone: phone?,
        })
    }

    fn check_event(&self, errors: &mut ValidationErrors, today: NaiveDate) -> Option<EventInfo> {
        let event_type = errors.check(Field::EventType, validate::event_type(&self.event_type));
        let event_date = errors.check(
            Field::EventDate,
            validate::event_date(&self.event_date, today),
        );
        let guest_count = errors.check(Field::GuestCount, validate::guest_count(&self.guest_count));
        let budget = errors.check(Field::Budget, validate::budget(&self.budget));

        Some(EventInfo {
            event_type: event_type?,
            event_date: event_date?,
            guest_count: guest_count?,
            budget: budget?,
        })
    }

    fn check_details(&self, errors: &mut ValidationErrors) -> Option<Details> {
        let details = errors.check(Field::Details, validate::booking_details(&self.details));
        let how_heard = errors.check(
            Field::HowHeard,
            validate::referral_source(&self.how_heard),
        );

        Some(Details {
            venue: validate::optional_text(&self.venue),
            details: details?,
            how_heard: how_heard?,
        })
    }

    fn field(&self, field: Field) -> Option<&String> {
        Some(match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::EventType => &self.event_type,
            Field::EventDate => &self.event_date,
            Field::GuestCount => &self.guest_count,
            Field::Budget => &self.budget,
            Field::Venue => &self.venue,
            Field::Details => &self.details,
            Field::HowHeard => &self.how_heard,
            Field::Name | Field::Message => return None,
        })
    }

    fn field_mut(&mut self, field: Field) -> Option<&mut String> {
        Some(match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::EventType => &mut self.event_type,
            Field::EventDate => &mut self.event_date,
            Field::GuestCount => &mut self.guest_count,
            Field::Budget => &mut self.budget,
            Field::Venue => &mut self.venue,
            Field::Details => &mut self.details,
            Field::HowHeard => &mut self.how_heard,
            Field::Name | Field::Message => return None,
        })
    }
}

fn missing(fields: &[(Field, &String)]) -> Vec<Field> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| *field)
        .collect()
}
