use kerith_models::inquiry::{AppointmentForm, ContactForm};
use serde::{Deserialize, Deserializer};

/// Absent, `null` and empty fields are all treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ApiContactRequest> for ContactForm {
    fn from(value: ApiContactRequest) -> Self {
        Self {
            name: value.name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            phone: value.phone.unwrap_or_default(),
            message: value.message.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAppointmentRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub event_date: Option<String>,
    /// Accepted as JSON string or number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub guest_count: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub how_heard: Option<String>,
}

impl From<ApiAppointmentRequest> for AppointmentForm {
    fn from(value: ApiAppointmentRequest) -> Self {
        Self {
            first_name: value.first_name.unwrap_or_default(),
            last_name: value.last_name.unwrap_or_default(),
            email: value.email.unwrap_or_default(),
            phone: value.phone.unwrap_or_default(),
            event_type: value.event_type.unwrap_or_default(),
            event_date: value.event_date.unwrap_or_default(),
            guest_count: value.guest_count.unwrap_or_default(),
            budget: value.budget.unwrap_or_default(),
            venue: value.venue.unwrap_or_default(),
            details: value.details.unwrap_or_default(),
            how_heard: value.how_heard.unwrap_or_default(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(
        Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
            Raw::Text(text) => text,
            Raw::Integer(number) => number.to_string(),
            Raw::Float(number) => number.to_string(),
        }),
    )
}
