use std::{str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Local part, `@`, domain and tld, without whitespace on either side of the `@`.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid email address")]
pub struct InvalidEmailAddress;

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EmailAddress {
    type Err = InvalidEmailAddress;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EMAIL_REGEX
            .is_match(s)
            .then(|| Self(s.into()))
            .ok_or(InvalidEmailAddress)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = InvalidEmailAddress;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if EMAIL_REGEX.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidEmailAddress)
        }
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        for (input, ok) in [
            ("jane@example.com", true),
            ("jane.doe+events@mail.example.co.uk", true),
            ("jane@example", false),
            ("jane.example.com", false),
            ("jane @example.com", false),
            ("jane@ example.com", false),
            ("@example.com", false),
            ("jane@.com", false),
            ("", false),
        ] {
            assert_eq!(input.parse::<EmailAddress>().is_ok(), ok, "{input:?}");
        }
    }

    #[test]
    fn deserialize_validates() {
        let err = serde_json::from_str::<EmailAddress>(r#""not an email""#);
        assert!(err.is_err());

        let ok = serde_json::from_str::<EmailAddress>(r#""jane@example.com""#).unwrap();
        assert_eq!(ok.as_str(), "jane@example.com");
    }
}
