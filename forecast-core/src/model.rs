use serde::Deserialize;
use std::{fmt, str::FromStr};

use crate::error::ForecastError;

/// Required length of an AccuWeather API key.
pub const API_KEY_LENGTH: usize = 32;

/// Number of digits in a US ZIP code.
pub const POSTAL_CODE_DIGITS: usize = 5;

/// Provider credential. Length is checked once on construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Result<Self, ForecastError> {
        let value = value.into();
        if value.chars().count() != API_KEY_LENGTH {
            return Err(ForecastError::Configuration(format!(
                "Provided API key must be a {API_KEY_LENGTH}-character string."
            )));
        }

        Ok(Self(value))
    }

    /// Raw key, for building outgoing requests only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// A 5-digit US ZIP code, kept as text so leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PostalCode {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != POSTAL_CODE_DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ForecastError::Validation(format!(
                "Only 5-digit zip codes are permitted, got {s:?}"
            )));
        }

        Ok(Self(s.to_owned()))
    }
}

impl TryFrom<&str> for PostalCode {
    type Error = ForecastError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque provider token for a resolved location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct LocationKey(String);

impl LocationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One candidate from the postal code search.
#[derive(Debug, Deserialize)]
pub struct LocationRecord {
    #[serde(rename = "Key")]
    pub key: LocationKey,
}

#[derive(Debug, Deserialize)]
pub struct Headline {
    #[serde(rename = "Text")]
    pub text: String,
}

/// The part of the 1-day forecast payload we consume.
#[derive(Debug, Deserialize)]
pub struct DailyForecast {
    #[serde(rename = "Headline")]
    pub headline: Headline,
}
