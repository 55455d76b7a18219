//! Common types and helpers shared across models.

use chrono::{SecondsFormat, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Street address plus map coordinates of a project
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub address: String,
    #[serde(default)]
    pub district: String,
    pub lat: f64,
    pub lng: f64,
}

/// Athens city centre, used when a project is proposed without coordinates
pub const DEFAULT_LAT: f64 = 37.9755;
pub const DEFAULT_LNG: f64 = 23.7348;

impl Default for Location {
    fn default() -> Self {
        Self {
            address: String::new(),
            district: String::new(),
            lat: DEFAULT_LAT,
            lng: DEFAULT_LNG,
        }
    }
}

/// Location as submitted by clients, every part optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocationInput {
    pub address: Option<String>,
    pub district: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl LocationInput {
    pub fn into_location(self) -> Location {
        self.merge_into(Location::default())
    }

    /// Overlay the provided parts on an existing location
    pub fn merge_into(self, base: Location) -> Location {
        Location {
            address: self.address.unwrap_or(base.address),
            district: self.district.unwrap_or(base.district),
            lat: self.lat.unwrap_or(base.lat),
            lng: self.lng.unwrap_or(base.lng),
        }
    }
}

/// Current instant as an RFC 3339 timestamp with millisecond precision
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current UTC date as `YYYY-MM-DD`
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Prefixed random identifier, e.g. `booking-6f1c…`
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

/// Round a monetary amount to cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Accept a number either as a JSON number or as a numeric string.
///
/// Form-driven clients submit amounts like `"250"`. Blank strings are treated
/// as absent so required-field validation reports them as missing.
pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(n)) => Ok(Some(n)),
        Some(NumberOrString::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid number: {}", s)))
        }
    }
}

/// Value of an optional text field, treating blank strings as absent
pub fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
