use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A prospective lead with everything observed about it so far.
///
/// Descriptive fields pass through untouched; only `signals` and `contacts`
/// feed the engagement score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessEntity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub signals: Vec<Signal>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

impl BusinessEntity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            industry: None,
            country: None,
            city: None,
            description: None,
            website: None,
            created_at: None,
            signals: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Record a new signal. Any previously computed score is stale afterwards.
    pub fn push_signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    /// Record a new contact. Any previously computed score is stale afterwards.
    pub fn push_contact(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// "City, Country", whichever parts are known
    pub fn location(&self) -> String {
        match (self.city.as_deref(), self.country.as_deref()) {
            (Some(city), Some(country)) => format!("{}, {}", city, country),
            (Some(city), None) => city.to_string(),
            (None, Some(country)) => country.to_string(),
            (None, None) => "-".to_string(),
        }
    }
}

/// An observed event suggesting business activity (hiring, expansion, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub signal_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    /// Expected in [0,1]. Absent counts as 0 when averaging.
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub observed_at: Option<DateTime<Utc>>,
}

impl Signal {
    pub fn with_confidence(confidence: f64) -> Self {
        Self {
            confidence: Some(confidence),
            ..Self::default()
        }
    }
}

/// A way of reaching someone at the entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub channel: Option<ContactChannel>,
}

impl Contact {
    pub fn has_email(&self) -> bool {
        is_present(self.email.as_deref())
    }

    pub fn has_phone(&self) -> bool {
        is_present(self.phone.as_deref())
    }

    pub fn is_linkedin(&self) -> bool {
        matches!(self.channel, Some(ContactChannel::Linkedin))
    }
}

// Any non-empty string counts. Blank values are dropped during ingestion.
fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Channel tag attached to a contact.
///
/// Parsing normalizes the tag: it is trimmed and matched case-insensitively,
/// so `"LinkedIn"` and `" linkedin "` both become `Linkedin`. Anything
/// unrecognized is kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContactChannel {
    Linkedin,
    Email,
    Phone,
    Other(String),
}

impl From<&str> for ContactChannel {
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "linkedin" => ContactChannel::Linkedin,
            "email" => ContactChannel::Email,
            "phone" | "sms" => ContactChannel::Phone,
            _ => ContactChannel::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for ContactChannel {
    fn from(s: String) -> Self {
        ContactChannel::from(s.as_str())
    }
}

impl From<ContactChannel> for String {
    fn from(channel: ContactChannel) -> Self {
        channel.to_string()
    }
}

impl fmt::Display for ContactChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactChannel::Linkedin => f.write_str("linkedin"),
            ContactChannel::Email => f.write_str("email"),
            ContactChannel::Phone => f.write_str("phone"),
            ContactChannel::Other(tag) => f.write_str(tag),
        }
    }
}
