use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

/// Pull the entity records out of an input document: either a bare array or
/// an object with an `entities` array.
pub fn entity_records(document: Value) -> Result<Vec<Value>> {
    match document {
        Value::Array(records) => Ok(records),
        Value::Object(mut fields) => match fields.remove("entities") {
            Some(Value::Array(records)) => Ok(records),
            Some(_) => anyhow::bail!("\"entities\" must be an array"),
            None => anyhow::bail!("expected an \"entities\" array in the top-level object"),
        },
        _ => anyhow::bail!("expected a JSON array or an object with an \"entities\" array"),
    }
}

/// Decode each record separately, so one bad record is reported by position
/// instead of failing the whole document.
pub fn decode_records(records: Vec<Value>) -> Result<Vec<RawEntity>, Vec<String>> {
    let mut errors = Vec::new();
    let mut entities = Vec::with_capacity(records.len());

    for (i, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<RawEntity>(record) {
            Ok(entity) => entities.push(entity),
            Err(e) => errors.push(format!("entities[{}]: {}", i, e)),
        }
    }

    if errors.is_empty() {
        Ok(entities)
    } else {
        Err(errors)
    }
}

// Raw records mirror what extraction and manual entry emit, alternate field
// names included. Nothing here is trusted until `normalize` has run.

#[derive(Debug, Default, Deserialize)]
pub struct RawEntity {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    /// Fallback for `city`
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    /// Fallback for `website`
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub signals: Option<Vec<RawSignal>>,
    #[serde(default)]
    pub contacts: Option<Vec<RawContact>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSignal {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "type")]
    pub signal_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "source_url")]
    pub source: Option<String>,
    #[serde(default, alias = "confidence_score")]
    pub confidence: Option<f64>,
    #[serde(default, alias = "detected_at", alias = "timestamp")]
    pub observed_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawContact {
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "platform")]
    pub channel: Option<String>,
}
