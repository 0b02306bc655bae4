use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Ingestion settings.
///
/// Example YAML:
/// ```yaml
/// ingest:
///   signal_window: "14d"
///   percent_confidence: true
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IngestConfig {
    /// Drop signals observed longer ago than this (humantime format, e.g. "14d").
    /// Signals without a timestamp are always kept. Unset keeps everything.
    #[serde(default)]
    pub signal_window: Option<String>,

    /// Read every confidence on a 0-100 scale and divide it by 100.
    /// This applies to all values, so a `1` becomes 0.01 rather than 1.0.
    /// Mixed fraction/percent files are not supported; leave this unset for them.
    #[serde(default)]
    pub percent_confidence: Option<bool>,
}

/// Resolved ingestion settings for a single load.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub signal_window: Option<Duration>,
    pub percent_confidence: bool,
    pub now: DateTime<Utc>,
}

impl IngestOptions {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            signal_window: None,
            percent_confidence: false,
            now,
        }
    }

    /// Oldest timestamp a signal may carry and still be kept.
    ///
    /// A window reaching past the earliest representable time keeps everything.
    pub fn cutoff(&self) -> Option<DateTime<Utc>> {
        self.signal_window.and_then(|window| self.now.checked_sub_signed(window))
    }
}

impl IngestConfig {
    pub fn options(&self, now: DateTime<Utc>) -> Result<IngestOptions> {
        let signal_window = match self.signal_window.as_deref() {
            Some(raw) => Some(parse_window(raw, now)?),
            None => None,
        };
        Ok(IngestOptions {
            signal_window,
            percent_confidence: self.percent_confidence.unwrap_or(false),
            now,
        })
    }
}

fn parse_window(raw: &str, now: DateTime<Utc>) -> Result<Duration> {
    let std_duration = humantime::parse_duration(raw.trim())
        .with_context(|| format!("invalid duration '{}'", raw))?;
    if std_duration.is_zero() {
        anyhow::bail!("duration must be greater than zero");
    }
    let window = Duration::from_std(std_duration)
        .with_context(|| format!("duration '{}' is too large", raw))?;
    if now.checked_sub_signed(window).is_none() {
        anyhow::bail!("duration '{}' is too large", raw);
    }
    Ok(window)
}

/// Validate ingestion settings at startup.
pub fn validate_ingest(config: &IngestConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref window) = config.signal_window {
        if let Err(e) = parse_window(window, Utc::now()) {
            errors.push(format!("ingest.signal_window: {:#}", e));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
