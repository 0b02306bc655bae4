use chrono::{DateTime, Utc};
use std::collections::HashSet;

use super::config::IngestOptions;
use super::raw::{RawContact, RawEntity, RawSignal};
use crate::entity::{BusinessEntity, Contact, ContactChannel, Signal};

/// Turn raw records into validated entities.
///
/// This is the only place alternate field names, blank strings, and
/// out-of-range confidences are dealt with; everything downstream can rely
/// on the `entity` schema. Returns every problem found, not just the first.
pub fn normalize_entities(
    raw: Vec<RawEntity>,
    options: &IngestOptions,
) -> Result<Vec<BusinessEntity>, Vec<String>> {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut entities = Vec::with_capacity(raw.len());

    for (i, mut record) in raw.into_iter().enumerate() {
        let path = format!("entities[{}]", i);
        let id = clean(record.id.take()).unwrap_or_else(|| format!("entity-{}", i + 1));

        if !seen_ids.insert(id.clone()) {
            errors.push(format!("{}.id: duplicate id '{}'", path, id));
        }

        if let Some(entity) = normalize_entity(id, record, &path, options, &mut errors) {
            entities.push(entity);
        }
    }

    if errors.is_empty() {
        Ok(entities)
    } else {
        Err(errors)
    }
}

fn normalize_entity(
    id: String,
    record: RawEntity,
    path: &str,
    options: &IngestOptions,
    errors: &mut Vec<String>,
) -> Option<BusinessEntity> {
    let name = clean(record.name);
    if name.is_none() {
        errors.push(format!("{}.name: must not be empty", path));
    }

    let created_at = parse_timestamp(record.created_at, &format!("{}.created_at", path), errors);

    let cutoff = options.cutoff();
    let mut signals = Vec::new();
    let mut dropped = 0usize;
    for (j, raw_signal) in record.signals.unwrap_or_default().into_iter().enumerate() {
        let signal_path = format!("{}.signals[{}]", path, j);
        let signal = normalize_signal(raw_signal, &signal_path, options, errors);
        match (cutoff, signal.observed_at) {
            (Some(cutoff), Some(observed)) if observed < cutoff => dropped += 1,
            _ => signals.push(signal),
        }
    }
    if dropped > 0 {
        tracing::debug!(entity = %id, dropped, "dropped signals outside the signal window");
    }

    let contacts = record
        .contacts
        .unwrap_or_default()
        .into_iter()
        .map(normalize_contact)
        .collect();

    Some(BusinessEntity {
        id,
        name: name?,
        industry: clean(record.industry),
        country: clean(record.country),
        city: clean(record.city).or_else(|| clean(record.location)),
        description: clean(record.description),
        website: clean(record.website).or_else(|| clean(record.domain)),
        created_at,
        signals,
        contacts,
    })
}

fn normalize_signal(
    raw: RawSignal,
    path: &str,
    options: &IngestOptions,
    errors: &mut Vec<String>,
) -> Signal {
    Signal {
        id: clean(raw.id),
        signal_type: clean(raw.signal_type),
        description: clean(raw.description),
        source: clean(raw.source),
        confidence: raw
            .confidence
            .and_then(|c| normalize_confidence(c, options.percent_confidence, path)),
        observed_at: parse_timestamp(raw.observed_at, &format!("{}.observed_at", path), errors),
    }
}

fn normalize_contact(raw: RawContact) -> Contact {
    Contact {
        full_name: clean(raw.full_name),
        role: clean(raw.role),
        email: clean(raw.email),
        phone: clean(raw.phone),
        channel: clean(raw.channel).map(ContactChannel::from),
    }
}

/// Bring a confidence into [0, 1]. NaN is treated as absent.
///
/// With `percent` set every value is on a 0-100 scale, so `1` means 1%.
pub fn normalize_confidence(value: f64, percent: bool, path: &str) -> Option<f64> {
    if value.is_nan() {
        tracing::warn!(path, "confidence is NaN, treating as absent");
        return None;
    }

    let scaled = if percent { value / 100.0 } else { value };

    let clamped = scaled.clamp(0.0, 1.0);
    if clamped != scaled {
        tracing::warn!(path, original = value, clamped, "confidence outside [0, 1], clamped");
    }
    Some(clamped)
}

fn parse_timestamp(
    raw: Option<String>,
    path: &str,
    errors: &mut Vec<String>,
) -> Option<DateTime<Utc>> {
    let raw = clean(raw)?;
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            errors.push(format!("{}: invalid RFC 3339 timestamp '{}' - {}", path, raw, e));
            None
        }
    }
}

/// Trim, and treat blank strings as missing
fn clean(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap()
    }

    fn raw_entity(name: &str) -> RawEntity {
        RawEntity {
            name: Some(name.to_string()),
            ..RawEntity::default()
        }
    }

    fn raw_signal(confidence: Option<f64>, observed_at: Option<&str>) -> RawSignal {
        RawSignal {
            confidence,
            observed_at: observed_at.map(str::to_string),
            ..RawSignal::default()
        }
    }

    #[test]
    fn test_missing_collections_become_empty() {
        let entities =
            normalize_entities(vec![raw_entity("Acme")], &IngestOptions::new(now())).unwrap();
        assert_eq!(entities.len(), 1);
        assert!(entities[0].signals.is_empty());
        assert!(entities[0].contacts.is_empty());
    }

    #[test]
    fn test_generated_ids_are_positional() {
        let entities = normalize_entities(
            vec![raw_entity("A"), raw_entity("B")],
            &IngestOptions::new(now()),
        )
        .unwrap();
        assert_eq!(entities[0].id, "entity-1");
        assert_eq!(entities[1].id, "entity-2");
    }

    #[test]
    fn test_explicit_id_is_trimmed() {
        let mut raw = raw_entity("Acme");
        raw.id = Some("  biz-42 ".to_string());
        let entities = normalize_entities(vec![raw], &IngestOptions::new(now())).unwrap();
        assert_eq!(entities[0].id, "biz-42");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut blank = raw_entity("   ");
        blank.id = Some("dup".to_string());
        let mut second = raw_entity("Second");
        second.id = Some("dup".to_string());
        second.created_at = Some("yesterday".to_string());

        let errors =
            normalize_entities(vec![blank, second], &IngestOptions::new(now())).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e == "entities[0].name: must not be empty"));
        assert!(errors.iter().any(|e| e.starts_with("entities[1].id: duplicate id 'dup'")));
        assert!(errors.iter().any(|e| e.starts_with("entities[1].created_at")));
    }

    #[test]
    fn test_explicit_id_kept_with_other_fields() {
        let mut raw = raw_entity("Acme");
        raw.id = Some("biz-7".to_string());
        raw.city = Some("Kitwe".to_string());
        let entities = normalize_entities(vec![raw], &IngestOptions::new(now())).unwrap();
        assert_eq!(entities[0].id, "biz-7");
        assert_eq!(entities[0].name, "Acme");
        assert_eq!(entities[0].city.as_deref(), Some("Kitwe"));
    }

    #[test]
    fn test_city_preferred_over_location() {
        let mut both = raw_entity("Both");
        both.city = Some("Lusaka".to_string());
        both.location = Some("Lusaka, Zambia".to_string());
        both.domain = Some("both.zm".to_string());
        let mut fallback = raw_entity("Fallback");
        fallback.city = Some("  ".to_string());
        fallback.location = Some("Ndola".to_string());

        let entities =
            normalize_entities(vec![both, fallback], &IngestOptions::new(now())).unwrap();
        assert_eq!(entities[0].city.as_deref(), Some("Lusaka"));
        assert_eq!(entities[0].website.as_deref(), Some("both.zm"));
        assert_eq!(entities[1].city.as_deref(), Some("Ndola"));
    }

    #[test]
    fn test_blank_strings_dropped() {
        let mut raw = raw_entity("Acme");
        raw.industry = Some("".to_string());
        raw.contacts = Some(vec![RawContact {
            email: Some("  ".to_string()),
            phone: Some("0977 000000".to_string()),
            channel: Some("LinkedIn".to_string()),
            ..RawContact::default()
        }]);

        let entities = normalize_entities(vec![raw], &IngestOptions::new(now())).unwrap();
        let entity = &entities[0];
        assert!(entity.industry.is_none());
        let contact = &entity.contacts[0];
        assert!(contact.email.is_none());
        assert!(contact.has_phone());
        assert!(contact.is_linkedin());
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(normalize_confidence(1.5, false, "p"), Some(1.0));
        assert_eq!(normalize_confidence(-0.2, false, "p"), Some(0.0));
        assert_eq!(normalize_confidence(0.42, false, "p"), Some(0.42));
        assert_eq!(normalize_confidence(f64::NAN, false, "p"), None);
    }

    #[test]
    fn test_percent_confidence() {
        assert_eq!(normalize_confidence(85.0, true, "p"), Some(0.85));
        assert_eq!(normalize_confidence(250.0, true, "p"), Some(1.0));
        assert_eq!(normalize_confidence(0.0, true, "p"), Some(0.0));
    }

    #[test]
    fn test_percent_scale_applies_to_small_values() {
        // 1 on a percent scale is 1%, not 100%
        assert_eq!(normalize_confidence(1.0, true, "p"), Some(0.01));
        assert_eq!(normalize_confidence(0.5, true, "p"), Some(0.005));
        assert_eq!(normalize_confidence(1.0, false, "p"), Some(1.0));
    }

    #[test]
    fn test_signal_window_drops_old_signals() {
        let mut raw = raw_entity("Acme");
        raw.signals = Some(vec![
            raw_signal(Some(0.9), Some("2026-03-10T00:00:00Z")),
            raw_signal(Some(0.9), Some("2026-01-01T00:00:00Z")),
            raw_signal(Some(0.5), None),
        ]);

        let mut options = IngestOptions::new(now());
        options.signal_window = Some(chrono::Duration::days(14));

        let entities = normalize_entities(vec![raw], &options).unwrap();
        assert_eq!(entities[0].signals.len(), 2);
        assert!(entities[0].signals.iter().all(|s| s
            .observed_at
            .map_or(true, |t| t >= now() - chrono::Duration::days(14))));
    }

    #[test]
    fn test_window_beyond_time_range_keeps_all_signals() {
        let mut raw = raw_entity("Acme");
        raw.signals = Some(vec![raw_signal(Some(0.9), Some("1970-01-01T00:00:00Z"))]);

        let mut options = IngestOptions::new(now());
        options.signal_window = Some(chrono::Duration::days(365 * 1_000_000));

        let entities = normalize_entities(vec![raw], &options).unwrap();
        assert_eq!(entities[0].signals.len(), 1);
    }

    #[test]
    fn test_no_window_keeps_all_signals() {
        let mut raw = raw_entity("Acme");
        raw.signals = Some(vec![
            raw_signal(Some(0.9), Some("2020-01-01T00:00:00Z")),
            raw_signal(None, None),
        ]);
        let entities = normalize_entities(vec![raw], &IngestOptions::new(now())).unwrap();
        assert_eq!(entities[0].signals.len(), 2);
        assert_eq!(entities[0].signals[1].confidence, None);
    }

    #[test]
    fn test_timestamp_offsets_converted_to_utc() {
        let mut raw = raw_entity("Acme");
        raw.created_at = Some("2026-03-01T14:00:00+02:00".to_string());
        let entities = normalize_entities(vec![raw], &IngestOptions::new(now())).unwrap();
        assert_eq!(
            entities[0].created_at,
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap())
        );
    }
}
