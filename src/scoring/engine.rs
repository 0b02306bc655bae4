use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entity::BusinessEntity;

/// Signals beyond this count earn no additional volume points.
pub const SIGNAL_VOLUME_CAP: usize = 5;
pub const SIGNAL_VOLUME_MAX_POINTS: f64 = 40.0;
pub const CONFIDENCE_MAX_POINTS: f64 = 25.0;
pub const CONTACT_MAX_POINTS: f64 = 20.0;
pub const CONTACT_INDICATOR_POINTS: f64 = 5.0;
pub const INTERACTION_MAX_POINTS: f64 = 15.0;
pub const MAX_SCORE: u32 = 100;

/// Points earned by each of the four sub-scores.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScoreComponents {
    pub signal_volume: f64, // 0..=40
    pub confidence: f64,    // 0..=25 for well-formed confidences
    pub contact: f64,       // 0..=20
    pub interaction: f64,   // 0..=15, currently always 0
}

impl ScoreComponents {
    pub fn total(&self) -> f64 {
        self.signal_volume + self.confidence + self.contact + self.interaction
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementBreakdown {
    pub signal_count: usize,
    pub confidence_avg: f64,
    pub contact_count: usize,
    pub interaction_count: u32,
    pub components: ScoreComponents,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementScore {
    pub business_id: String,
    pub score: u32,
    pub breakdown: EngagementBreakdown,
    pub updated_at: DateTime<Utc>,
}

/// Score an entity, stamping the result with the current time.
pub fn calculate_engagement_score(entity: &BusinessEntity) -> EngagementScore {
    calculate_engagement_score_at(entity, Utc::now())
}

/// Score an entity with an explicit computation timestamp.
///
/// Total over any entity: empty collections score 0 and never divide by zero.
/// Everything except `updated_at` depends only on `signals` and `contacts`.
///
/// The sum of the sub-scores is rounded half away from zero (`f64::round`),
/// so a sum of 43.5 becomes 44. The result is clamped to [0, 100] in case a
/// caller passes confidences outside [0, 1].
pub fn calculate_engagement_score_at(
    entity: &BusinessEntity,
    now: DateTime<Utc>,
) -> EngagementScore {
    let signal_count = entity.signals.len();
    let contact_count = entity.contacts.len();

    let confidence_avg = average_confidence(entity);

    let components = ScoreComponents {
        signal_volume: signal_volume_points(signal_count),
        confidence: confidence_avg * CONFIDENCE_MAX_POINTS,
        contact: contact_points(entity),
        interaction: 0.0,
    };

    let score = components.total().round().clamp(0.0, MAX_SCORE as f64) as u32;

    EngagementScore {
        business_id: entity.id.clone(),
        score,
        breakdown: EngagementBreakdown {
            signal_count,
            confidence_avg,
            contact_count,
            interaction_count: 0,
            components,
            explanation: explain(signal_count, confidence_avg, contact_count),
        },
        updated_at: now,
    }
}

fn signal_volume_points(signal_count: usize) -> f64 {
    let counted = signal_count.min(SIGNAL_VOLUME_CAP);
    counted as f64 / SIGNAL_VOLUME_CAP as f64 * SIGNAL_VOLUME_MAX_POINTS
}

fn average_confidence(entity: &BusinessEntity) -> f64 {
    if entity.signals.is_empty() {
        return 0.0;
    }
    let sum: f64 = entity
        .signals
        .iter()
        .map(|s| s.confidence.unwrap_or(0.0))
        .sum();
    sum / entity.signals.len() as f64
}

fn contact_points(entity: &BusinessEntity) -> f64 {
    let contacts = &entity.contacts;
    let indicators = [
        !contacts.is_empty(),
        contacts.iter().any(|c| c.has_email()),
        contacts.iter().any(|c| c.has_phone()),
        contacts.iter().any(|c| c.is_linkedin()),
    ];
    let hits = indicators.iter().filter(|hit| **hit).count();
    (hits as f64 * CONTACT_INDICATOR_POINTS).min(CONTACT_MAX_POINTS)
}

fn explain(signal_count: usize, confidence_avg: f64, contact_count: usize) -> String {
    let noun = if signal_count == 1 { "signal" } else { "signals" };
    let contact_clause = if contact_count > 0 {
        "verified contacts"
    } else {
        "no contact data"
    };
    format!(
        "Score based on {} {}, {}% avg confidence, and {}.",
        signal_count,
        noun,
        (confidence_avg * 100.0).round() as i64,
        contact_clause
    )
}
