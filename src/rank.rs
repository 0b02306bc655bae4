use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;

use crate::entity::BusinessEntity;
use crate::scoring::{calculate_engagement_score_at, EngagementScore, LeadTier, TierThresholds};

pub const TOP_HIGH_POTENTIAL: usize = 4;
pub const TOP_OPPORTUNITIES: usize = 3;

/// An entity with its computed score and tier.
#[derive(Debug, Clone)]
pub struct ScoredLead {
    pub entity: BusinessEntity,
    pub engagement: EngagementScore,
    pub tier: LeadTier,
}

impl ScoredLead {
    pub fn score(&self) -> u32 {
        self.engagement.score
    }
}

/// Score every entity and sort by score descending.
///
/// Ties go to the older entity (missing `created_at` sorts last), then to
/// name, so the order is stable across runs.
pub fn score_entities(
    entities: Vec<BusinessEntity>,
    thresholds: &TierThresholds,
    now: DateTime<Utc>,
) -> Vec<ScoredLead> {
    let mut scored: Vec<ScoredLead> = entities
        .into_iter()
        .map(|entity| {
            let engagement = calculate_engagement_score_at(&entity, now);
            let tier = LeadTier::classify(engagement.score, thresholds);
            ScoredLead {
                entity,
                engagement,
                tier,
            }
        })
        .collect();

    scored.sort_by(compare_leads);
    scored
}

fn compare_leads(a: &ScoredLead, b: &ScoredLead) -> Ordering {
    // Primary: score descending
    b.score()
        .cmp(&a.score())
        .then_with(|| match (a.entity.created_at, b.entity.created_at) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.entity.name.cmp(&b.entity.name))
}

/// Keep leads scoring at least `min_score`
pub fn filter_min_score(leads: Vec<ScoredLead>, min_score: u32) -> Vec<ScoredLead> {
    leads
        .into_iter()
        .filter(|lead| lead.score() >= min_score)
        .collect()
}

/// Keep leads in `tier` or any hotter tier
pub fn filter_tier(leads: Vec<ScoredLead>, tier: LeadTier) -> Vec<ScoredLead> {
    leads
        .into_iter()
        .filter(|lead| lead.tier.at_least(tier))
        .collect()
}

/// Find a lead by its 1-based position in the ranking or by entity id.
pub fn find_lead<'a>(leads: &'a [ScoredLead], key: &str) -> Option<&'a ScoredLead> {
    if let Some(lead) = leads.iter().find(|lead| lead.entity.id == key) {
        return Some(lead);
    }
    match key.parse::<usize>() {
        Ok(index) if index >= 1 => leads.get(index - 1),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCount {
    pub tier: LeadTier,
    pub count: usize,
}

/// Aggregate numbers shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_leads: usize,
    pub total_signals: usize,
    /// Mean score, rounded to one decimal place
    pub average_score: f64,
    pub ready_count: usize,
    /// Share of leads in the ready tier or above, as a whole percentage
    pub ready_percent: u32,
    pub tiers: Vec<TierCount>,
    /// Ids of the top leads above the high-potential threshold
    pub high_potential: Vec<String>,
    /// Ids of the top leads above the opportunity threshold
    pub opportunities: Vec<String>,
}

/// Summarize an already ranked list (see [`score_entities`]).
pub fn summarize(leads: &[ScoredLead]) -> DashboardSummary {
    let total_leads = leads.len();
    let total_signals = leads.iter().map(|l| l.entity.signals.len()).sum();

    let average_score = if total_leads > 0 {
        let sum: u32 = leads.iter().map(|l| l.score()).sum();
        (sum as f64 / total_leads as f64 * 10.0).round() / 10.0
    } else {
        0.0
    };

    let ready_count = leads
        .iter()
        .filter(|l| l.tier.at_least(LeadTier::Ready))
        .count();
    let ready_percent = if total_leads > 0 {
        (ready_count as f64 / total_leads as f64 * 100.0).round() as u32
    } else {
        0
    };

    let tiers = LeadTier::ALL
        .iter()
        .map(|tier| TierCount {
            tier: *tier,
            count: leads.iter().filter(|l| l.tier == *tier).count(),
        })
        .collect();

    let top_ids = |min_tier: LeadTier, limit: usize| -> Vec<String> {
        leads
            .iter()
            .filter(|l| l.tier.at_least(min_tier))
            .take(limit)
            .map(|l| l.entity.id.clone())
            .collect()
    };

    DashboardSummary {
        total_leads,
        total_signals,
        average_score,
        ready_count,
        ready_percent,
        tiers,
        high_potential: top_ids(LeadTier::HighPotential, TOP_HIGH_POTENTIAL),
        opportunities: top_ids(LeadTier::Opportunity, TOP_OPPORTUNITIES),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Contact, ContactChannel, Signal};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap()
    }

    fn full_contacts() -> Vec<Contact> {
        vec![Contact {
            email: Some("info@example.zm".to_string()),
            phone: Some("+260 211 123456".to_string()),
            channel: Some(ContactChannel::Linkedin),
            ..Contact::default()
        }]
    }

    fn lead(id: &str, signals: usize, confidence: f64, with_contacts: bool) -> BusinessEntity {
        let mut entity = BusinessEntity::new(id, format!("Company {}", id));
        entity.signals = (0..signals).map(|_| Signal::with_confidence(confidence)).collect();
        if with_contacts {
            entity.contacts = full_contacts();
        }
        entity
    }

    #[test]
    fn test_sorted_by_score_descending() {
        let entities = vec![
            lead("low", 1, 0.2, false),
            lead("high", 5, 1.0, true),
            lead("mid", 3, 0.5, false),
        ];
        let ranked = score_entities(entities, &TierThresholds::default(), now());
        let ids: Vec<_> = ranked.iter().map(|l| l.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        assert_eq!(ranked[0].score(), 85);
        assert_eq!(ranked[0].tier, LeadTier::Hot);
    }

    #[test]
    fn test_ties_broken_by_age_then_name() {
        let mut older = lead("b", 1, 0.5, false);
        older.created_at = Some(now() - Duration::days(10));
        let mut newer = lead("a", 1, 0.5, false);
        newer.created_at = Some(now() - Duration::days(1));
        let undated_z = lead("z", 1, 0.5, false);
        let undated_c = lead("c", 1, 0.5, false);

        let ranked = score_entities(
            vec![undated_z, newer, undated_c, older],
            &TierThresholds::default(),
            now(),
        );
        let ids: Vec<_> = ranked.iter().map(|l| l.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c", "z"]);
    }

    #[test]
    fn test_filter_min_score() {
        let ranked = score_entities(
            vec![lead("a", 5, 1.0, true), lead("b", 1, 0.0, false)],
            &TierThresholds::default(),
            now(),
        );
        let kept = filter_min_score(ranked, 50);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].entity.id, "a");
    }

    #[test]
    fn test_filter_tier_includes_hotter() {
        // 85 hot, 40+25 = 65 opportunity, 8 cold
        let ranked = score_entities(
            vec![
                lead("hot", 5, 1.0, true),
                lead("opp", 5, 1.0, false),
                lead("cold", 1, 0.0, false),
            ],
            &TierThresholds::default(),
            now(),
        );
        let kept = filter_tier(ranked, LeadTier::Opportunity);
        let ids: Vec<_> = kept.iter().map(|l| l.entity.id.as_str()).collect();
        assert_eq!(ids, vec!["hot", "opp"]);
    }

    #[test]
    fn test_find_lead_by_index_or_id() {
        let ranked = score_entities(
            vec![lead("first", 5, 1.0, true), lead("second", 1, 0.0, false)],
            &TierThresholds::default(),
            now(),
        );
        assert_eq!(find_lead(&ranked, "1").unwrap().entity.id, "first");
        assert_eq!(find_lead(&ranked, "second").unwrap().entity.id, "second");
        assert!(find_lead(&ranked, "0").is_none());
        assert!(find_lead(&ranked, "3").is_none());
        assert!(find_lead(&ranked, "missing").is_none());
    }

    #[test]
    fn test_find_lead_prefers_id_over_index() {
        let ranked = score_entities(
            vec![lead("a", 5, 1.0, true), lead("1", 1, 0.0, false)],
            &TierThresholds::default(),
            now(),
        );
        assert_eq!(find_lead(&ranked, "1").unwrap().entity.id, "1");
    }

    #[test]
    fn test_summary_of_empty_list() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_leads, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.ready_percent, 0);
        assert!(summary.high_potential.is_empty());
        assert!(summary.tiers.iter().all(|t| t.count == 0));
    }

    #[test]
    fn test_summary_numbers() {
        // scores: 85 (hot), 65 (opportunity), 8 (cold)
        let ranked = score_entities(
            vec![
                lead("hot", 5, 1.0, true),
                lead("opp", 5, 1.0, false),
                lead("cold", 1, 0.0, false),
            ],
            &TierThresholds::default(),
            now(),
        );
        let summary = summarize(&ranked);

        assert_eq!(summary.total_leads, 3);
        assert_eq!(summary.total_signals, 11);
        // 158 / 3 = 52.666...
        assert_eq!(summary.average_score, 52.7);
        assert_eq!(summary.ready_count, 1);
        assert_eq!(summary.ready_percent, 33);
        assert_eq!(summary.high_potential, vec!["hot".to_string()]);
        assert_eq!(summary.opportunities, vec!["hot".to_string(), "opp".to_string()]);

        let count_for = |tier: LeadTier| {
            summary
                .tiers
                .iter()
                .find(|t| t.tier == tier)
                .unwrap()
                .count
        };
        assert_eq!(count_for(LeadTier::Hot), 1);
        assert_eq!(count_for(LeadTier::Opportunity), 1);
        assert_eq!(count_for(LeadTier::Cold), 1);
        assert_eq!(count_for(LeadTier::Ready), 0);
    }

    #[test]
    fn test_summary_caps_top_lists() {
        let entities = (0..6).map(|i| lead(&format!("e{}", i), 5, 1.0, true)).collect();
        let ranked = score_entities(entities, &TierThresholds::default(), now());
        let summary = summarize(&ranked);
        assert_eq!(summary.high_potential.len(), TOP_HIGH_POTENTIAL);
        assert_eq!(summary.opportunities.len(), TOP_OPPORTUNITIES);
        assert_eq!(summary.ready_percent, 100);
    }
}
