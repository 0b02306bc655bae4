use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::config::TierThresholds;

/// Score band a lead falls into, from coldest to hottest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTier {
    Cold,
    Opportunity,
    HighPotential,
    Ready,
    Hot,
}

impl LeadTier {
    pub const ALL: [LeadTier; 5] = [
        LeadTier::Hot,
        LeadTier::Ready,
        LeadTier::HighPotential,
        LeadTier::Opportunity,
        LeadTier::Cold,
    ];

    /// Pick the hottest tier whose threshold the score strictly exceeds.
    pub fn classify(score: u32, thresholds: &TierThresholds) -> Self {
        if score > thresholds.hot {
            LeadTier::Hot
        } else if score > thresholds.ready {
            LeadTier::Ready
        } else if score > thresholds.high_potential {
            LeadTier::HighPotential
        } else if score > thresholds.opportunity {
            LeadTier::Opportunity
        } else {
            LeadTier::Cold
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadTier::Cold => "cold",
            LeadTier::Opportunity => "opportunity",
            LeadTier::HighPotential => "high-potential",
            LeadTier::Ready => "ready",
            LeadTier::Hot => "hot",
        }
    }

    /// True for tiers at or above `other`
    pub fn at_least(&self, other: LeadTier) -> bool {
        *self >= other
    }
}

impl fmt::Display for LeadTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LeadTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "cold" => Ok(LeadTier::Cold),
            "opportunity" => Ok(LeadTier::Opportunity),
            "high-potential" | "high" => Ok(LeadTier::HighPotential),
            "ready" => Ok(LeadTier::Ready),
            "hot" => Ok(LeadTier::Hot),
            other => anyhow::bail!(
                "Unknown tier '{}'. Expected one of: cold, opportunity, high-potential, ready, hot",
                other
            ),
        }
    }
}
