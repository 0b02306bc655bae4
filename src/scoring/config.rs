use serde::{Deserialize, Serialize};

pub const DEFAULT_OPPORTUNITY: u32 = 60;
pub const DEFAULT_HIGH_POTENTIAL: u32 = 70;
pub const DEFAULT_READY: u32 = 75;
pub const DEFAULT_HOT: u32 = 80;

/// Score thresholds for lead tiers.
///
/// A lead belongs to a tier when its score is strictly greater than the
/// tier's threshold. Unset thresholds fall back to the defaults.
///
/// Example YAML:
/// ```yaml
/// tiers:
///   opportunity: 60
///   high_potential: 70
///   ready: 75
///   hot: 80
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TierConfig {
    #[serde(default)]
    pub opportunity: Option<u32>,

    #[serde(default)]
    pub high_potential: Option<u32>,

    /// Leads above this count as ready for outreach
    #[serde(default)]
    pub ready: Option<u32>,

    #[serde(default)]
    pub hot: Option<u32>,
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            opportunity: Some(DEFAULT_OPPORTUNITY),
            high_potential: Some(DEFAULT_HIGH_POTENTIAL),
            ready: Some(DEFAULT_READY),
            hot: Some(DEFAULT_HOT),
        }
    }
}

impl TierConfig {
    /// Resolve into concrete thresholds, filling gaps with defaults.
    pub fn thresholds(&self) -> TierThresholds {
        TierThresholds {
            opportunity: self.opportunity.unwrap_or(DEFAULT_OPPORTUNITY),
            high_potential: self.high_potential.unwrap_or(DEFAULT_HIGH_POTENTIAL),
            ready: self.ready.unwrap_or(DEFAULT_READY),
            hot: self.hot.unwrap_or(DEFAULT_HOT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierThresholds {
    pub opportunity: u32,
    pub high_potential: u32,
    pub ready: u32,
    pub hot: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierConfig::default().thresholds()
    }
}
