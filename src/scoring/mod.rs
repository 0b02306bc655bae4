pub mod config;
pub mod engine;
pub mod tiers;
pub mod validation;

pub use config::{TierConfig, TierThresholds};
pub use engine::{
    calculate_engagement_score, calculate_engagement_score_at, EngagementBreakdown,
    EngagementScore, ScoreComponents,
};
pub use tiers::LeadTier;
pub use validation::validate_tiers;
