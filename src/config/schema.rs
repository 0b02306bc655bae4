use serde::{Deserialize, Serialize};

use crate::ingest::IngestConfig;
use crate::scoring::TierConfig;

/// Contents of `config.yaml`. Every section is optional.
///
/// Example YAML:
/// ```yaml
/// input: ~/leads/latest.json
/// tiers:
///   opportunity: 60
///   high_potential: 70
///   ready: 75
///   hot: 80
/// ingest:
///   signal_window: "30d"
///   percent_confidence: false
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Entities file used when `--input` is not given
    #[serde(default)]
    pub input: Option<String>,

    #[serde(default)]
    pub tiers: Option<TierConfig>,

    #[serde(default)]
    pub ingest: Option<IngestConfig>,
}

impl Config {
    /// The config written by `init`: every section present with its defaults.
    pub fn template() -> Self {
        Self {
            input: None,
            tiers: Some(TierConfig::default()),
            ingest: Some(IngestConfig {
                signal_window: None,
                percent_confidence: Some(false),
            }),
        }
    }

    pub fn effective_tiers(&self) -> TierConfig {
        self.tiers.clone().unwrap_or_default()
    }

    pub fn effective_ingest(&self) -> IngestConfig {
        self.ingest.clone().unwrap_or_default()
    }
}
