use super::config::TierConfig;
use super::engine::MAX_SCORE;

/// Validate tier thresholds at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_tiers(config: &TierConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    let fields = [
        ("opportunity", config.opportunity),
        ("high_potential", config.high_potential),
        ("ready", config.ready),
        ("hot", config.hot),
    ];

    for (name, value) in fields {
        if let Some(v) = value {
            if v > MAX_SCORE {
                errors.push(format!(
                    "tiers.{}: must be at most {} (got {})",
                    name, MAX_SCORE, v
                ));
            }
        }
    }

    // Ordering is checked on resolved values so a partial config can't
    // invert the defaults it doesn't override.
    let t = config.thresholds();
    let ordered = [
        ("opportunity", t.opportunity),
        ("high_potential", t.high_potential),
        ("ready", t.ready),
        ("hot", t.hot),
    ];
    for pair in ordered.windows(2) {
        let (lower_name, lower) = pair[0];
        let (upper_name, upper) = pair[1];
        if lower > upper {
            errors.push(format!(
                "tiers.{}: must not exceed tiers.{} ({} > {})",
                lower_name, upper_name, lower, upper
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers(
        opportunity: Option<u32>,
        high: Option<u32>,
        ready: Option<u32>,
        hot: Option<u32>,
    ) -> TierConfig {
        TierConfig {
            opportunity,
            high_potential: high,
            ready,
            hot,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_tiers(&TierConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        assert!(validate_tiers(&tiers(None, None, None, None)).is_ok());
    }

    #[test]
    fn test_threshold_above_max() {
        let result = validate_tiers(&tiers(None, None, None, Some(150)));
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("tiers.hot"));
    }

    #[test]
    fn test_inverted_thresholds() {
        let result = validate_tiers(&tiers(Some(90), None, None, None));
        let errors = result.unwrap_err();
        assert!(errors[0].contains("tiers.opportunity"));
        assert!(errors[0].contains("tiers.high_potential"));
    }

    #[test]
    fn test_partial_override_checked_against_defaults() {
        // ready=85 sits above the default hot=80
        let result = validate_tiers(&tiers(None, None, Some(85), None));
        let errors = result.unwrap_err();
        assert!(errors[0].contains("tiers.ready"));
    }

    #[test]
    fn test_collects_all_errors() {
        let result = validate_tiers(&tiers(Some(101), Some(50), None, Some(200)));
        let errors = result.unwrap_err();
        // opportunity and hot out of range, opportunity above high_potential
        assert_eq!(errors.len(), 3);
    }
}
