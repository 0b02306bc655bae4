use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use super::config::IngestOptions;
use super::normalize::normalize_entities;
use super::raw::{decode_records, entity_records};
use crate::entity::BusinessEntity;

/// Parse and normalize entities from a JSON document.
pub fn parse_entities(json: &str, options: &IngestOptions) -> Result<Vec<BusinessEntity>> {
    let document: serde_json::Value =
        serde_json::from_str(json).context("Failed to parse entities: invalid JSON")?;
    let records = entity_records(document).context("Failed to parse entities")?;

    let raw = decode_records(records).map_err(|errors| invalid_records(&errors))?;
    normalize_entities(raw, options).map_err(|errors| invalid_records(&errors))
}

fn invalid_records(errors: &[String]) -> anyhow::Error {
    anyhow::anyhow!(
        "Invalid entity records:\n{}",
        errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

/// Load entities from a JSON file. A path of `-` reads standard input.
pub fn load_entities(path: &Path, options: &IngestOptions) -> Result<Vec<BusinessEntity>> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read entities from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read entities file at {}", path.display()))?
    };

    let entities = parse_entities(&content, options)
        .with_context(|| format!("Failed to load entities from {}", path.display()))?;

    tracing::debug!(count = entities.len(), path = %path.display(), "loaded entities");
    Ok(entities)
}
