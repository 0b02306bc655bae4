pub mod config;
pub mod load;
pub mod normalize;
pub mod raw;

pub use config::{validate_ingest, IngestConfig, IngestOptions};
pub use load::{load_entities, parse_entities};
pub use normalize::{normalize_confidence, normalize_entities};
