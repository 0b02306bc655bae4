//! Lead intelligence: normalize business entity records, score them for
//! engagement, and rank them for outreach.
//!
//! The scoring core lives in [`scoring::calculate_engagement_score`]; it is a
//! pure function over a [`entity::BusinessEntity`] and safe to call from any
//! thread.

pub mod config;
pub mod entity;
pub mod ingest;
pub mod logging;
pub mod output;
pub mod rank;
pub mod scoring;
