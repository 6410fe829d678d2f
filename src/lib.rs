// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod classify;
pub mod config;
pub mod error;
pub mod freshness;
pub mod gazetteer;
pub mod ingest;
pub mod pipeline;
pub mod posting;
pub mod sink;
pub mod trust;

// ---- Re-exports for stable public API ----
pub use crate::config::ClassificationConfig;
pub use crate::error::{ConfigError, FetchError, SinkError};
pub use crate::gazetteer::{resolve_region, Region};
pub use crate::ingest::types::{FeedQuery, FeedSource, RawEntry};
pub use crate::pipeline::{collect_board, merge, Pipeline};
pub use crate::posting::{Category, JobBoard, Posting};
