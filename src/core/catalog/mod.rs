//! Message catalog assembly.
//!
//! ## Module Structure
//!
//! - `builder`: `CatalogBuilder`, the deduplicating aggregator, and `CatalogError`
//! - `compare`: sort strategies for context names and message texts
//! - `message`: `RawMessage`, `Message` and the per-context read view
//! - `stats`: running counters for an extraction run

pub mod builder;
pub mod compare;
pub mod message;
pub mod stats;

pub use builder::{CatalogBuilder, CatalogError};
pub use compare::{Comparator, SortOrder, code_point_compare, locale_compare};
pub use message::{ContextMessages, Message, RawMessage};
pub use stats::ExtractionStats;
