//! Feature engineering: repair missing cells and derive per-post features.
//!
//! Rows are never dropped here. Every defect is repaired in place and
//! counted in [`RepairStats`].

pub mod engineer;
pub mod timestamps;

pub use engineer::{engineer_posts, EngineeredBatch, RepairStats};
pub use timestamps::{median_timestamp, weekday_name};
