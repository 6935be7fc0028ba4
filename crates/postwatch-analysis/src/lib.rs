//! Analysis engine: text normalization, feature engineering, outlier
//! detection, rule flagging, entity enrichment, chart data, and the
//! synthetic source generator.

pub mod charts;
pub mod entities;
pub mod features;
pub mod flagging;
pub mod io;
pub mod outliers;
pub mod pipeline;
pub mod synth;
pub mod text;

pub use features::engineer_posts;
pub use flagging::{flag_posts, FlagOutcome};
pub use pipeline::{Analysis, AnalysisReport, Pipeline};
pub use synth::{generate_posts, SynthParams};
