//! Stage orchestration: preprocess, analyze, or both in one pass.

pub mod evaluation;
pub mod runner;

pub use evaluation::{evaluate, ConfusionMatrix};
pub use runner::{Analysis, AnalysisReport, Pipeline};
