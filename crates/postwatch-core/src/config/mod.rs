//! Configuration system for postwatch.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod detector_config;
pub mod entities_config;
pub mod postwatch_config;
pub mod rules_config;
pub mod synth_config;

pub use detector_config::DetectorConfig;
pub use entities_config::{AnnotatorKind, EntitiesConfig};
pub use postwatch_config::{CliOverrides, PostwatchConfig};
pub use rules_config::RulesConfig;
pub use synth_config::SynthConfig;
