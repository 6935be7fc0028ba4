//! Top-level postwatch configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AnnotatorKind, DetectorConfig, EntitiesConfig, RulesConfig, SynthConfig};
use crate::errors::ConfigError;

/// Name of the project-level config file.
pub const PROJECT_CONFIG_FILE: &str = "postwatch.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`POSTWATCH_*`)
/// 3. Project config (`postwatch.toml` in the working directory, or an explicit path)
/// 4. User config (`~/.postwatch/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PostwatchConfig {
    pub detector: DetectorConfig,
    pub rules: RulesConfig,
    pub entities: EntitiesConfig,
    pub synth: SynthConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub detector_seed: Option<u64>,
    pub contamination: Option<f64>,
    pub annotator: Option<AnnotatorKind>,
    pub synth_rows: Option<usize>,
    pub synth_misinfo_ratio: Option<f64>,
    pub synth_seed: Option<u64>,
}

impl PostwatchConfig {
    /// Load configuration with layered resolution.
    ///
    /// `explicit` replaces the project file lookup in `root`; unlike the
    /// implicit lookup, a missing explicit file is an error.
    pub fn load(
        root: &Path,
        explicit: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &PostwatchConfig) -> Result<(), ConfigError> {
        if let Some(c) = config.detector.contamination {
            if !(c > 0.0 && c <= 0.5) {
                return Err(ConfigError::ValidationFailed {
                    field: "detector.contamination".to_string(),
                    message: "must be in (0.0, 0.5]".to_string(),
                });
            }
        }
        if config.detector.n_estimators == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "detector.n_estimators".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.detector.max_samples == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "detector.max_samples".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(q) = config.rules.engagement_quantile {
            if !(0.0..=1.0).contains(&q) {
                return Err(ConfigError::ValidationFailed {
                    field: "rules.engagement_quantile".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if config.entities.max_chars == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "entities.max_chars".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(r) = config.synth.misinfo_ratio {
            if !(0.0..=1.0).contains(&r) {
                return Err(ConfigError::ValidationFailed {
                    field: "synth.misinfo_ratio".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.postwatch/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".postwatch").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PostwatchConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PostwatchConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Overlay `other` onto `base`; only `Some` values in `other` win.
    fn merge(base: &mut PostwatchConfig, other: &PostwatchConfig) {
        let (d, o) = (&mut base.detector, &other.detector);
        d.contamination = o.contamination.or(d.contamination);
        d.n_estimators = o.n_estimators.or(d.n_estimators);
        d.max_samples = o.max_samples.or(d.max_samples);
        d.seed = o.seed.or(d.seed);

        let (r, o) = (&mut base.rules, &other.rules);
        r.keyword_threshold = o.keyword_threshold.or(r.keyword_threshold);
        r.engagement_quantile = o.engagement_quantile.or(r.engagement_quantile);

        let (e, o) = (&mut base.entities, &other.entities);
        e.annotator = o.annotator.or(e.annotator);
        e.max_chars = o.max_chars.or(e.max_chars);

        let (s, o) = (&mut base.synth, &other.synth);
        s.rows = o.rows.or(s.rows);
        s.misinfo_ratio = o.misinfo_ratio.or(s.misinfo_ratio);
        s.seed = o.seed.or(s.seed);
    }

    /// Apply `POSTWATCH_<SECTION>_<FIELD>` environment overrides.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(config: &mut PostwatchConfig) {
        Self::merge(config, &env_layer());
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PostwatchConfig, cli: &CliOverrides) {
        config.detector.seed = cli.detector_seed.or(config.detector.seed);
        config.detector.contamination = cli.contamination.or(config.detector.contamination);
        config.entities.annotator = cli.annotator.or(config.entities.annotator);
        config.synth.rows = cli.synth_rows.or(config.synth.rows);
        config.synth.misinfo_ratio = cli.synth_misinfo_ratio.or(config.synth.misinfo_ratio);
        config.synth.seed = cli.synth_seed.or(config.synth.seed);
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Environment variables read as a config layer.
fn env_layer() -> PostwatchConfig {
    let mut layer = PostwatchConfig::default();
    layer.detector.contamination = env_parse("POSTWATCH_DETECTOR_CONTAMINATION");
    layer.detector.n_estimators = env_parse("POSTWATCH_DETECTOR_N_ESTIMATORS");
    layer.detector.seed = env_parse("POSTWATCH_DETECTOR_SEED");
    layer.rules.keyword_threshold = env_parse("POSTWATCH_RULES_KEYWORD_THRESHOLD");
    layer.rules.engagement_quantile = env_parse("POSTWATCH_RULES_ENGAGEMENT_QUANTILE");
    layer.entities.annotator = env_parse("POSTWATCH_ENTITIES_ANNOTATOR");
    layer.synth.seed = env_parse("POSTWATCH_SYNTH_SEED");
    layer
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
