//! Entity enrichment configuration.

use serde::{Deserialize, Serialize};

/// Which entity annotator to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnnotatorKind {
    /// Built-in gazetteer and pattern annotator.
    #[default]
    Gazetteer,
    /// No annotator; every row gets the unavailable sentinel.
    None,
}

impl AnnotatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gazetteer => "gazetteer",
            Self::None => "none",
        }
    }
}

impl std::str::FromStr for AnnotatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gazetteer" => Ok(Self::Gazetteer),
            "none" | "off" => Ok(Self::None),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EntitiesConfig {
    /// Annotator selection. Default: gazetteer.
    pub annotator: Option<AnnotatorKind>,
    /// Characters of post text handed to the annotator. Default: 500.
    pub max_chars: Option<usize>,
}

impl EntitiesConfig {
    pub fn effective_annotator(&self) -> AnnotatorKind {
        self.annotator.unwrap_or_default()
    }

    pub fn effective_max_chars(&self) -> usize {
        self.max_chars.unwrap_or(500)
    }
}
