//! Annotator capability and the enrichment step built on it.

use postwatch_core::config::AnnotatorKind;
use postwatch_core::constants::{ENTITIES_NONE, ENTITIES_UNAVAILABLE};
use postwatch_core::errors::EntityError;
use postwatch_core::types::EngineeredPost;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::gazetteer::GazetteerAnnotator;

/// One labeled span found in a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// A text-annotation service that extracts named entities.
pub trait EntityAnnotator: Send + Sync {
    /// Annotator identifier, for logs.
    fn name(&self) -> &str;

    /// Extract spans from `text`, in text order.
    fn annotate(&self, text: &str) -> Result<Vec<EntitySpan>, EntityError>;
}

/// Resolve the configured annotator. `AnnotatorKind::None` means no capability.
pub fn annotator_for(kind: AnnotatorKind) -> Result<Option<Box<dyn EntityAnnotator>>, EntityError> {
    Ok(match kind {
        AnnotatorKind::Gazetteer => Some(Box::new(GazetteerAnnotator::try_new()?) as Box<dyn EntityAnnotator>),
        AnnotatorKind::None => None,
    })
}

/// Render spans as `"<text> (<LABEL>)"` joined by `", "`, or the none sentinel.
pub fn render_spans(spans: &[EntitySpan]) -> String {
    if spans.is_empty() {
        return ENTITIES_NONE.to_string();
    }
    spans
        .iter()
        .map(|s| format!("{} ({})", s.text, s.label))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Compute the entities column for every post, in input order.
///
/// Only the first `max_chars` characters of each post are annotated. A
/// failing annotation degrades to the none sentinel for that row.
pub fn enrich_entities(
    posts: &[EngineeredPost],
    annotator: Option<&dyn EntityAnnotator>,
    max_chars: usize,
) -> Vec<String> {
    let Some(annotator) = annotator else {
        info!(rows = posts.len(), "no entity annotator configured");
        return vec![ENTITIES_UNAVAILABLE.to_string(); posts.len()];
    };

    let mut failures = 0usize;
    let column: Vec<String> = posts
        .iter()
        .map(|post| {
            let text = match post.post_content.as_deref() {
                Some(t) if !t.trim().is_empty() => t,
                _ => return ENTITIES_NONE.to_string(),
            };
            let head: String = text.chars().take(max_chars).collect();
            match annotator.annotate(&head) {
                Ok(spans) => render_spans(&spans),
                Err(e) => {
                    failures += 1;
                    warn!(post_id = %post.post_id, error = %e, "entity annotation failed");
                    ENTITIES_NONE.to_string()
                }
            }
        })
        .collect();

    info!(
        annotator = annotator.name(),
        rows = posts.len(),
        failures,
        "entity enrichment complete"
    );
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::engineer_posts;
    use postwatch_core::types::RawPost;

    struct Failing;

    impl EntityAnnotator for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn annotate(&self, _text: &str) -> Result<Vec<EntitySpan>, EntityError> {
            Err(EntityError::AnnotationFailed {
                annotator: "failing".to_string(),
                message: "boom".to_string(),
            })
        }
    }

    /// Records the length of every text it is handed.
    struct LengthProbe(std::sync::Mutex<Vec<usize>>);

    impl EntityAnnotator for LengthProbe {
        fn name(&self) -> &str {
            "probe"
        }

        fn annotate(&self, text: &str) -> Result<Vec<EntitySpan>, EntityError> {
            self.0.lock().unwrap().push(text.chars().count());
            Ok(vec![EntitySpan::new("x", "TEST")])
        }
    }

    fn posts(contents: &[Option<&str>]) -> Vec<EngineeredPost> {
        let raw = contents
            .iter()
            .enumerate()
            .map(|(i, c)| RawPost {
                post_id: format!("POST_{i:04}"),
                user_id: "user_001".to_string(),
                timestamp: Some("2024-05-01 12:00:00".to_string()),
                post_content: c.map(str::to_string),
                ..RawPost::default()
            })
            .collect();
        engineer_posts(raw).posts
    }

    #[test]
    fn absent_annotator_yields_unavailable() {
        let column = enrich_entities(&posts(&[Some("NASA"), None]), None, 500);
        assert_eq!(column, vec!["N/A", "N/A"]);
    }

    #[test]
    fn missing_text_yields_none() {
        let annotator = GazetteerAnnotator::try_new().unwrap();
        let column = enrich_entities(&posts(&[None, Some("   ")]), Some(&annotator), 500);
        assert_eq!(column, vec!["NONE", "NONE"]);
    }

    #[test]
    fn failures_degrade_to_none() {
        let column = enrich_entities(&posts(&[Some("anything")]), Some(&Failing), 500);
        assert_eq!(column, vec!["NONE"]);
    }

    #[test]
    fn text_is_truncated_to_max_chars() {
        let probe = LengthProbe(std::sync::Mutex::new(Vec::new()));
        let long = "é".repeat(800);
        let column = enrich_entities(&posts(&[Some(&long), Some("short")]), Some(&probe), 500);
        assert_eq!(column, vec!["x (TEST)", "x (TEST)"]);
        assert_eq!(*probe.0.lock().unwrap(), vec![500, 5]);
    }

    #[test]
    fn renders_spans_in_order() {
        let spans = vec![EntitySpan::new("Bill Gates", "PERSON"), EntitySpan::new("1947", "DATE")];
        assert_eq!(render_spans(&spans), "Bill Gates (PERSON), 1947 (DATE)");
        assert_eq!(render_spans(&[]), "NONE");
    }

    #[test]
    fn none_kind_has_no_annotator() {
        assert!(annotator_for(AnnotatorKind::None).unwrap().is_none());
        assert_eq!(
            annotator_for(AnnotatorKind::Gazetteer).unwrap().unwrap().name(),
            "gazetteer"
        );
    }
}
