//! Optional entity enrichment.
//!
//! The annotator is a capability the caller may or may not have. With no
//! annotator every row carries the unavailable sentinel; with one, rows get
//! the rendered spans or the none sentinel.

pub mod annotator;
pub mod gazetteer;

pub use annotator::{annotator_for, enrich_entities, render_spans, EntityAnnotator, EntitySpan};
pub use gazetteer::GazetteerAnnotator;
