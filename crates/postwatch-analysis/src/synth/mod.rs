//! Seeded generator for labelled synthetic post tables.

pub mod generator;
pub mod templates;

pub use generator::{generate_posts, SynthParams};
