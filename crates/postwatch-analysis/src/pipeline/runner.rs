//! The pipeline runner.
//!
//! In-memory stages (`preprocess`, `analyze`, `run`) are separate from the
//! file-level ones so callers can test the data path without touching disk.
//! File-level stages compute everything before writing any output.

use std::path::Path;

use postwatch_core::config::PostwatchConfig;
use postwatch_core::errors::PipelineError;
use postwatch_core::types::{EngineeredPost, LabeledPost, RawPost};
use tracing::{info, instrument};

use super::evaluation::{evaluate, ConfusionMatrix};
use crate::charts::{build_chart_data, ChartData, ChartRenderer, JsonChartRenderer};
use crate::entities::{annotator_for, enrich_entities, EntityAnnotator};
use crate::features::{engineer_posts, EngineeredBatch, RepairStats};
use crate::flagging::flag_posts;
use crate::io;
use crate::outliers::IsolationForestConfig;

/// Summary of an analyze run.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub rows: usize,
    pub anomalies: usize,
    pub misinformation: usize,
    /// Posts each rule fired for, sorted by rule id.
    pub rule_hits: Vec<(&'static str, usize)>,
    pub charts: ChartData,
    /// Present when the run included preprocessing.
    pub repairs: Option<RepairStats>,
    /// Present when the input carried ground-truth labels.
    pub evaluation: Option<ConfusionMatrix>,
}

/// Labeled posts plus their summary.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub posts: Vec<LabeledPost>,
    pub report: AnalysisReport,
}

pub struct Pipeline {
    config: PostwatchConfig,
    annotator: Option<Box<dyn EntityAnnotator>>,
}

impl Pipeline {
    /// Build a pipeline with the annotator named in `config`.
    pub fn new(config: PostwatchConfig) -> Result<Self, PipelineError> {
        let annotator = annotator_for(config.entities.effective_annotator())?;
        Ok(Self { config, annotator })
    }

    /// Build a pipeline with an explicit annotator, ignoring the configured one.
    pub fn with_annotator(config: PostwatchConfig, annotator: Option<Box<dyn EntityAnnotator>>) -> Self {
        Self { config, annotator }
    }

    pub fn config(&self) -> &PostwatchConfig {
        &self.config
    }

    /// Repair and engineer raw posts. Never fails, never drops rows.
    pub fn preprocess(&self, raw: Vec<RawPost>) -> EngineeredBatch {
        engineer_posts(raw)
    }

    /// Flag and enrich engineered posts.
    #[instrument(skip_all, fields(rows = posts.len()))]
    pub fn analyze(&self, posts: Vec<EngineeredPost>) -> Result<Analysis, PipelineError> {
        let detector = IsolationForestConfig::from(&self.config.detector);
        let outcome = flag_posts(&posts, &detector, &self.config.rules)?;
        let entities = enrich_entities(
            &posts,
            self.annotator.as_deref(),
            self.config.entities.effective_max_chars(),
        );

        let labeled: Vec<LabeledPost> = posts
            .into_iter()
            .zip(entities)
            .enumerate()
            .map(|(i, (post, entities))| LabeledPost {
                post,
                is_anomaly: outcome.is_anomaly[i],
                is_misinformation: outcome.is_misinformation[i],
                entities,
            })
            .collect();

        let mut rule_hits: Vec<(&'static str, usize)> = outcome.rule_hits.iter().map(|(&k, &v)| (k, v)).collect();
        rule_hits.sort_unstable();

        let evaluation = evaluate(&labeled);
        if let Some(m) = &evaluation {
            info!(
                true_positives = m.true_positives,
                false_positives = m.false_positives,
                true_negatives = m.true_negatives,
                false_negatives = m.false_negatives,
                precision = m.precision(),
                recall = m.recall(),
                accuracy = m.accuracy(),
                "evaluation against ground truth"
            );
        }

        let report = AnalysisReport {
            rows: labeled.len(),
            anomalies: outcome.anomaly_count(),
            misinformation: outcome.misinformation_count(),
            rule_hits,
            charts: build_chart_data(&labeled),
            repairs: None,
            evaluation,
        };
        Ok(Analysis {
            posts: labeled,
            report,
        })
    }

    /// Preprocess and analyze in one pass. Returns the cleaned posts too.
    pub fn run(&self, raw: Vec<RawPost>) -> Result<(Vec<EngineeredPost>, Analysis), PipelineError> {
        let batch = self.preprocess(raw);
        let cleaned = batch.posts.clone();
        let mut analysis = self.analyze(batch.posts)?;
        analysis.report.repairs = Some(batch.repairs);
        Ok((cleaned, analysis))
    }

    /// Raw table in, cleaned table out.
    #[instrument(skip(self))]
    pub fn preprocess_file(&self, input: &Path, output: &Path) -> Result<RepairStats, PipelineError> {
        let batch = self.preprocess(io::read_raw_posts(input)?);
        io::write_cleaned_posts(output, &batch.posts)?;
        Ok(batch.repairs)
    }

    /// Cleaned table in, labeled table (and optional chart data) out.
    #[instrument(skip(self))]
    pub fn analyze_file(
        &self,
        input: &Path,
        output: &Path,
        charts: Option<&Path>,
    ) -> Result<AnalysisReport, PipelineError> {
        let analysis = self.analyze(io::read_cleaned_posts(input)?)?;
        let mut outputs = vec![(output, io::render_labeled_posts(&analysis.posts)?)];
        if let Some(path) = charts {
            outputs.push((path, render_charts(&analysis.report)?));
        }
        commit(&outputs)?;
        Ok(analysis.report)
    }

    /// Raw table in, labeled table out, with an optional cleaned table and chart data.
    ///
    /// Either every requested file is written or none is.
    #[instrument(skip(self))]
    pub fn run_file(
        &self,
        input: &Path,
        output: &Path,
        cleaned: Option<&Path>,
        charts: Option<&Path>,
    ) -> Result<AnalysisReport, PipelineError> {
        let (cleaned_posts, analysis) = self.run(io::read_raw_posts(input)?)?;
        let mut outputs = vec![(output, io::render_labeled_posts(&analysis.posts)?)];
        if let Some(path) = cleaned {
            outputs.push((path, io::render_cleaned_posts(&cleaned_posts)?));
        }
        if let Some(path) = charts {
            outputs.push((path, render_charts(&analysis.report)?));
        }
        commit(&outputs)?;
        Ok(analysis.report)
    }
}

fn render_charts(report: &AnalysisReport) -> Result<Vec<u8>, PipelineError> {
    Ok(JsonChartRenderer.render(&report.charts)?.into_bytes())
}

fn commit(outputs: &[(&Path, Vec<u8>)]) -> Result<(), PipelineError> {
    let files: Vec<(&Path, &[u8])> = outputs.iter().map(|(path, bytes)| (*path, bytes.as_slice())).collect();
    io::write_all_atomic(&files)?;
    for (path, _) in outputs {
        info!(path = %path.display(), "wrote output");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use postwatch_core::config::AnnotatorKind;
    use postwatch_core::constants::ENTITIES_UNAVAILABLE;

    fn raw(id: usize, content: &str, sentiment: f64, shares: u64) -> RawPost {
        RawPost {
            post_id: format!("POST_{id:04}"),
            user_id: "user_001".to_string(),
            timestamp: Some(format!("2024-05-{:02} 09:00:00", 1 + id % 5)),
            post_content: Some(content.to_string()),
            num_shares: Some(shares),
            num_reactions: Some(20),
            source_link: Some("UNKNOWN".to_string()),
            sentiment_score: Some(sentiment),
            flagged: Some(sentiment < 0.0),
        }
    }

    fn batch() -> Vec<RawPost> {
        let mut posts: Vec<RawPost> = (0..30)
            .map(|i| raw(i, "Great concert last night with friends", 0.6, 5 + (i % 4) as u64))
            .collect();
        posts.push(raw(30, "SHOCKING secret cure they are hiding, BANNED!", -0.8, 900));
        posts
    }

    #[test]
    fn run_labels_every_row() {
        let pipeline = Pipeline::new(PostwatchConfig::default()).unwrap();
        let (cleaned, analysis) = pipeline.run(batch()).unwrap();
        assert_eq!(cleaned.len(), 31);
        assert_eq!(analysis.posts.len(), 31);
        assert_eq!(analysis.report.rows, 31);
        assert!(analysis.posts[30].is_misinformation);
        assert!(analysis.report.repairs.is_some());
        let eval = analysis.report.evaluation.unwrap();
        assert_eq!(eval.total(), 31);
        assert_eq!(eval.true_positives, 1);
    }

    #[test]
    fn disabled_annotator_writes_unavailable() {
        let mut config = PostwatchConfig::default();
        config.entities.annotator = Some(AnnotatorKind::None);
        let pipeline = Pipeline::new(config).unwrap();
        let (_, analysis) = pipeline.run(batch()).unwrap();
        assert!(analysis.posts.iter().all(|p| p.entities == ENTITIES_UNAVAILABLE));
    }

    #[test]
    fn rule_hits_are_sorted() {
        let pipeline = Pipeline::new(PostwatchConfig::default()).unwrap();
        let (_, analysis) = pipeline.run(batch()).unwrap();
        let ids: Vec<&str> = analysis.report.rule_hits.iter().map(|(id, _)| *id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let pipeline = Pipeline::new(PostwatchConfig::default()).unwrap();
        let (cleaned, analysis) = pipeline.run(Vec::new()).unwrap();
        assert!(cleaned.is_empty());
        assert_eq!(analysis.report.misinformation, 0);
        assert!(analysis.report.evaluation.is_none());
    }
}
