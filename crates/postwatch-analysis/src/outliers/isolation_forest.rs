//! Isolation forest (random partitioning trees, seeded).
//!
//! Points that are isolated after few random splits are outliers. Each tree
//! sees a subsample drawn without replacement, grows to a height limit of
//! `ceil(log2(sample_size))`, and splits on a feature chosen among those
//! still varying in the node, at a value drawn uniformly from its range.
//!
//! The outlier threshold is batch-relative: a row is an outlier when its
//! score falls in the `contamination` tail of the scores of the same batch.

use postwatch_core::config::DetectorConfig;
use postwatch_core::errors::DetectionError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::matrix_width;
use super::percentile::percentile;
use super::types::AnomalyScore;

const EULER_GAMMA: f64 = 0.577_215_664_9;

/// Parameters of an isolation forest run.
#[derive(Debug, Clone, PartialEq)]
pub struct IsolationForestConfig {
    /// Number of trees.
    pub n_estimators: usize,
    /// Expected outlier share, in (0, 0.5].
    pub contamination: f64,
    /// Subsample size per tree; `None` means min(256, rows).
    pub max_samples: Option<usize>,
    pub seed: u64,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            contamination: 0.15,
            max_samples: None,
            seed: 42,
        }
    }
}

impl From<&DetectorConfig> for IsolationForestConfig {
    fn from(config: &DetectorConfig) -> Self {
        Self {
            n_estimators: config.effective_n_estimators(),
            contamination: config.effective_contamination(),
            max_samples: config.max_samples,
            seed: config.effective_seed(),
        }
    }
}

impl IsolationForestConfig {
    pub fn validate(&self) -> Result<(), DetectionError> {
        if self.n_estimators == 0 {
            return Err(DetectionError::InvalidParameter {
                name: "n_estimators",
                message: "must be greater than 0".to_string(),
            });
        }
        if !(self.contamination > 0.0 && self.contamination <= 0.5) {
            return Err(DetectionError::InvalidParameter {
                name: "contamination",
                message: format!("{} is outside (0.0, 0.5]", self.contamination),
            });
        }
        if self.max_samples == Some(0) {
            return Err(DetectionError::InvalidParameter {
                name: "max_samples",
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A single isolation tree stored as a node arena; node 0 is the root.
#[derive(Debug, Clone)]
struct IsolationTree {
    nodes: Vec<Node>,
}

impl IsolationTree {
    fn grow(matrix: &[Vec<f64>], sample: Vec<usize>, height_limit: usize, rng: &mut StdRng) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.build(matrix, sample, 0, height_limit, rng);
        tree
    }

    fn build(
        &mut self,
        matrix: &[Vec<f64>],
        rows: Vec<usize>,
        depth: usize,
        height_limit: usize,
        rng: &mut StdRng,
    ) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { size: rows.len() });
        if depth >= height_limit || rows.len() <= 1 {
            return id;
        }

        let width = matrix[rows[0]].len();
        // Ranges cover finite values only.
        let varying: Vec<(usize, f64, f64)> = (0..width)
            .filter_map(|feature| {
                let (lo, hi) = rows
                    .iter()
                    .map(|&r| matrix[r][feature])
                    .filter(|v| v.is_finite())
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
                (hi > lo).then_some((feature, lo, hi))
            })
            .collect();
        if varying.is_empty() {
            return id;
        }

        let (feature, lo, hi) = varying[rng.random_range(0..varying.len())];
        let threshold = split_point(lo, hi, rng.random::<f64>());
        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) =
            rows.into_iter().partition(|&r| matrix[r][feature] <= threshold);

        let left = self.build(matrix, left_rows, depth + 1, height_limit, rng);
        let right = self.build(matrix, right_rows, depth + 1, height_limit, rng);
        self.nodes[id] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        id
    }

    /// Depth at which `point` lands, plus the expected remaining depth of its leaf.
    fn path_length(&self, point: &[f64]) -> f64 {
        let mut node = 0;
        let mut depth = 0.0;
        loop {
            match self.nodes[node] {
                Node::Leaf { size } => return depth + average_path_length(size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if point[feature] <= threshold { left } else { right };
                    depth += 1.0;
                }
            }
        }
    }
}

/// Point at fraction `u` of `[lo, hi]`. Interpolates instead of using
/// `hi - lo`, which overflows for finite bounds of opposite sign.
fn split_point(lo: f64, hi: f64, u: f64) -> f64 {
    (lo * (1.0 - u) + hi * u).clamp(lo, hi)
}

/// Expected path length of an unsuccessful BST search over `n` points.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// A fitted isolation forest.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    sample_size: usize,
    width: usize,
}

impl IsolationForest {
    /// Grow the forest on `matrix`. Fewer than two rows yields an empty forest.
    pub fn fit(matrix: &[Vec<f64>], config: &IsolationForestConfig) -> Result<Self, DetectionError> {
        config.validate()?;
        let width = matrix_width(matrix)?;
        let rows = matrix.len();
        if rows < 2 {
            return Ok(Self {
                trees: Vec::new(),
                sample_size: rows,
                width,
            });
        }

        let sample_size = config.max_samples.unwrap_or(256).min(rows);
        let height_limit = (sample_size.max(2) as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let trees = (0..config.n_estimators)
            .map(|_| {
                let sample = rand::seq::index::sample(&mut rng, rows, sample_size).into_vec();
                IsolationTree::grow(matrix, sample, height_limit, &mut rng)
            })
            .collect();

        debug!(
            trees = config.n_estimators,
            sample_size, height_limit, "grew isolation forest"
        );
        Ok(Self {
            trees,
            sample_size,
            width,
        })
    }

    /// Anomaly score `2^(-E[h(x)] / c(sample_size))` for each row of `matrix`.
    pub fn score(&self, matrix: &[Vec<f64>]) -> Result<Vec<f64>, DetectionError> {
        let width = matrix_width(matrix)?;
        if !matrix.is_empty() && !self.trees.is_empty() && width != self.width {
            return Err(DetectionError::RaggedMatrix {
                row: 0,
                found: width,
                expected: self.width,
            });
        }
        let norm = average_path_length(self.sample_size);
        if self.trees.is_empty() || norm <= 0.0 {
            return Ok(vec![0.5; matrix.len()]);
        }
        let n_trees = self.trees.len() as f64;
        Ok(matrix
            .iter()
            .map(|point| {
                let mean_depth =
                    self.trees.iter().map(|t| t.path_length(point)).sum::<f64>() / n_trees;
                2f64.powf(-mean_depth / norm)
            })
            .collect())
    }

    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Fit on `matrix` and classify each of its rows.
    ///
    /// A row is an outlier when its negated score is strictly below the
    /// `100 * contamination` percentile of all negated scores in the batch.
    pub fn fit_predict(
        matrix: &[Vec<f64>],
        config: &IsolationForestConfig,
    ) -> Result<Vec<AnomalyScore>, DetectionError> {
        let forest = Self::fit(matrix, config)?;
        let scores = forest.score(matrix)?;
        if !forest.is_fitted() {
            return Ok(scores
                .into_iter()
                .enumerate()
                .map(|(index, score)| AnomalyScore {
                    index,
                    score,
                    decision: 0.0,
                    is_outlier: false,
                })
                .collect());
        }

        let mut negated: Vec<f64> = scores.iter().map(|s| -s).collect();
        negated.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let offset = percentile(&negated, 100.0 * config.contamination);
        debug!(offset, "isolation forest threshold");

        Ok(scores
            .into_iter()
            .enumerate()
            .map(|(index, score)| {
                let decision = -score - offset;
                AnomalyScore {
                    index,
                    score,
                    decision,
                    is_outlier: decision < 0.0,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cluster_with_outlier() -> Vec<Vec<f64>> {
        let mut matrix: Vec<Vec<f64>> = (0..60)
            .map(|i| {
                let x = (i % 10) as f64 * 0.1;
                let y = (i / 10) as f64 * 0.1;
                vec![x, y]
            })
            .collect();
        matrix.push(vec![25.0, -25.0]);
        matrix
    }

    #[test]
    fn average_path_length_matches_known_values() {
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        // c(256) is about 10.24
        assert!((average_path_length(256) - 10.24).abs() < 0.01);
    }

    #[test]
    fn isolates_the_far_point() {
        let matrix = cluster_with_outlier();
        let results = IsolationForest::fit_predict(&matrix, &IsolationForestConfig::default()).unwrap();
        let far = results.last().unwrap();
        assert!(far.is_outlier);
        let max_score = results.iter().map(|r| r.score).fold(f64::MIN, f64::max);
        assert_eq!(far.score, max_score);
    }

    #[test]
    fn flags_roughly_contamination_share() {
        let matrix = cluster_with_outlier();
        let results = IsolationForest::fit_predict(&matrix, &IsolationForestConfig::default()).unwrap();
        let flagged = results.iter().filter(|r| r.is_outlier).count();
        assert!(flagged >= 1);
        assert!(flagged <= (0.15 * matrix.len() as f64).ceil() as usize);
    }

    #[test]
    fn same_seed_same_verdicts() {
        let matrix = cluster_with_outlier();
        let config = IsolationForestConfig::default();
        let a = IsolationForest::fit_predict(&matrix, &config).unwrap();
        let b = IsolationForest::fit_predict(&matrix, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn identical_rows_are_never_outliers() {
        let matrix = vec![vec![1.0, 2.0]; 30];
        let results = IsolationForest::fit_predict(&matrix, &IsolationForestConfig::default()).unwrap();
        assert!(results.iter().all(|r| !r.is_outlier));
    }

    #[test]
    fn tiny_batches_produce_no_outliers() {
        let config = IsolationForestConfig::default();
        assert!(IsolationForest::fit_predict(&[], &config).unwrap().is_empty());
        let single = IsolationForest::fit_predict(&[vec![1.0]], &config).unwrap();
        assert_eq!(single.len(), 1);
        assert!(!single[0].is_outlier);
    }

    #[test]
    fn extreme_finite_values_are_scored() {
        let mut matrix = cluster_with_outlier();
        matrix.push(vec![f64::MAX, 0.0]);
        matrix.push(vec![-f64::MAX, 0.0]);
        matrix.push(vec![f64::INFINITY, f64::NAN]);
        let results = IsolationForest::fit_predict(&matrix, &IsolationForestConfig::default()).unwrap();
        assert_eq!(results.len(), matrix.len());
        assert!(results.iter().all(|r| r.score.is_finite()));
    }

    #[test]
    fn split_point_stays_in_range() {
        assert_eq!(split_point(-f64::MAX, f64::MAX, 0.5), 0.0);
        assert_eq!(split_point(1.0, 3.0, 0.0), 1.0);
        assert_eq!(split_point(1.0, 3.0, 0.5), 2.0);
        let top = split_point(-1e308, 1e308, 0.999_999);
        assert!(top.is_finite() && top <= 1e308);
    }

    #[test]
    fn built_from_detector_config() {
        let detector = DetectorConfig {
            seed: Some(7),
            max_samples: Some(64),
            ..Default::default()
        };
        let config = IsolationForestConfig::from(&detector);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_samples, Some(64));
        assert_eq!(config.n_estimators, 100);
        assert_eq!(config.contamination, 0.15);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let matrix = cluster_with_outlier();
        let bad = IsolationForestConfig {
            contamination: 0.9,
            ..Default::default()
        };
        assert!(matches!(
            IsolationForest::fit(&matrix, &bad),
            Err(DetectionError::InvalidParameter { name: "contamination", .. })
        ));
        let bad = IsolationForestConfig {
            n_estimators: 0,
            ..Default::default()
        };
        assert!(IsolationForest::fit(&matrix, &bad).is_err());
    }
}
