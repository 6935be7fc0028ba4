//! Agreement between the flagger and a ground-truth `flagged` column.

use postwatch_core::types::LabeledPost;
use serde::{Deserialize, Serialize};

/// Confusion matrix over labelled rows, misinformation as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// 0.0 when nothing was flagged.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    /// 0.0 when there are no positive labels.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Compare verdicts against the `flagged` labels. Unlabelled rows are
/// skipped; `None` when no row carries a label.
pub fn evaluate(posts: &[LabeledPost]) -> Option<ConfusionMatrix> {
    let mut matrix = ConfusionMatrix::default();
    for p in posts {
        let Some(truth) = p.post.flagged else {
            continue;
        };
        match (truth, p.is_misinformation) {
            (true, true) => matrix.true_positives += 1,
            (false, true) => matrix.false_positives += 1,
            (false, false) => matrix.true_negatives += 1,
            (true, false) => matrix.false_negatives += 1,
        }
    }
    (matrix.total() > 0).then_some(matrix)
}
